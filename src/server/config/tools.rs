use std::path::Path;

use serde::Deserialize;

use crate::{lib::errors::ConfigError, resources::translations};

pub const DEFAULT_TRANSLATION: &str = "kjv";
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_MAX_SEARCH_LIMIT: u32 = 100;

/// Defaults applied to tool arguments the caller leaves out.
#[derive(Debug, Clone)]
pub struct ToolsSection {
    pub default_translation: String,
    pub default_search_limit: u32,
    pub max_search_limit: u32,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            default_translation: DEFAULT_TRANSLATION.to_string(),
            default_search_limit: DEFAULT_SEARCH_LIMIT,
            max_search_limit: DEFAULT_MAX_SEARCH_LIMIT,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawToolsSection {
    pub default_translation: Option<String>,
    pub default_search_limit: Option<u32>,
    pub max_search_limit: Option<u32>,
}

pub fn parse_tools_section(
    raw: Option<RawToolsSection>,
    path: &Path,
) -> Result<ToolsSection, ConfigError> {
    let tools_raw = raw.unwrap_or_default();

    let requested = tools_raw
        .default_translation
        .unwrap_or_else(|| DEFAULT_TRANSLATION.to_string());
    let default_translation = translations::find_translation(&requested)
        .map(|translation| translation.code.to_string())
        .ok_or_else(|| ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "tools.default_translation",
            message: format!("Unknown translation code `{requested}`"),
        })?;

    let max_search_limit = tools_raw
        .max_search_limit
        .unwrap_or(DEFAULT_MAX_SEARCH_LIMIT);
    if !(1..=500).contains(&max_search_limit) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "tools.max_search_limit",
            message: "Specify a value between 1 and 500".into(),
        });
    }

    let default_search_limit = tools_raw
        .default_search_limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT.min(max_search_limit));
    if default_search_limit == 0 || default_search_limit > max_search_limit {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "tools.default_search_limit",
            message: format!("Specify a value between 1 and {max_search_limit}"),
        });
    }

    Ok(ToolsSection {
        default_translation,
        default_search_limit,
        max_search_limit,
    })
}
