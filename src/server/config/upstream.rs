use std::path::Path;

use reqwest::Url;
use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://bible-api.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Upstream Bible API settings.
#[derive(Debug, Clone)]
pub struct UpstreamSection {
    pub base_url: Url,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub token: Option<String>,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            token: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawUpstreamSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub token: Option<String>,
}

pub fn parse_upstream_section(
    raw: Option<RawUpstreamSection>,
    path: &Path,
) -> Result<UpstreamSection, ConfigError> {
    let upstream_raw = raw.unwrap_or_default();

    let base_url = upstream_raw
        .base_url
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = parse_base_url(&base_url, path)?;

    let timeout_secs = upstream_raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if !(1..=120).contains(&timeout_secs) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "upstream.timeout_secs",
            message: "Specify a value between 1 and 120 seconds".into(),
        });
    }

    let connect_timeout_secs = upstream_raw
        .connect_timeout_secs
        .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
    if !(1..=60).contains(&connect_timeout_secs) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "upstream.connect_timeout_secs",
            message: "Specify a value between 1 and 60 seconds".into(),
        });
    }

    let token = upstream_raw
        .token
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    Ok(UpstreamSection {
        base_url,
        timeout_secs,
        connect_timeout_secs,
        token,
    })
}

fn parse_base_url(raw: &str, path: &Path) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "upstream.base_url",
        message: format!("`{raw}` is not a valid URL: {err}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "upstream.base_url",
            message: format!("Only http(s) base URLs are supported: {raw}"),
        });
    }
    Ok(url)
}
