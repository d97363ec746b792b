//! LaunchProfile and token/config resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::server::config::{telemetry as config_telemetry, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

const MAX_TOKEN_LENGTH: usize = 512;
const API_TOKEN_ENV: &str = "BIBLE_API_TOKEN";

/// MCP transport mode.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum TransportMode {
    #[default]
    Http,
    Stdio,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Http => "http",
            TransportMode::Stdio => "stdio",
        }
    }
}

/// Source for the upstream API token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Cli,
    Env,
    Missing,
}

impl TokenSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenSource::Cli => "cli",
            TokenSource::Env => "env",
            TokenSource::Missing => "config",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: PathBuf,
    /// False only when falling back to the default `config.toml`.
    pub config_required: bool,
    pub transport: TransportMode,
    pub api_token: Option<String>,
    pub token_source: TokenSource,
    pub launch_args: Vec<String>,
}

/// Resolve config path in the order: CLI override → env var → default.
///
/// Returns whether the file must exist alongside the absolute path.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<(PathBuf, bool)> {
    let (path, required) = match override_path {
        Some(path) => (path, true),
        None => {
            let (path, from_env) =
                match env::var_os(CONFIG_ENV_KEY).filter(|value| !value.is_empty()) {
                    Some(value) => (PathBuf::from(value), true),
                    None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
                };
            config_telemetry::log_env_source(&path, from_env);
            (path, from_env)
        }
    };

    if path.is_absolute() {
        return Ok((path, required));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok((cwd.join(path), required))
}

/// Resolve the upstream token in the order: CLI override → env var.
///
/// `Missing` leaves the config file value (if any) in place.
pub fn resolve_token(token_override: Option<String>) -> (Option<String>, TokenSource) {
    resolve_token_with(token_override, env::var(API_TOKEN_ENV).ok())
}

fn resolve_token_with(
    token_override: Option<String>,
    env_token: Option<String>,
) -> (Option<String>, TokenSource) {
    if let Some(token) = token_override.and_then(|v| normalize_token(&v)) {
        return (Some(token), TokenSource::Cli);
    }

    if let Some(token) = env_token.and_then(|v| normalize_token(&v)) {
        return (Some(token), TokenSource::Env);
    }

    (None, TokenSource::Missing)
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(transport: TransportMode, config: &Path) -> Vec<String> {
    vec![
        format!("--transport={}", transport.as_str()),
        format!("--config={}", config.display()),
    ]
}

fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_TOKEN_LENGTH {
        return None;
    }
    Some(trimmed.to_string())
}
