//! Load and validate server configuration.
use std::{env, path::PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod server;
pub mod telemetry;
pub mod tools;
pub mod upstream;

pub use server::{
    parse_server_section, RawServerSection, ServerSection, DEFAULT_HOST, DEFAULT_PATH,
    DEFAULT_PORT, PORT_ENV_KEY,
};
pub use tools::{
    parse_tools_section, RawToolsSection, ToolsSection, DEFAULT_MAX_SEARCH_LIMIT,
    DEFAULT_SEARCH_LIMIT, DEFAULT_TRANSLATION,
};
pub use upstream::{
    parse_upstream_section, RawUpstreamSection, UpstreamSection, DEFAULT_BASE_URL,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};

pub(crate) const CONFIG_ENV_KEY: &str = "MCP_CONFIG_PATH";
pub(crate) const DEFAULT_CONFIG_PATH: &str = "config.toml";
const ENV_PREFIX: &str = "BIBLE_MCP";
const ENV_SEPARATOR: &str = "__";

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub upstream: UpstreamSection,
    pub tools: ToolsSection,
    pub source_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    upstream: Option<RawUpstreamSection>,
    tools: Option<RawToolsSection>,
}

impl ServerConfig {
    /// Load configuration, layering `BIBLE_MCP__*` variables and `PORT` over the file.
    pub fn load(path: PathBuf, required: bool) -> Result<Self, ConfigError> {
        Self::load_with(path, required, env::var(PORT_ENV_KEY).ok())
    }

    fn load_with(
        path: PathBuf,
        required: bool,
        port_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        info!(
            target: "bible_mcp::config",
            path = %path.display(),
            required,
            "Starting configuration load"
        );

        let builder = config::Config::builder()
            .add_source(config::File::from(path.clone()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "bible_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "bible_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone(), port_override).map_err(|err| {
            error!(
                target: "bible_mcp::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Replace the upstream token when the launch profile resolved one.
    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token {
            self.upstream.token = Some(token);
        }
    }

    fn from_raw(
        raw: RawServerConfig,
        path: PathBuf,
        port_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, port_override, &path)?;
        let upstream = parse_upstream_section(raw.upstream, &path)?;
        let tools = parse_tools_section(raw.tools, &path)?;

        Ok(Self {
            server,
            upstream,
            tools,
            source_path: path,
        })
    }
}
