use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PATH: &str = "/sse";
pub const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;
pub const PORT_ENV_KEY: &str = "PORT";

/// Server socket settings.
#[derive(Debug, Clone)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub sse_keep_alive_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            sse_keep_alive_secs: DEFAULT_SSE_KEEP_ALIVE_SECS,
        }
    }
}

impl ServerSection {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: Option<String>,
    pub sse_keep_alive_secs: Option<u64>,
}

pub fn parse_server_section(
    raw: Option<RawServerSection>,
    port_override: Option<String>,
    path: &Path,
) -> Result<ServerSection, ConfigError> {
    let server_raw = raw.unwrap_or_default();
    let host = server_raw.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    if host.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "server.host",
            message: "Host cannot be empty".into(),
        });
    }

    let port = match port_override.filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|err| ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "server.port",
                message: format!("{PORT_ENV_KEY}={value} is not a valid port: {err}"),
            })?,
        None => server_raw.port.unwrap_or(DEFAULT_PORT),
    };
    validate_port(port, path)?;

    let endpoint = server_raw.path.unwrap_or_else(|| DEFAULT_PATH.to_string());
    validate_endpoint_path(&endpoint, path)?;

    let sse_keep_alive_secs = server_raw
        .sse_keep_alive_secs
        .unwrap_or(DEFAULT_SSE_KEEP_ALIVE_SECS);
    validate_keep_alive(sse_keep_alive_secs, path)?;

    Ok(ServerSection {
        host,
        port,
        path: endpoint,
        sse_keep_alive_secs,
    })
}

fn validate_port(port: u16, path: &Path) -> Result<(), ConfigError> {
    if (1024..=65535).contains(&port) {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "server.port",
        message: "Use a port in the range 1024-65535".into(),
    })
}

fn validate_endpoint_path(endpoint: &str, path: &Path) -> Result<(), ConfigError> {
    if endpoint.len() > 1 && endpoint.starts_with('/') && !endpoint.ends_with('/') {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "server.path",
        message: format!("Endpoint path must start with '/' and not end with one: {endpoint}"),
    })
}

fn validate_keep_alive(secs: u64, path: &Path) -> Result<(), ConfigError> {
    if (1..=300).contains(&secs) {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "server.sse_keep_alive_secs",
        message: "Specify a value between 1 and 300 seconds".into(),
    })
}
