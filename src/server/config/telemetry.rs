use tracing::{debug, info};

use super::{ServerConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_env_source(path: &std::path::Path, from_env: bool) {
    if from_env {
        info!(
            target: "bible_mcp::config",
            path = %path.display(),
            "Loading configuration using MCP_CONFIG_PATH environment variable"
        );
    } else {
        debug!(
            target: "bible_mcp::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "MCP_CONFIG_PATH not set; using optional default config.toml"
        );
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "bible_mcp::config",
        path = %config.source_path.display(),
        host = %config.server.host,
        port = config.server.port,
        endpoint = %config.server.path,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        upstream_token = config.upstream.token.is_some(),
        default_translation = %config.tools.default_translation,
        max_search_limit = config.tools.max_search_limit,
        "Configuration loaded successfully"
    );
}
