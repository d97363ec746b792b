use crate::{
    cli::{LaunchProfile, TransportMode},
    server::config::ServerConfig,
};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(profile: &LaunchProfile, config: &ServerConfig) -> String {
    let endpoint = match profile.transport {
        TransportMode::Http => format!(
            "streamable HTTP at http://{host}:{port}{path}",
            host = config.server.host,
            port = config.server.port,
            path = config.server.path
        ),
        TransportMode::Stdio => "stdio".to_string(),
    };
    format!(
        "Bible lookup server ({endpoint}) backed by {upstream}. \
Tools: get_verse, search_verses, get_chapter, get_random_verse. \
Resources: bible://books, bible://translations. Prompts: bible_study, daily_reflection. \
Default translation is `{translation}`.",
        upstream = config.upstream.base_url,
        translation = config.tools.default_translation
    )
}
