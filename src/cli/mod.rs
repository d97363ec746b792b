//! CLI entrypoint module structure.
use anyhow::Result;
use serde::Serialize;

use crate::{
    resources::{read_catalog, BOOKS_URI, TRANSLATIONS_URI},
    server::config::ServerConfig,
    tools::bible::{
        self, BibleApiClient, GetChapterRequest, GetVerseRequest, RandomVerseRequest,
        SearchVersesRequest,
    },
};

pub mod args;
pub mod profile;

pub use args::{
    ChapterArgs, CliCommand, LaunchProfileArgs, ParsedCommand, SearchArgs, TranslationArg,
    VerseArgs,
};
pub use profile::{
    build_launch_args, resolve_config_path, resolve_token, LaunchProfile, TokenSource,
    TransportMode,
};

/// Execute CLI command mode and return a user-facing JSON payload.
pub async fn execute_cli_command(command: CliCommand, config: &ServerConfig) -> Result<String> {
    match command {
        CliCommand::Books => Ok(read_catalog(BOOKS_URI)?),
        CliCommand::Translations => Ok(read_catalog(TRANSLATIONS_URI)?),
        CliCommand::Verse(args) => {
            let client = BibleApiClient::new(&config.upstream)?;
            let request = GetVerseRequest {
                reference: args.reference,
                translation: args.translation.translation,
            };
            render(&bible::get_verse(request, &client, &config.tools).await?)
        }
        CliCommand::Chapter(args) => {
            let client = BibleApiClient::new(&config.upstream)?;
            let request = GetChapterRequest {
                book: args.book,
                chapter: args.chapter,
                translation: args.translation.translation,
            };
            render(&bible::get_chapter(request, &client, &config.tools).await?)
        }
        CliCommand::Search(args) => {
            let client = BibleApiClient::new(&config.upstream)?;
            let request = SearchVersesRequest {
                query: args.query,
                translation: args.translation.translation,
                limit: args.limit,
            };
            render(&bible::search_verses(request, &client, &config.tools).await?)
        }
        CliCommand::Random(args) => {
            let client = BibleApiClient::new(&config.upstream)?;
            let request = RandomVerseRequest {
                translation: args.translation,
            };
            render(&bible::get_random_verse(request, &client, &config.tools).await?)
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
