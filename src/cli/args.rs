//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::{build_launch_args, resolve_config_path, resolve_token, LaunchProfile, TransportMode};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli(LaunchProfile, CliCommand),
}

/// One-shot lookups that print JSON instead of starting the server.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the book catalog.
    Books,
    /// Print the supported translation codes.
    Translations,
    /// Look up a verse or verse range, e.g. `verse "John 3:16"`.
    Verse(VerseArgs),
    /// Print every verse of a chapter.
    Chapter(ChapterArgs),
    /// Search verses for a word or phrase.
    Search(SearchArgs),
    /// Print a random verse from the curated list.
    Random(TranslationArg),
}

/// Optional translation code shared by lookup commands.
#[derive(Debug, Clone, Args)]
pub struct TranslationArg {
    /// Translation code (defaults to tools.default_translation).
    #[arg(long)]
    pub translation: Option<String>,
}

/// Arguments for `verse`.
#[derive(Debug, Clone, Args)]
pub struct VerseArgs {
    /// Reference such as `John 3:16` or `Psalm 23:1-6`.
    pub reference: String,
    #[command(flatten)]
    pub translation: TranslationArg,
}

/// Arguments for `chapter`.
#[derive(Debug, Clone, Args)]
pub struct ChapterArgs {
    /// Book name or abbreviation.
    pub book: String,
    /// Chapter number.
    pub chapter: u32,
    #[command(flatten)]
    pub translation: TranslationArg,
}

/// Arguments for `search`.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Word or phrase to search for.
    pub query: String,
    #[command(flatten)]
    pub translation: TranslationArg,
    /// Maximum number of results.
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Bible MCP server (verse lookup, search, and study prompts)",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Select http (default) or stdio.
    #[arg(long, value_enum, default_value_t = TransportMode::Http)]
    pub transport: TransportMode,
    /// Path to config.toml (overrides MCP_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Bearer token for the upstream Bible API (overrides BIBLE_API_TOKEN).
    #[arg(long = "api-token")]
    pub token_override: Option<String>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let (config_path, config_required) = resolve_config_path(self.config_override)?;
        let (api_token, token_source) = resolve_token(self.token_override);

        let launch_args = build_launch_args(self.transport, &config_path);

        Ok(LaunchProfile {
            config_path,
            config_required,
            transport: self.transport,
            api_token,
            token_source,
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(mut self) -> Result<ParsedCommand> {
        match self.command.take() {
            Some(command) => Ok(ParsedCommand::Cli(self.build()?, command)),
            None => Ok(ParsedCommand::RunServer(self.build()?)),
        }
    }
}
