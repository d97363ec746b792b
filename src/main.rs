//! Entry point for the Bible MCP server.
use std::process::ExitCode;

use anyhow::Error;
use bible_mcp::{
    cli::{execute_cli_command, CliCommand, LaunchProfile, LaunchProfileArgs, ParsedCommand},
    lib::telemetry,
    server::{
        config::ServerConfig,
        runtime::{self, RuntimeExit},
    },
};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchProfileArgs::parse();
    let command = args.into_command().map_err(RuntimeExit::from_error)?;

    match command {
        ParsedCommand::RunServer(profile) => run_server(profile).await,
        ParsedCommand::Cli(profile, command) => handle_cli_command(profile, command).await,
    }
}

fn load_config(profile: &LaunchProfile) -> Result<ServerConfig, RuntimeExit> {
    let mut config = ServerConfig::load(profile.config_path.clone(), profile.config_required)
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))?;
    config.apply_token_override(profile.api_token.clone());
    Ok(config)
}

async fn run_server(profile: LaunchProfile) -> Result<(), RuntimeExit> {
    let config = load_config(&profile)?;
    runtime::run_server(profile, config).await
}

async fn handle_cli_command(profile: LaunchProfile, command: CliCommand) -> Result<(), RuntimeExit> {
    let config = load_config(&profile)?;
    let message = execute_cli_command(command, &config)
        .await
        .map_err(RuntimeExit::from_error)?;
    println!("{message}");
    Ok(())
}
