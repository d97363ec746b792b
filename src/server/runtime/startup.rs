use std::{process::ExitCode, time::Duration};

use anyhow::{Context, Error};
use axum::{routing::get, Json, Router};
use rmcp::{
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ServiceExt,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::{
    cli::{LaunchProfile, TransportMode},
    server::{
        config::ServerConfig,
        runtime::{build_instructions, BibleServer},
    },
    tools::bible::api_error_to_error_data,
};

const HEALTH_PATH: &str = "/health";

/// Bundles a runtime error message with an exit code and optional structured error data.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
    error_data: Option<rmcp::model::ErrorData>,
}

impl RuntimeExit {
    pub fn structured(error: rmcp::model::ErrorData, exit_code: ExitCode) -> Self {
        Self {
            message: error.message.to_string(),
            exit_code,
            error_data: Some(error),
        }
    }

    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
            error_data: None,
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(data) = self.error_data {
            if let Ok(serialized) = serde_json::to_string(&data) {
                eprintln!("{serialized}");
            } else {
                eprintln!("{}", data.message);
            }
        } else {
            eprintln!("{}", self.message);
        }
        self.exit_code
    }
}

/// Start the MCP server and select stdio/HTTP based on the launch profile.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let instructions = build_instructions(&profile, &config);
    let server = BibleServer::new(config.clone(), instructions.clone()).map_err(|err| {
        RuntimeExit::structured(api_error_to_error_data(err), ExitCode::FAILURE)
    })?;

    let http = profile.transport == TransportMode::Http;
    crate::lib::telemetry::emit_runtime_mode(&crate::lib::telemetry::RuntimeModeTelemetry {
        transport: profile.transport.as_str(),
        host: http.then_some(config.server.host.as_str()),
        port: http.then_some(config.server.port),
        path: http.then_some(config.server.path.as_str()),
        config_path: config.source_path.to_string_lossy().as_ref(),
        upstream: config.upstream.base_url.as_str(),
        token_source: profile.token_source.as_str(),
        instructions: &instructions,
        launch_args: &profile.launch_args,
    });

    match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Http => run_http(server, &config).await,
    }
}

async fn run_stdio(server: BibleServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

/// Build the axum router that serves MCP under `server.path` plus a health probe.
pub fn http_router(server: BibleServer, config: &ServerConfig) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            sse_keep_alive: Some(Duration::from_secs(config.server.sse_keep_alive_secs)),
            ..Default::default()
        },
    );
    Router::new()
        .route(HEALTH_PATH, get(health))
        .nest_service(&config.server.path, service)
}

async fn run_http(server: BibleServer, config: &ServerConfig) -> Result<(), RuntimeExit> {
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind HTTP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "bible_mcp::runtime",
        transport = "http",
        bind_addr = %addr,
        path = %config.server.path,
        "Started listening in HTTP mode"
    );

    axum::serve(listener, http_router(server, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| format!("HTTP server on {addr} stopped unexpectedly"))
        .map_err(RuntimeExit::from_error)?;

    tracing::info!(
        target: "bible_mcp::runtime",
        bind_addr = %addr,
        "HTTP server shut down"
    );
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(
            target: "bible_mcp::runtime",
            error = %err,
            "Failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
    tracing::info!(target: "bible_mcp::runtime", "Shutdown signal received");
}
