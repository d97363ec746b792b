//! Telemetry initialization and upstream request span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, warn, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of one upstream Bible API call.
pub struct UpstreamSpan {
    span: Span,
    started_at: Instant,
    request_id: Uuid,
    operation: &'static str,
}

impl UpstreamSpan {
    pub fn start(operation: &'static str, path: &str) -> Self {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            target: "bible_mcp::upstream",
            "upstream_request",
            %request_id,
            operation,
            path
        );
        Self {
            span,
            started_at: Instant::now(),
            request_id,
            operation,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording the HTTP status (if any) and outcome.
    pub fn finish(self, outcome: &'static str, status: Option<u16>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        if outcome == "ok" {
            info!(
                target: "bible_mcp::upstream",
                request_id = %self.request_id,
                operation = self.operation,
                status = status,
                elapsed_ms = elapsed_ms,
                "Completed Bible API request"
            );
        } else {
            warn!(
                target: "bible_mcp::upstream",
                request_id = %self.request_id,
                operation = self.operation,
                outcome = outcome,
                status = status,
                elapsed_ms = elapsed_ms,
                "Bible API request did not succeed"
            );
        }
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub path: Option<&'a str>,
    pub config_path: &'a str,
    pub upstream: &'a str,
    pub token_source: &'a str,
    pub instructions: &'a str,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "bible_mcp::runtime",
        transport = telemetry.transport,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        path = telemetry.path.unwrap_or(""),
        config_path = telemetry.config_path,
        upstream = telemetry.upstream,
        token_source = telemetry.token_source,
        instructions = telemetry.instructions,
        launch_args = ?telemetry.launch_args,
        "Started MCP server"
    );
}
