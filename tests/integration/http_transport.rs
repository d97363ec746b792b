use anyhow::{Context, Result};
use bible_mcp::server::runtime::{http_router, BibleServer};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::common::{test_config, FakeUpstream};

async fn start_http_server(upstream: &FakeUpstream) -> Result<(String, tokio::task::JoinHandle<()>)> {
    let config = test_config(&upstream.base_url)?;
    let server = BibleServer::new(config.clone(), "bible-http".into())?;
    let router = http_router(server, &config);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let task = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok((format!("http://{addr}"), task))
}

#[tokio::test]
async fn health_route_reports_ok() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (base, task) = start_http_server(&upstream).await?;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await?
        .error_for_status()?
        .json()
        .await?;
    task.abort();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "bible-mcp");
    Ok(())
}

#[tokio::test]
async fn sse_endpoint_accepts_initialize() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (base, task) = start_http_server(&upstream).await?;

    let response = reqwest::Client::new()
        .post(format!("{base}/sse"))
        .header(ACCEPT, "application/json, text/event-stream")
        .header(CONTENT_TYPE, "application/json")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2025-03-26",
                "capabilities": {},
                "clientInfo": { "name": "http-test", "version": "0.0.0" }
            }
        }))
        .send()
        .await?;
    let status = response.status();
    let session = response
        .headers()
        .get("mcp-session-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    task.abort();

    assert!(status.is_success(), "initialize returned {status}");
    session.context("streamable HTTP responses carry a session id")?;
    Ok(())
}
