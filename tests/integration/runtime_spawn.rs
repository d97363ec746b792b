use std::{process::Stdio, time::Duration};

use anyhow::Result;
use rmcp::{model::ClientInfo, serve_client};
use tokio::{process::Command, time::timeout};

use crate::common::{fixture, spawn_server_process, FakeUpstream, BINARY_PATH};

#[tokio::test]
async fn stdio_spawn_lists_all_tools() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process().await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let list = client.list_tools(None).await?;
    for expected in ["get_verse", "search_verses", "get_chapter", "get_random_verse"] {
        assert!(
            list.tools.iter().any(|tool| tool.name.as_ref() == expected),
            "list_tools should include {expected}: {:?}",
            list.tools
        );
    }
    let info = client.peer_info().cloned();
    assert!(
        info.and_then(|info| info.instructions)
            .is_some_and(|text| text.contains("bible://books")),
        "instructions should mention the catalog resources"
    );

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}

#[tokio::test]
async fn books_command_prints_catalog_json() -> Result<()> {
    let output = Command::new(BINARY_PATH)
        .arg("--config")
        .arg(fixture("tests/fixtures/config_valid.toml"))
        .arg("books")
        .env_remove("PORT")
        .stdin(Stdio::null())
        .output()
        .await?;
    assert!(output.status.success(), "{output:?}");
    let document: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(document["count"], 66);
    Ok(())
}

#[tokio::test]
async fn invalid_config_exits_with_failure() -> Result<()> {
    let output = Command::new(BINARY_PATH)
        .arg("--config")
        .arg(fixture("tests/fixtures/config_invalid_port.toml"))
        .arg("--transport")
        .arg("stdio")
        .env_remove("PORT")
        .stdin(Stdio::null())
        .output()
        .await?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("server.port"), "{stderr}");
    Ok(())
}

#[tokio::test]
async fn environment_overrides_layer_over_config_file() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let output = Command::new(BINARY_PATH)
        .arg("--config")
        .arg(fixture("tests/fixtures/config_empty.toml"))
        .arg("verse")
        .arg("John 3:16")
        .env("BIBLE_MCP__UPSTREAM__BASE_URL", &upstream.base_url)
        .env("BIBLE_MCP__TOOLS__DEFAULT_TRANSLATION", "web")
        .env_remove("PORT")
        .env_remove("BIBLE_API_TOKEN")
        .stdin(Stdio::null())
        .output()
        .await?;
    assert!(output.status.success(), "{output:?}");

    let document: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(document["translation"], "web");
    assert_eq!(document["verse"], 16);
    assert_eq!(upstream.log.paths(), vec!["John 3:16".to_string()]);
    Ok(())
}
