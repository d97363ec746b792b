use anyhow::{Context, Result};
use bible_mcp::{
    lib::errors::BibleApiError,
    server::runtime::BibleServer,
    tools::bible::{BibleApiClient, CURATED_VERSES, GET_VERSE_TOOL},
};
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, ClientInfo, ErrorCode, ErrorData,
        GetPromptRequestParam, PromptMessageContent, ReadResourceRequestParam, ResourceContents,
    },
    serve_client,
    service::{RunningService, ServiceError},
    RoleClient, ServiceExt,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use crate::common::{test_config, FakeUpstream, UPSTREAM_TOKEN};

type TestClient = RunningService<RoleClient, ClientInfo>;

async fn connect(upstream: &FakeUpstream) -> Result<(TestClient, JoinHandle<Result<()>>)> {
    let server = BibleServer::new(test_config(&upstream.base_url)?, "bible-integration".into())?;
    let (server_transport, client_transport) = tokio::io::duplex(4096);
    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;
    Ok((client, server_task))
}

async fn disconnect(client: TestClient, server_task: JoinHandle<Result<()>>) {
    let _ = client.cancel().await;
    let _ = server_task.await;
}

async fn call(
    client: &TestClient,
    name: &'static str,
    arguments: Value,
) -> Result<CallToolResult, ServiceError> {
    client
        .call_tool(CallToolRequestParam {
            name: name.into(),
            arguments: arguments.as_object().cloned(),
        })
        .await
}

fn structured(result: CallToolResult) -> Result<Value> {
    result.structured_content.context("structured_content")
}

fn mcp_error(result: Result<CallToolResult, ServiceError>) -> Result<ErrorData> {
    match result {
        Ok(response) => anyhow::bail!("expected an error, got {response:?}"),
        Err(ServiceError::McpError(inner)) => Ok(inner),
        Err(other) => anyhow::bail!("unexpected error: {other:?}"),
    }
}

fn error_code_field(error: &ErrorData) -> Option<&str> {
    error.data.as_ref()?.get("code")?.as_str()
}

#[tokio::test]
async fn get_verse_returns_requested_verse() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let result = call(&client, "get_verse", json!({ "reference": "John 3:16" })).await;
    disconnect(client, server_task).await;

    let payload = structured(result?)?;
    assert_eq!(payload["reference"], "John 3:16");
    assert_eq!(payload["book"], "John");
    assert_eq!(payload["chapter"], 3);
    assert_eq!(payload["verse"], 16);
    assert_eq!(payload["translation"], "kjv");
    assert_eq!(payload["text"], "Text of John 3:16.");
    assert!(payload.get("end_verse").is_none());
    assert_eq!(payload["verses"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        upstream.log.authorization(),
        vec![format!("Bearer {UPSTREAM_TOKEN}")]
    );
    Ok(())
}

#[tokio::test]
async fn get_verse_range_uses_lowercase_translation() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let result = call(
        &client,
        "get_verse",
        json!({ "reference": "Psalm 23:1-3", "translation": "WEB" }),
    )
    .await;
    disconnect(client, server_task).await;

    let payload = structured(result?)?;
    assert_eq!(payload["translation"], "web");
    assert_eq!(payload["translation_name"], "Fake web");
    assert_eq!(payload["verse"], 1);
    assert_eq!(payload["end_verse"], 3);
    let numbers: Vec<u64> = payload["verses"]
        .as_array()
        .context("verses")?
        .iter()
        .filter_map(|verse| verse["verse"].as_u64())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn unknown_book_is_an_error_not_an_empty_result() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let result = call(&client, "get_verse", json!({ "reference": "Notabook 99:99" })).await;
    disconnect(client, server_task).await;

    let error = mcp_error(result)?;
    assert!(
        error.code == ErrorCode::RESOURCE_NOT_FOUND || error.code == ErrorCode::INVALID_PARAMS,
        "{error:?}"
    );
    assert_eq!(error_code_field(&error), Some("not_found"));
    Ok(())
}

#[tokio::test]
async fn chapter_past_catalog_end_fails_without_upstream_call() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let verse = call(&client, "get_verse", json!({ "reference": "Jude 2:1" })).await;
    let chapter = call(&client, "get_chapter", json!({ "book": "John", "chapter": 22 })).await;
    disconnect(client, server_task).await;

    assert_eq!(mcp_error(verse)?.code, ErrorCode::RESOURCE_NOT_FOUND);
    assert_eq!(mcp_error(chapter)?.code, ErrorCode::RESOURCE_NOT_FOUND);
    assert!(upstream.log.paths().is_empty(), "{:?}", upstream.log.paths());
    Ok(())
}

#[tokio::test]
async fn malformed_input_is_a_validation_error() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let bad_reference = call(&client, "get_verse", json!({ "reference": "John three" })).await;
    let reversed = call(&client, "get_verse", json!({ "reference": "Romans 8:30-28" })).await;
    let bad_translation = call(
        &client,
        "get_verse",
        json!({ "reference": "John 3:16", "translation": "niv" }),
    )
    .await;
    let blank_query = call(&client, "search_verses", json!({ "query": "  " })).await;
    let zero_chapter = call(&client, "get_chapter", json!({ "book": "John", "chapter": 0 })).await;
    disconnect(client, server_task).await;

    let bad_reference = mcp_error(bad_reference)?;
    assert_eq!(bad_reference.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(error_code_field(&bad_reference), Some("invalid_reference"));

    assert_eq!(mcp_error(reversed)?.code, ErrorCode::INVALID_PARAMS);

    let bad_translation = mcp_error(bad_translation)?;
    assert_eq!(bad_translation.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(
        error_code_field(&bad_translation),
        Some("unknown_translation")
    );

    assert_eq!(mcp_error(blank_query)?.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(mcp_error(zero_chapter)?.code, ErrorCode::INVALID_PARAMS);
    assert!(upstream.log.paths().is_empty());
    Ok(())
}

#[tokio::test]
async fn search_results_all_contain_the_query() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let all = call(&client, "search_verses", json!({ "query": "love" })).await;
    let limited = call(
        &client,
        "search_verses",
        json!({ "query": "love", "limit": 1 }),
    )
    .await;
    let nothing = call(&client, "search_verses", json!({ "query": "zzzz" })).await;
    disconnect(client, server_task).await;

    let all = structured(all?)?;
    let results = all["results"].as_array().context("results")?;
    assert_eq!(all["count"], 2);
    assert!(!results.is_empty());
    for hit in results {
        let text = hit["text"].as_str().context("text")?;
        assert!(text.to_lowercase().contains("love"), "{text}");
        assert_eq!(hit["translation"], "kjv");
    }
    assert_eq!(results[0]["reference"], "1 John 4:8");
    assert_eq!(results[1]["reference"], "John 3:16");

    let limited = structured(limited?)?;
    assert_eq!(limited["count"], 1);

    let nothing = structured(nothing?)?;
    assert_eq!(nothing["count"], 0);
    assert_eq!(nothing["results"], json!([]));
    Ok(())
}

#[tokio::test]
async fn chapter_verses_are_contiguous_from_one() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let result = call(&client, "get_chapter", json!({ "book": "John", "chapter": 3 })).await;
    disconnect(client, server_task).await;

    let payload = structured(result?)?;
    assert_eq!(payload["book"], "John");
    assert_eq!(payload["chapter"], 3);
    assert_eq!(payload["verse_count"], 5);
    let numbers: Vec<u64> = payload["verses"]
        .as_array()
        .context("verses")?
        .iter()
        .filter_map(|verse| verse["verse"].as_u64())
        .collect();
    let expected: Vec<u64> = (1..=numbers.len() as u64).collect();
    assert_eq!(numbers, expected);
    assert_eq!(upstream.log.paths(), vec!["John 3".to_string()]);
    Ok(())
}

#[tokio::test]
async fn random_verse_always_returns_curated_reference() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let mut payloads = Vec::new();
    for _ in 0..5 {
        payloads.push(call(&client, "get_random_verse", json!({})).await);
    }
    disconnect(client, server_task).await;

    for result in payloads {
        let payload = structured(result?)?;
        let reference = payload["reference"].as_str().context("reference")?;
        assert!(CURATED_VERSES.contains(&reference), "{reference}");
        assert_eq!(payload["translation"], "kjv");
        assert!(!payload["text"].as_str().unwrap_or_default().is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn upstream_failure_is_retryable_upstream_error() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let result = call(&client, "get_verse", json!({ "reference": "Broken 1:1" })).await;
    disconnect(client, server_task).await;

    let error = mcp_error(result)?;
    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    let data = error.data.context("error data")?;
    assert_eq!(data["code"], "upstream_unavailable");
    assert_eq!(data["kind"], "upstream");
    assert_eq!(data["retryable"], true);
    assert_eq!(data["status"], 503);
    Ok(())
}

#[tokio::test]
async fn catalog_resources_are_listed_and_readable() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let listed = client.list_resources(None).await;
    let books = client
        .read_resource(ReadResourceRequestParam {
            uri: "bible://books".into(),
        })
        .await;
    let missing = client
        .read_resource(ReadResourceRequestParam {
            uri: "bible://missing".into(),
        })
        .await;
    disconnect(client, server_task).await;

    let uris: Vec<String> = listed?
        .resources
        .iter()
        .map(|resource| resource.uri.clone())
        .collect();
    assert_eq!(uris, vec!["bible://books", "bible://translations"]);

    let books = books?;
    let text = match books.contents.first().context("contents")? {
        ResourceContents::TextResourceContents { text, .. } => text.clone(),
        other => anyhow::bail!("unexpected contents: {other:?}"),
    };
    let document: Value = serde_json::from_str(&text)?;
    assert_eq!(document["count"], 66);
    assert_eq!(document["books"][65]["name"], "Revelation");

    match missing {
        Err(ServiceError::McpError(inner)) => {
            assert_eq!(inner.code, ErrorCode::RESOURCE_NOT_FOUND)
        }
        other => anyhow::bail!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn prompts_substitute_arguments() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let (client, server_task) = connect(&upstream).await?;

    let listed = client.list_prompts(None).await;
    let study = client
        .get_prompt(GetPromptRequestParam {
            name: "bible_study".into(),
            arguments: json!({ "topic_or_passage": "Romans 8:28", "study_level": "basic" })
                .as_object()
                .cloned(),
        })
        .await;
    let reflection = client
        .get_prompt(GetPromptRequestParam {
            name: "daily_reflection".into(),
            arguments: json!({ "verse_or_theme": "hope" }).as_object().cloned(),
        })
        .await;
    disconnect(client, server_task).await;

    let names: Vec<String> = listed?
        .prompts
        .iter()
        .map(|prompt| prompt.name.to_string())
        .collect();
    assert!(names.contains(&"bible_study".to_string()), "{names:?}");
    assert!(names.contains(&"daily_reflection".to_string()), "{names:?}");

    let study_text = prompt_text(study?.messages.first().map(|m| &m.content))?;
    assert!(study_text.contains("Romans 8:28"));
    assert!(study_text.contains("Study Level: basic"));

    let reflection_text = prompt_text(reflection?.messages.first().map(|m| &m.content))?;
    assert!(reflection_text.contains("**Scripture Focus**: hope"));
    assert!(reflection_text.contains("**Life Focus**: spiritual growth"));
    Ok(())
}

#[tokio::test]
async fn slow_upstream_times_out_as_retryable_error() -> Result<()> {
    let upstream = FakeUpstream::start().await?;
    let mut config = test_config(&upstream.base_url)?;
    config.upstream.timeout_secs = 1;
    let client = BibleApiClient::new(&config.upstream)?;

    let err = client
        .passage(GET_VERSE_TOOL, "Slow 1:1", "kjv")
        .await
        .err()
        .context("slow upstream should time out")?;

    assert!(
        matches!(err, BibleApiError::Timeout { timeout_secs: 1 }),
        "{err:?}"
    );
    assert!(err.is_retryable());
    assert_eq!(upstream.log.paths(), vec!["Slow 1:1".to_string()]);
    Ok(())
}

fn prompt_text(content: Option<&PromptMessageContent>) -> Result<String> {
    match content.context("prompt message")? {
        PromptMessageContent::Text { text } => Ok(text.clone()),
        other => anyhow::bail!("unexpected prompt content: {other:?}"),
    }
}
