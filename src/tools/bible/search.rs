//! `search_verses`: keyword search through the upstream API.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{lib::errors::BibleApiError, server::config::ToolsSection};

use super::{client::BibleApiClient, client::VersePayload, resolve_translation};

const MAX_QUERY_LEN: usize = 200;

/// Input for `search_verses`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchVersesRequest {
    /// Word or phrase to search for, e.g. 'love' or 'faith hope'.
    pub query: String,
    /// Translation code (see bible://translations). Defaults to the server default, usually 'kjv'.
    #[serde(default)]
    pub translation: Option<String>,
    /// Maximum number of results. Defaults to 10 and is capped by the server maximum.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// One verse that matched the query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchHit {
    pub reference: String,
    pub translation: String,
    pub text: String,
}

/// Response from `search_verses`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchVersesResponse {
    pub query: String,
    pub translation: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

pub async fn search_verses(
    request: SearchVersesRequest,
    client: &BibleApiClient,
    tools: &ToolsSection,
) -> Result<SearchVersesResponse, BibleApiError> {
    let query = validate_query(&request.query)?;
    let limit = effective_limit(request.limit, tools)?;
    let translation = resolve_translation(request.translation.as_deref(), tools)?;

    let verses = match client.search(query, translation.code, limit).await {
        Ok(verses) => verses,
        Err(BibleApiError::NotFound { .. }) => Vec::new(),
        Err(err) => return Err(err),
    };

    let results = collect_hits(verses, query, translation.code, limit);
    Ok(SearchVersesResponse {
        query: query.to_string(),
        translation: translation.code.to_string(),
        count: results.len(),
        results,
    })
}

fn validate_query(raw: &str) -> Result<&str, BibleApiError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(BibleApiError::InvalidInput {
            field: "query",
            message: "query must not be blank".into(),
        });
    }
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(BibleApiError::InvalidInput {
            field: "query",
            message: format!("query is longer than {MAX_QUERY_LEN} characters"),
        });
    }
    Ok(query)
}

fn effective_limit(requested: Option<u32>, tools: &ToolsSection) -> Result<u32, BibleApiError> {
    match requested {
        Some(0) => Err(BibleApiError::InvalidInput {
            field: "limit",
            message: "limit must be at least 1".into(),
        }),
        Some(limit) => Ok(limit.min(tools.max_search_limit)),
        None => Ok(tools.default_search_limit),
    }
}

/// Keep upstream order, drop hits whose text lacks the query, then truncate.
fn collect_hits(
    verses: Vec<VersePayload>,
    query: &str,
    translation: &str,
    limit: u32,
) -> Vec<SearchHit> {
    let needle = query.to_lowercase();
    verses
        .into_iter()
        .filter_map(|verse| {
            let text = verse.text.trim();
            if text.is_empty() || !text.to_lowercase().contains(&needle) {
                return None;
            }
            Some(SearchHit {
                reference: hit_reference(&verse)?,
                translation: translation.to_string(),
                text: text.to_string(),
            })
        })
        .take(limit as usize)
        .collect()
}

fn hit_reference(verse: &VersePayload) -> Option<String> {
    if let Some(reference) = verse
        .reference
        .as_deref()
        .map(str::trim)
        .filter(|reference| !reference.is_empty())
    {
        return Some(reference.to_string());
    }
    let book = verse.book_name.as_deref()?.trim();
    match (verse.chapter, verse.verse) {
        (Some(chapter), Some(number)) if !book.is_empty() => {
            Some(format!("{book} {chapter}:{number}"))
        }
        _ => None,
    }
}
