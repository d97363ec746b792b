//! `get_chapter`: every verse of one chapter.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{lib::errors::BibleApiError, server::config::ToolsSection};

use super::{
    client::BibleApiClient, display_book, reference::VerseReference, resolve_translation, Verse,
    GET_CHAPTER_TOOL,
};

/// Input for `get_chapter`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetChapterRequest {
    /// Book name or abbreviation, e.g. 'John', 'Genesis', '1 Corinthians'.
    pub book: String,
    /// Chapter number, starting at 1.
    pub chapter: u32,
    /// Translation code (see bible://translations). Defaults to the server default, usually 'kjv'.
    #[serde(default)]
    pub translation: Option<String>,
}

/// Response from `get_chapter`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChapterResponse {
    pub book: String,
    pub chapter: u32,
    pub translation: String,
    pub translation_name: String,
    pub verse_count: usize,
    pub verses: Vec<Verse>,
}

pub async fn get_chapter(
    request: GetChapterRequest,
    client: &BibleApiClient,
    tools: &ToolsSection,
) -> Result<ChapterResponse, BibleApiError> {
    let reference = VerseReference::chapter_only(&request.book, request.chapter)?;
    let translation = resolve_translation(request.translation.as_deref(), tools)?;
    reference.ensure_chapter_exists()?;

    let payload = client
        .passage(GET_CHAPTER_TOOL, &reference.to_string(), translation.code)
        .await?;
    let mut verses: Vec<Verse> = payload
        .verses
        .into_iter()
        .map(|verse| Verse::from_payload(verse, &reference))
        .collect();
    if verses.is_empty() {
        return Err(BibleApiError::NotFound {
            target: reference.to_string(),
            message: "the Bible API returned no verses".into(),
        });
    }
    verses.sort_by_key(|verse| verse.verse);

    let translation_name = match payload.translation_name.trim() {
        "" => translation.name.to_string(),
        name => name.to_string(),
    };
    Ok(ChapterResponse {
        book: verses
            .first()
            .map(|verse| verse.book.clone())
            .unwrap_or_else(|| display_book(&reference)),
        chapter: reference.chapter,
        translation: translation.code.to_string(),
        translation_name,
        verse_count: verses.len(),
        verses,
    })
}
