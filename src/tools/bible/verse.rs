//! `get_verse` and `get_random_verse`.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    lib::errors::BibleApiError, resources::Translation, server::config::ToolsSection,
};

use super::{
    client::BibleApiClient, display_book, reference::VerseReference, resolve_translation, Verse,
    GET_RANDOM_VERSE_TOOL, GET_VERSE_TOOL,
};

/// References `get_random_verse` draws from.
pub const CURATED_VERSES: [&str; 12] = [
    "Jeremiah 29:11",
    "Romans 8:28",
    "Philippians 4:13",
    "John 3:16",
    "Psalm 23:1",
    "Isaiah 40:31",
    "Proverbs 3:5-6",
    "Matthew 28:20",
    "Romans 8:31",
    "Ephesians 2:8-9",
    "Psalm 46:1",
    "Isaiah 41:10",
];

/// Input for `get_verse`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetVerseRequest {
    /// Verse reference such as 'John 3:16', 'Psalm 23:1-6', or '1 John 4:7-8'.
    pub reference: String,
    /// Translation code (see bible://translations). Defaults to the server default, usually 'kjv'.
    #[serde(default)]
    pub translation: Option<String>,
}

/// Input for `get_random_verse`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RandomVerseRequest {
    /// Translation code (see bible://translations). Defaults to the server default, usually 'kjv'.
    #[serde(default)]
    pub translation: Option<String>,
}

/// A verse or verse range with its combined text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VersePassage {
    pub reference: String,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_verse: Option<u32>,
    pub translation: String,
    pub translation_name: String,
    pub text: String,
    pub verses: Vec<Verse>,
}

pub async fn get_verse(
    request: GetVerseRequest,
    client: &BibleApiClient,
    tools: &ToolsSection,
) -> Result<VersePassage, BibleApiError> {
    let reference = VerseReference::parse(&request.reference)?.require_verse(&request.reference)?;
    let translation = resolve_translation(request.translation.as_deref(), tools)?;
    reference.ensure_chapter_exists()?;
    fetch_passage(client, GET_VERSE_TOOL, &reference, translation).await
}

pub async fn get_random_verse(
    request: RandomVerseRequest,
    client: &BibleApiClient,
    tools: &ToolsSection,
) -> Result<VersePassage, BibleApiError> {
    let translation = resolve_translation(request.translation.as_deref(), tools)?;
    let raw = pick_curated_reference(&mut fastrand::Rng::new());
    let reference = VerseReference::parse(raw)?;
    fetch_passage(client, GET_RANDOM_VERSE_TOOL, &reference, translation).await
}

pub fn pick_curated_reference(rng: &mut fastrand::Rng) -> &'static str {
    CURATED_VERSES[rng.usize(..CURATED_VERSES.len())]
}

async fn fetch_passage(
    client: &BibleApiClient,
    operation: &'static str,
    reference: &VerseReference,
    translation: &Translation,
) -> Result<VersePassage, BibleApiError> {
    let requested = reference.to_string();
    let payload = client.passage(operation, &requested, translation.code).await?;

    let verses: Vec<Verse> = payload
        .verses
        .into_iter()
        .map(|verse| Verse::from_payload(verse, reference))
        .collect();
    let first = verses.first().ok_or_else(|| BibleApiError::NotFound {
        target: requested.clone(),
        message: "the Bible API returned no verses".into(),
    })?;

    let text = if verses.iter().all(|verse| verse.text.is_empty()) {
        payload.text.trim().to_string()
    } else {
        verses
            .iter()
            .map(|verse| verse.text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    };
    let reference_label = match payload.reference.trim() {
        "" => VerseReference {
            book: display_book(reference),
            ..reference.clone()
        }
        .to_string(),
        label => label.to_string(),
    };
    let translation_name = match payload.translation_name.trim() {
        "" => translation.name.to_string(),
        name => name.to_string(),
    };

    Ok(VersePassage {
        reference: reference_label,
        book: first.book.clone(),
        chapter: first.chapter,
        verse: reference.verse.unwrap_or(first.verse),
        end_verse: reference.end_verse,
        translation: translation.code.to_string(),
        translation_name,
        text,
        verses,
    })
}
