//! Bible lookup and search tools backed by the upstream content API.

pub mod chapter;
pub mod client;
pub mod errors;
pub mod reference;
pub mod search;
pub mod verse;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    lib::errors::BibleApiError,
    resources::{find_translation, Translation},
    server::config::ToolsSection,
};

pub use chapter::{get_chapter, ChapterResponse, GetChapterRequest};
pub use client::BibleApiClient;
pub use errors::api_error_to_error_data;
pub use reference::VerseReference;
pub use search::{search_verses, SearchHit, SearchVersesRequest, SearchVersesResponse};
pub use verse::{
    get_random_verse, get_verse, pick_curated_reference, GetVerseRequest, RandomVerseRequest,
    VersePassage, CURATED_VERSES,
};

pub const GET_VERSE_TOOL: &str = "get_verse";
pub const SEARCH_VERSES_TOOL: &str = "search_verses";
pub const GET_CHAPTER_TOOL: &str = "get_chapter";
pub const GET_RANDOM_VERSE_TOOL: &str = "get_random_verse";

/// A single verse in tool output.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Verse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl Verse {
    /// Fill gaps in an upstream verse from the reference that was requested.
    pub(crate) fn from_payload(payload: client::VersePayload, fallback: &VerseReference) -> Self {
        let book = payload
            .book_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| display_book(fallback));
        Self {
            book,
            chapter: payload.chapter.unwrap_or(fallback.chapter),
            verse: payload.verse.or(fallback.verse).unwrap_or_default(),
            text: payload.text.trim().to_string(),
        }
    }
}

/// Pick the caller's translation or fall back to the configured default.
pub fn resolve_translation(
    requested: Option<&str>,
    tools: &ToolsSection,
) -> Result<&'static Translation, BibleApiError> {
    let code = requested
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .unwrap_or(tools.default_translation.as_str());
    find_translation(code).ok_or_else(|| BibleApiError::UnknownTranslation {
        code: code.to_string(),
    })
}

/// Catalog spelling of the book when known, the caller's spelling otherwise.
pub(crate) fn display_book(reference: &VerseReference) -> String {
    reference
        .catalog_book()
        .map(|book| book.name.to_string())
        .unwrap_or_else(|| reference.book.clone())
}
