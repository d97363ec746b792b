//! Static catalog resources served under the `bible://` scheme.

pub mod books;
pub mod translations;

use rmcp::model::{AnnotateAble, RawResource, Resource};
use serde::Serialize;
use thiserror::Error;

pub use books::{find_book, Book, Testament, BOOKS};
pub use translations::{find_translation, Translation, TRANSLATIONS};

pub const BOOKS_URI: &str = "bible://books";
pub const TRANSLATIONS_URI: &str = "bible://translations";
pub const CATALOG_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown resource URI `{uri}`")]
    UnknownUri { uri: String },
    #[error("Failed to serialize catalog {uri}: {source}")]
    Serialize {
        uri: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize)]
struct BooksDocument<'a> {
    count: usize,
    books: &'a [Book],
}

#[derive(Debug, Serialize)]
struct TranslationsDocument<'a> {
    count: usize,
    translations: &'a [Translation],
    note: &'static str,
}

/// Resources advertised by `resources/list`.
pub fn list_catalog_resources() -> Vec<Resource> {
    vec![
        catalog_resource(
            BOOKS_URI,
            "bible_books",
            "All 66 books of the Bible with abbreviations, testament, and chapter counts",
        ),
        catalog_resource(
            TRANSLATIONS_URI,
            "bible_translations",
            "Translation codes accepted by the lookup tools",
        ),
    ]
}

/// Render the JSON document behind a catalog URI.
pub fn read_catalog(uri: &str) -> Result<String, CatalogError> {
    let rendered = match uri {
        BOOKS_URI => serde_json::to_string_pretty(&BooksDocument {
            count: BOOKS.len(),
            books: &BOOKS,
        }),
        TRANSLATIONS_URI => serde_json::to_string_pretty(&TranslationsDocument {
            count: TRANSLATIONS.len(),
            translations: &TRANSLATIONS,
            note: "Pass the code (e.g. `kjv`) as the translation argument of any tool.",
        }),
        other => {
            return Err(CatalogError::UnknownUri {
                uri: other.to_string(),
            })
        }
    };
    rendered.map_err(|source| CatalogError::Serialize {
        uri: uri.to_string(),
        source,
    })
}

fn catalog_resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut raw = RawResource::new(uri, name.to_string());
    raw.description = Some(description.to_string());
    raw.mime_type = Some(CATALOG_MIME_TYPE.to_string());
    raw.no_annotation()
}
