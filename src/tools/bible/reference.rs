use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    lib::errors::BibleApiError,
    resources::{find_book, Book},
};

const MAX_REFERENCE_LEN: usize = 128;

static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<book>(?:[1-3]|I{1,3})?\s*[A-Za-z][A-Za-z .']*?)\s*(?P<chapter>\d{1,3})(?:\s*:\s*(?P<verse>\d{1,3})(?:\s*-\s*(?P<end>\d{1,3}))?)?$",
    )
    .expect("reference pattern compiles")
});

/// Parsed `Book Chapter[:Verse[-EndVerse]]` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseReference {
    pub book: String,
    pub chapter: u32,
    pub verse: Option<u32>,
    pub end_verse: Option<u32>,
}

impl VerseReference {
    pub fn parse(raw: &str) -> Result<Self, BibleApiError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid(raw, "reference is required"));
        }
        if trimmed.chars().count() > MAX_REFERENCE_LEN {
            return Err(invalid(
                raw,
                &format!("reference is longer than {MAX_REFERENCE_LEN} characters"),
            ));
        }

        let captures = REFERENCE_PATTERN.captures(trimmed).ok_or_else(|| {
            invalid(
                raw,
                "expected `Book Chapter:Verse` such as `John 3:16` or `Psalm 23:1-6`",
            )
        })?;

        let book = collapse_whitespace(&captures["book"]);
        let chapter = parse_number(raw, &captures["chapter"])?;
        let verse = captures
            .name("verse")
            .map(|m| parse_number(raw, m.as_str()))
            .transpose()?;
        let end_verse = captures
            .name("end")
            .map(|m| parse_number(raw, m.as_str()))
            .transpose()?;

        Self::chapter_only(&book, chapter)
            .map_err(|_| invalid(raw, "chapter numbers start at 1"))?
            .with_verses(raw, verse, end_verse)
    }

    /// Build a whole-chapter reference from separate book and chapter arguments.
    pub fn chapter_only(book: &str, chapter: u32) -> Result<Self, BibleApiError> {
        let book = collapse_whitespace(book);
        if book.is_empty() {
            return Err(BibleApiError::InvalidInput {
                field: "book",
                message: "book is required".into(),
            });
        }
        if chapter == 0 {
            return Err(BibleApiError::InvalidInput {
                field: "chapter",
                message: "chapter numbers start at 1".into(),
            });
        }
        Ok(Self {
            book,
            chapter,
            verse: None,
            end_verse: None,
        })
    }

    fn with_verses(
        mut self,
        raw: &str,
        verse: Option<u32>,
        end_verse: Option<u32>,
    ) -> Result<Self, BibleApiError> {
        match (verse, end_verse) {
            (Some(0), _) => return Err(invalid(raw, "verse numbers start at 1")),
            (Some(start), Some(end)) if end < start => {
                return Err(invalid(raw, "range end precedes range start"))
            }
            (Some(start), Some(end)) if end == start => self.end_verse = None,
            (_, end) => self.end_verse = end,
        }
        self.verse = verse;
        Ok(self)
    }

    /// Reject whole-chapter references where a verse is expected.
    pub fn require_verse(self, raw: &str) -> Result<Self, BibleApiError> {
        if self.verse.is_none() {
            return Err(invalid(
                raw,
                "a verse number is required; use get_chapter for whole chapters",
            ));
        }
        Ok(self)
    }

    pub fn catalog_book(&self) -> Option<&'static Book> {
        find_book(&self.book)
    }

    /// Fail fast when the catalog knows the book and the chapter is past its end.
    pub fn ensure_chapter_exists(&self) -> Result<(), BibleApiError> {
        match self.catalog_book() {
            Some(book) if self.chapter > u32::from(book.chapters) => {
                Err(BibleApiError::NotFound {
                    target: self.to_string(),
                    message: format!("{} has {} chapters", book.name, book.chapters),
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)?;
        if let Some(verse) = self.verse {
            write!(f, ":{verse}")?;
            if let Some(end) = self.end_verse {
                write!(f, "-{end}")?;
            }
        }
        Ok(())
    }
}

fn parse_number(raw: &str, digits: &str) -> Result<u32, BibleApiError> {
    digits
        .parse::<u32>()
        .map_err(|err| invalid(raw, &format!("`{digits}` is not a number: {err}")))
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn invalid(raw: &str, reason: &str) -> BibleApiError {
    BibleApiError::InvalidReference {
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}
