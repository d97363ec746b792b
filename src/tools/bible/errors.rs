//! Mapping from `BibleApiError` to structured MCP error data.
use rmcp::model::ErrorData;
use serde_json::json;

use crate::lib::errors::{BibleApiError, ToolErrorDescriptor};

const INVALID_REFERENCE_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "invalid_reference",
    "Verse reference could not be parsed",
    "Use the form `Book Chapter:Verse`, for example `John 3:16` or `Psalm 23:1-6`.",
);
const UNKNOWN_TRANSLATION_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "unknown_translation",
    "Translation code is not supported",
    "Read bible://translations for the supported codes, or omit translation to use the default.",
);
const INVALID_REQUEST_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "invalid_request",
    "Tool arguments are invalid",
    "Correct the field named in the error details and call the tool again.",
);
const NOT_FOUND_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "not_found",
    "Requested passage was not found",
    "Check the book name against bible://books and the chapter and verse numbers.",
);
const UPSTREAM_TIMEOUT_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "upstream_timeout",
    "Bible API did not respond in time",
    "Retry the call. Raise upstream.timeout_secs in config.toml if timeouts persist.",
);
const UPSTREAM_UNAVAILABLE_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "upstream_unavailable",
    "Bible API request failed",
    "Retry later and check network access to upstream.base_url.",
);
const UPSTREAM_BAD_RESPONSE_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "upstream_bad_response",
    "Bible API returned an unexpected response",
    "Retry later. Check that upstream.base_url points at a compatible Bible API.",
);

pub fn api_error_descriptor(error: &BibleApiError) -> &'static ToolErrorDescriptor {
    match error {
        BibleApiError::InvalidReference { .. } => &INVALID_REFERENCE_ERROR,
        BibleApiError::UnknownTranslation { .. } => &UNKNOWN_TRANSLATION_ERROR,
        BibleApiError::InvalidInput { .. } => &INVALID_REQUEST_ERROR,
        BibleApiError::NotFound { .. } => &NOT_FOUND_ERROR,
        BibleApiError::Timeout { .. } => &UPSTREAM_TIMEOUT_ERROR,
        BibleApiError::UpstreamStatus { .. }
        | BibleApiError::Transport { .. }
        | BibleApiError::ClientBuild { .. } => &UPSTREAM_UNAVAILABLE_ERROR,
        BibleApiError::Decode { .. } => &UPSTREAM_BAD_RESPONSE_ERROR,
    }
}

/// Convert a lookup failure into MCP error data.
pub fn api_error_to_error_data(error: BibleApiError) -> ErrorData {
    let descriptor = api_error_descriptor(&error);
    let mut builder = descriptor
        .builder()
        .kind(error.kind())
        .retryable(error.is_retryable())
        .details(json!({ "details": error.to_string() }));

    builder = match &error {
        BibleApiError::InvalidReference { raw, .. } => {
            builder.with_context_field("reference", json!(raw))
        }
        BibleApiError::UnknownTranslation { code } => {
            builder.with_context_field("translation", json!(code))
        }
        BibleApiError::InvalidInput { field, .. } => {
            builder.with_context_field("field", json!(field))
        }
        BibleApiError::NotFound { target, .. } => {
            builder.with_context_field("target", json!(target))
        }
        BibleApiError::UpstreamStatus { status, .. } => {
            builder.with_context_field("status", json!(status))
        }
        BibleApiError::Timeout { timeout_secs } => {
            builder.with_context_field("timeout_secs", json!(timeout_secs))
        }
        _ => builder,
    };

    builder
        .build()
        .unwrap_or_else(|err| ErrorData::internal_error(err.to_string(), None))
}
