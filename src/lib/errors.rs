use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use rmcp::model::ErrorData;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration sources.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize the merged document into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failure category surfaced to MCP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Upstream,
    Validation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Upstream => "upstream",
            ErrorKind::Validation => "validation",
        }
    }
}

/// Failures raised while serving a Bible lookup.
#[derive(Debug, Error)]
pub enum BibleApiError {
    #[error("reference `{raw}` is invalid: {reason}")]
    InvalidReference { raw: String, reason: String },
    #[error("translation `{code}` is not supported")]
    UnknownTranslation { code: String },
    #[error("`{field}` is invalid: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },
    #[error("`{target}` was not found: {message}")]
    NotFound { target: String, message: String },
    #[error("Bible API returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },
    #[error("Bible API request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
    #[error("Bible API request failed: {message}")]
    Transport { message: String },
    #[error("Bible API response could not be decoded: {message}")]
    Decode { message: String },
    #[error("HTTP client could not be built: {message}")]
    ClientBuild { message: String },
}

impl BibleApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BibleApiError::InvalidReference { .. }
            | BibleApiError::UnknownTranslation { .. }
            | BibleApiError::InvalidInput { .. } => ErrorKind::Validation,
            BibleApiError::NotFound { .. } => ErrorKind::NotFound,
            BibleApiError::UpstreamStatus { .. }
            | BibleApiError::Timeout { .. }
            | BibleApiError::Transport { .. }
            | BibleApiError::Decode { .. }
            | BibleApiError::ClientBuild { .. } => ErrorKind::Upstream,
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            BibleApiError::Timeout { .. } | BibleApiError::Transport { .. } => true,
            BibleApiError::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for BibleApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            BibleApiError::Decode {
                message: value.to_string(),
            }
        } else if let Some(status) = value.status() {
            BibleApiError::UpstreamStatus {
                status: status.as_u16(),
                message: value.to_string(),
            }
        } else {
            BibleApiError::Transport {
                message: value.to_string(),
            }
        }
    }
}

/// Structured error metadata returned by MCP tools.
#[derive(Debug, Clone, Serialize)]
pub struct ToolErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// User-facing message.
    pub message: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
}

impl ToolErrorDescriptor {
    pub const fn new(code: &'static str, message: &'static str, remediation: &'static str) -> Self {
        Self {
            code,
            message,
            remediation,
        }
    }

    pub fn builder(&self) -> ToolErrorDescriptorBuilder<'_> {
        ToolErrorDescriptorBuilder::new(self)
    }
}

/// Builder for error data that fails if required fields are missing.
pub struct ToolErrorDescriptorBuilder<'a> {
    descriptor: &'a ToolErrorDescriptor,
    retryable: Option<bool>,
    kind: Option<ErrorKind>,
    details: Option<Value>,
    extra_fields: Map<String, Value>,
}

impl<'a> ToolErrorDescriptorBuilder<'a> {
    pub fn new(descriptor: &'a ToolErrorDescriptor) -> Self {
        Self {
            descriptor,
            retryable: None,
            kind: None,
            details: None,
            extra_fields: Map::new(),
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_context_field(mut self, key: &str, value: Value) -> Self {
        self.extra_fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Result<ErrorData, ToolErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ToolErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let retryable = self
            .retryable
            .ok_or(ToolErrorBuilderError::MissingRetryable {
                code: self.descriptor.code,
            })?;
        let kind = self.kind.ok_or(ToolErrorBuilderError::MissingKind {
            code: self.descriptor.code,
        })?;

        let mut data = Map::new();
        data.insert("code".into(), Value::String(self.descriptor.code.into()));
        data.insert(
            "remediation".into(),
            Value::String(self.descriptor.remediation.into()),
        );
        data.insert("retryable".into(), Value::Bool(retryable));
        data.insert("kind".into(), Value::String(kind.as_str().into()));
        if let Some(details) = self.details {
            data.insert("details".into(), details);
        }
        for (key, value) in self.extra_fields {
            data.insert(key, value);
        }

        let data = Some(Value::Object(data));
        Ok(match kind {
            ErrorKind::Validation => ErrorData::invalid_params(self.descriptor.message, data),
            ErrorKind::NotFound => ErrorData::resource_not_found(self.descriptor.message, data),
            ErrorKind::Upstream => ErrorData::internal_error(self.descriptor.message, data),
        })
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolErrorBuilderError {
    #[error("retryable is missing (code={code})")]
    MissingRetryable { code: &'static str },
    #[error("kind is missing (code={code})")]
    MissingKind { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}
