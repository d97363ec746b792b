//! HTTP client for the upstream Bible content API.
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::Instrument;

use super::SEARCH_VERSES_TOOL;
use crate::{
    lib::{errors::BibleApiError, telemetry::UpstreamSpan},
    server::config::UpstreamSection,
};

const ERROR_EXCERPT_LIMIT: usize = 200;

/// Passage body returned for verse, range, and chapter lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct PassagePayload {
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub verses: Vec<VersePayload>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub translation_name: String,
}

/// One verse as the upstream API reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct VersePayload {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub book_name: Option<String>,
    #[serde(default)]
    pub chapter: Option<u32>,
    #[serde(default)]
    pub verse: Option<u32>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchPayload {
    List(Vec<VersePayload>),
    Wrapped { verses: Vec<VersePayload> },
}

/// Thin wrapper around `reqwest::Client` bound to one base URL.
#[derive(Debug, Clone)]
pub struct BibleApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
    timeout_secs: u64,
}

impl BibleApiClient {
    pub fn new(config: &UpstreamSection) -> Result<Self, BibleApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|err| BibleApiError::ClientBuild {
                message: err.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// `GET {base}/{reference}?translation={code}`.
    pub async fn passage(
        &self,
        operation: &'static str,
        reference: &str,
        translation: &str,
    ) -> Result<PassagePayload, BibleApiError> {
        let url = self.endpoint(&[reference])?;
        let body = self
            .get_json(operation, url, &[("translation", translation.to_string())], reference)
            .await?;
        serde_json::from_value(body).map_err(|err| BibleApiError::Decode {
            message: err.to_string(),
        })
    }

    /// `GET {base}/search/{query}?translation={code}&limit={n}`.
    pub async fn search(
        &self,
        query: &str,
        translation: &str,
        limit: u32,
    ) -> Result<Vec<VersePayload>, BibleApiError> {
        let url = self.endpoint(&["search", query])?;
        let body = self
            .get_json(
                SEARCH_VERSES_TOOL,
                url,
                &[
                    ("translation", translation.to_string()),
                    ("limit", limit.to_string()),
                ],
                query,
            )
            .await?;
        let payload: SearchPayload =
            serde_json::from_value(body).map_err(|err| BibleApiError::Decode {
                message: err.to_string(),
            })?;
        Ok(match payload {
            SearchPayload::List(verses) | SearchPayload::Wrapped { verses } => verses,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BibleApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| BibleApiError::ClientBuild {
                    message: format!("base URL {} cannot carry a path", self.base_url),
                })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn get_json(
        &self,
        operation: &'static str,
        url: Url,
        query: &[(&str, String)],
        target: &str,
    ) -> Result<Value, BibleApiError> {
        let upstream_span = UpstreamSpan::start(operation, url.path());
        let span = upstream_span.span().clone();

        let mut request = self.http.get(url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().instrument(span.clone()).await {
            Ok(response) => response,
            Err(err) => {
                let outcome = if err.is_timeout() { "timeout" } else { "transport" };
                upstream_span.finish(outcome, None);
                return Err(self.classify_send_error(err));
            }
        };

        let status = response.status();
        let body = match response.text().instrument(span).await {
            Ok(body) => body,
            Err(err) => {
                upstream_span.finish("transport", Some(status.as_u16()));
                return Err(self.classify_send_error(err));
            }
        };

        match interpret_response(status, &body, target) {
            Ok(value) => {
                upstream_span.finish("ok", Some(status.as_u16()));
                Ok(value)
            }
            Err(err) => {
                let outcome = match &err {
                    BibleApiError::NotFound { .. } => "not_found",
                    BibleApiError::Decode { .. } => "decode",
                    _ => "status",
                };
                upstream_span.finish(outcome, Some(status.as_u16()));
                Err(err)
            }
        }
    }

    fn classify_send_error(&self, err: reqwest::Error) -> BibleApiError {
        if err.is_timeout() {
            BibleApiError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            BibleApiError::from(err)
        }
    }
}

/// Map an upstream status and body onto the gateway's error kinds.
fn interpret_response(status: StatusCode, body: &str, target: &str) -> Result<Value, BibleApiError> {
    let parsed = serde_json::from_str::<Value>(body);
    let upstream_error = parsed
        .as_ref()
        .ok()
        .and_then(|value| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string);

    if status == StatusCode::NOT_FOUND {
        return Err(BibleApiError::NotFound {
            target: target.to_string(),
            message: upstream_error.unwrap_or_else(|| "not found".into()),
        });
    }
    if !status.is_success() {
        return Err(BibleApiError::UpstreamStatus {
            status: status.as_u16(),
            message: upstream_error.unwrap_or_else(|| excerpt(body)),
        });
    }
    if let Some(message) = upstream_error {
        return Err(BibleApiError::NotFound {
            target: target.to_string(),
            message,
        });
    }
    parsed.map_err(|err| BibleApiError::Decode {
        message: err.to_string(),
    })
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= ERROR_EXCERPT_LIMIT {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(ERROR_EXCERPT_LIMIT).collect();
    cut.push('…');
    cut
}
