//! Shared wire model for the templating preview endpoint.
//!
//! This crate owns the request/response shapes used by both `client` and
//! `cli`, the mapping from the backend's tuple-encoded document list into
//! typed records, and the [`panel`] state machine that decides when a
//! template change turns into a render request.

pub mod panel;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Path of the preview endpoint, relative to the API base URL.
pub const TEMPLATING_PREVIEW_PATH: &str = "templating_preview/";

/// Error returned when a preview response cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The response body did not match the expected JSON shape.
    #[error("failed to decode preview response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The backend answered with a non-success HTTP status.
    #[error("preview request failed ({status}): {message}")]
    Api { status: u16, message: String },
}

/// A sample document that can serve as render context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewableDocument {
    /// Backend primary key of the document.
    pub id: i64,
    /// Document title as shown in the selector.
    pub title: String,
}

/// Body of `POST templating_preview/`.
///
/// Build it with [`RenderRequest::new`]; the value is immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc_id: Option<i64>,
    remove_new_lines: bool,
}

impl RenderRequest {
    /// Build a render request. `doc_id` is left out of the wire body when
    /// `None`, which the backend treats as "render against placeholder values".
    #[must_use]
    pub fn new(template: impl Into<String>, doc_id: Option<i64>, remove_new_lines: bool) -> Self {
        Self {
            template: template.into(),
            doc_id,
            remove_new_lines,
        }
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn doc_id(&self) -> Option<i64> {
        self.doc_id
    }

    #[must_use]
    pub fn remove_new_lines(&self) -> bool {
        self.remove_new_lines
    }

    /// Serialize into the JSON value sent on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Decode`] if serialization fails.
    pub fn to_json(&self) -> Result<Value, PreviewError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Outcome reported by the templating engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FAILED")]
    Failed,
}

/// Response of `POST templating_preview/`, kept exactly as received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    #[serde(rename = "result")]
    pub status: RenderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_i64_from_number"
    )]
    pub doc_id: Option<i64>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl RenderResult {
    /// `true` when the engine reported `OK` and produced no error strings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.status == RenderStatus::Ok && self.errors.is_empty()
    }
}

/// Wire shape of `GET templating_preview/`.
#[derive(Debug, Deserialize)]
struct DocsForPreviewResponse {
    #[serde(rename = "DocsForPreview")]
    docs: Vec<DocPair>,
}

#[derive(Debug, Deserialize)]
struct DocPair(#[serde(deserialize_with = "deserialize_i64_from_number")] i64, String);

/// Decode a document list response into typed records, preserving order.
///
/// # Errors
///
/// Returns [`PreviewError::Decode`] when the body is not
/// `{"DocsForPreview": [[id, title], ...]}`.
pub fn parse_documents(body: &str) -> Result<Vec<PreviewableDocument>, PreviewError> {
    let response: DocsForPreviewResponse = serde_json::from_str(body)?;
    Ok(documents_from_response(response))
}

/// Same as [`parse_documents`] for an already-parsed JSON value.
///
/// # Errors
///
/// Returns [`PreviewError::Decode`] on shape mismatch.
pub fn documents_from_value(value: Value) -> Result<Vec<PreviewableDocument>, PreviewError> {
    let response: DocsForPreviewResponse = serde_json::from_value(value)?;
    Ok(documents_from_response(response))
}

fn documents_from_response(response: DocsForPreviewResponse) -> Vec<PreviewableDocument> {
    response
        .docs
        .into_iter()
        .map(|DocPair(id, title)| PreviewableDocument { id, title })
        .collect()
}

/// Decode a render response body.
///
/// # Errors
///
/// Returns [`PreviewError::Decode`] when the body is not a render result.
pub fn parse_render_result(body: &str) -> Result<RenderResult, PreviewError> {
    Ok(serde_json::from_str(body)?)
}

/// Join an API base URL and the preview path.
#[must_use]
pub fn preview_endpoint(api_base: &str) -> String {
    format!("{}/{TEMPLATING_PREVIEW_PATH}", api_base.trim_end_matches('/'))
}

/// Turn a non-success response body into a one-line message.
///
/// Understands `{"detail": "..."}` and field-error maps such as
/// `{"template": ["This field is required."]}`; anything else is returned
/// trimmed, or as the bare status when empty.
#[must_use]
pub fn describe_error_body(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) else {
        if trimmed.is_empty() {
            return format!("HTTP {status}");
        }
        return trimmed.to_owned();
    };

    if let Some(detail) = map.get("detail").and_then(Value::as_str) {
        return detail.to_owned();
    }

    let mut parts = Vec::with_capacity(map.len());
    for (field, value) in &map {
        let text = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map_or_else(|| item.to_string(), ToOwned::to_owned))
                .collect::<Vec<_>>()
                .join(" "),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        parts.push(format!("{field}: {text}"));
    }
    if parts.is_empty() {
        return format!("HTTP {status}");
    }
    parts.join("; ")
}

/// Build the error for a non-success response.
#[must_use]
pub fn api_error(status: u16, body: &str) -> PreviewError {
    PreviewError::Api {
        status,
        message: describe_error_body(status, body),
    }
}

fn deserialize_optional_i64_from_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    integer_from_value(value).map(Some).map_err(D::Error::custom)
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    integer_from_value(value).map_err(D::Error::custom)
}

fn integer_from_value(value: Value) -> Result<i64, &'static str> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err("expected integer-compatible number")
        }
        _ => Err("expected number"),
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
