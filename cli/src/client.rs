//! HTTP client for the templating preview endpoint.
//!
//! Both calls are single-shot: no retry, no caching. A decoded `FAILED`
//! render result is returned as `Ok`; only transport, status, and decoding
//! problems become [`ClientError`].

use std::time::Duration;

use previews::{PreviewError, PreviewableDocument, RenderRequest, RenderResult};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use crate::config::ClientConfig;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct PreviewClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PreviewClient {
    /// Build a client for the API rooted at `config.api_base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.token {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Token {token}"))?);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: previews::preview_endpoint(&config.api_base),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `GET templating_preview/`, mapped into typed documents.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an
    /// unexpected body.
    pub async fn list_previewable_documents(&self) -> Result<Vec<PreviewableDocument>, ClientError> {
        tracing::debug!(url = %self.endpoint, "listing previewable documents");
        let response = self.http.get(&self.endpoint).send().await?;
        let body = success_body(response).await?;
        let docs = previews::parse_documents(&body)?;
        tracing::debug!(count = docs.len(), "previewable documents loaded");
        Ok(docs)
    }

    /// Render `template`, optionally against document `doc_id`.
    ///
    /// # Errors
    ///
    /// See [`PreviewClient::send_render`].
    pub async fn request_preview(
        &self,
        template: &str,
        doc_id: Option<i64>,
        remove_new_lines: bool,
    ) -> Result<RenderResult, ClientError> {
        self.send_render(&RenderRequest::new(template, doc_id, remove_new_lines))
            .await
    }

    /// `POST templating_preview/` with a prepared request body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an
    /// unexpected body. A `FAILED` result is not an error.
    pub async fn send_render(&self, request: &RenderRequest) -> Result<RenderResult, ClientError> {
        tracing::debug!(url = %self.endpoint, doc_id = ?request.doc_id(), "requesting template preview");
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let body = success_body(response).await?;
        Ok(previews::parse_render_result(&body)?)
    }
}

async fn success_body(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(previews::api_error(status.as_u16(), &body).into());
    }
    Ok(body)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
