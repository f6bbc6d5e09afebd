//! REST helpers for the templating preview endpoint.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>` with a short message. Transport and
//! decoding failures are not retried here; the component reports them to the
//! surrounding application. A `FAILED` render result is a normal `Ok`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use previews::{PreviewableDocument, RenderRequest, RenderResult};

/// API root used when the host application does not pass one.
pub const DEFAULT_API_BASE: &str = "/api/";

#[cfg(any(test, feature = "hydrate"))]
fn docs_request_failed_message(status: u16, body: &str) -> String {
    format!("loading preview documents failed: {}", previews::describe_error_body(status, body))
}

#[cfg(any(test, feature = "hydrate"))]
fn render_request_failed_message(status: u16, body: &str) -> String {
    format!("template preview failed: {}", previews::describe_error_body(status, body))
}

/// Fetch the documents usable as preview context via `GET templating_preview/`.
///
/// # Errors
///
/// Returns an error string if the request fails, the server responds with a
/// non-OK status, or the body is not a document list.
pub async fn fetch_docs_for_preview(api_base: &str) -> Result<Vec<PreviewableDocument>, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = previews::preview_endpoint(api_base);
        let resp = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(docs_request_failed_message(status, &body));
        }
        previews::parse_documents(&body).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = api_base;
        Err("not available on server".to_owned())
    }
}

/// Submit a render request via `POST templating_preview/`.
///
/// # Errors
///
/// Returns an error string if the request fails, the server responds with a
/// non-OK status, or the body is not a render result.
pub async fn request_preview(api_base: &str, request: &RenderRequest) -> Result<RenderResult, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = previews::preview_endpoint(api_base);
        let resp = gloo_net::http::Request::post(&url)
            .json(request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(render_request_failed_message(status, &body));
        }
        previews::parse_render_result(&body).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (api_base, request);
        Err("not available on server".to_owned())
    }
}
