//! In-process stub of the templating preview backend for client tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::client::PreviewClient;
use crate::config::{ClientConfig, Timeouts};

/// Requests observed by the stub, in arrival order.
#[derive(Clone, Default)]
pub struct Recorded {
    pub bodies: Arc<Mutex<Vec<Value>>>,
    pub auth_headers: Arc<Mutex<Vec<Option<String>>>>,
}

impl Recorded {
    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().expect("bodies lock").clone()
    }

    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.auth_headers.lock().expect("headers lock").clone()
    }

    fn record_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        self.auth_headers.lock().expect("headers lock").push(value);
    }
}

async fn list_docs(State(recorded): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    recorded.record_auth(&headers);
    Json(json!({ "DocsForPreview": [[1, "TestTitle"], [2, "Second"]] }))
}

/// Renders by upper-casing the template. Templates starting with `slow` are
/// delayed, `doc_id` 99 is unknown, and `{{ broken` yields a `FAILED` result.
async fn render(State(recorded): State<Recorded>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    recorded.record_auth(&headers);
    recorded.bodies.lock().expect("bodies lock").push(body.clone());

    let Some(template) = body.get("template").and_then(Value::as_str).map(ToOwned::to_owned) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "template": ["This field is required."] })),
        )
            .into_response();
    };

    if body.get("doc_id").and_then(Value::as_i64) == Some(99) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Document (id=99) for preview does not exists!" })),
        )
            .into_response();
    }

    if template.starts_with("slow") {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    if template.contains("{{ broken") {
        return Json(json!({ "result": "FAILED", "errors": ["bad token"] })).into_response();
    }

    Json(json!({
        "result": "OK",
        "preview": template.to_uppercase(),
        "debug_string": template.to_uppercase(),
        "input": template,
        "doc_id": body.get("doc_id"),
        "errors": [],
        "warnings": [],
    }))
    .into_response()
}

/// Start the stub on an ephemeral port and return its API base URL.
pub async fn spawn_stub() -> (String, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/templating_preview/", get(list_docs).post(render))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server failed");
    });

    (format!("http://{addr}/api/"), recorded)
}

pub fn client_for(base_url: &str, token: Option<&str>) -> PreviewClient {
    let config = ClientConfig::new(base_url, token.map(ToOwned::to_owned), Timeouts::default());
    PreviewClient::new(&config).expect("client should build")
}
