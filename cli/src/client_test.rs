use super::*;
use crate::test_helpers::{client_for, spawn_stub};
use previews::RenderStatus;
use serde_json::json;

#[test]
fn endpoint_is_joined_onto_api_base() {
    let client = client_for("http://example.test/api", None);
    assert_eq!(client.endpoint(), "http://example.test/api/templating_preview/");
}

#[test]
fn invalid_token_is_rejected_at_build_time() {
    let config = ClientConfig::new("http://example.test/api/", Some("bad\ntoken".to_owned()), Default::default());
    let err = PreviewClient::new(&config).expect_err("newline in header must fail");
    assert!(matches!(err, ClientError::InvalidHeader(_)));
}

#[tokio::test]
async fn list_previewable_documents_maps_pairs_in_order() {
    let (base, _recorded) = spawn_stub().await;
    let client = client_for(&base, None);

    let docs = client.list_previewable_documents().await.expect("list should succeed");
    assert_eq!(
        docs,
        vec![
            PreviewableDocument { id: 1, title: "TestTitle".to_owned() },
            PreviewableDocument { id: 2, title: "Second".to_owned() },
        ]
    );
}

#[tokio::test]
async fn request_preview_sends_doc_id_only_when_selected() {
    let (base, recorded) = spawn_stub().await;
    let client = client_for(&base, None);

    client.request_preview("{{ title }}", Some(5), true).await.expect("with doc");
    client.request_preview("{{ title }}", None, true).await.expect("without doc");

    let bodies = recorded.bodies();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], json!({"template": "{{ title }}", "doc_id": 5, "remove_new_lines": true}));
    assert_eq!(bodies[1], json!({"template": "{{ title }}", "remove_new_lines": true}));
}

#[tokio::test]
async fn request_preview_returns_result_as_received() {
    let (base, _recorded) = spawn_stub().await;
    let client = client_for(&base, None);

    let result = client.request_preview("{{title}}", Some(1), true).await.expect("render");
    assert_eq!(result.status, RenderStatus::Ok);
    assert_eq!(result.preview.as_deref(), Some("{{TITLE}}"));
    assert_eq!(result.input.as_deref(), Some("{{title}}"));
    assert_eq!(result.doc_id, Some(1));
}

#[tokio::test]
async fn failed_render_is_not_an_error() {
    let (base, _recorded) = spawn_stub().await;
    let client = client_for(&base, None);

    let result = client.request_preview("{{ broken", None, true).await.expect("FAILED is Ok");
    assert_eq!(result.status, RenderStatus::Failed);
    assert_eq!(result.errors, vec!["bad token".to_owned()]);
}

#[tokio::test]
async fn unknown_document_surfaces_detail_message() {
    let (base, _recorded) = spawn_stub().await;
    let client = client_for(&base, None);

    let err = client.request_preview("{{title}}", Some(99), true).await.expect_err("404");
    match err {
        ClientError::Preview(PreviewError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Document (id=99) for preview does not exists!");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn token_is_sent_as_authorization_header() {
    let (base, recorded) = spawn_stub().await;
    let client = client_for(&base, Some("secret"));

    client.list_previewable_documents().await.expect("list");
    client.request_preview("x", None, true).await.expect("render");

    assert_eq!(
        recorded.auth_headers(),
        vec![Some("Token secret".to_owned()), Some("Token secret".to_owned())]
    );
}

#[tokio::test]
async fn connection_refused_is_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = client_for(&format!("http://{addr}/api/"), None);
    let err = client.list_previewable_documents().await.expect_err("nothing listening");
    assert!(matches!(err, ClientError::Http(_)));
}
