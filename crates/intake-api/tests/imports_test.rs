//! Import API integration tests.
//!
//! Run with: `cargo test -p intake-api --test imports_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use futures::future::join_all;
use helpers::{file_form, server_for, setup_test_app, UnreachableStore, TEST_MAX_UPLOAD_BYTES};
use intake_api::ErrorResponse;
use intake_core::models::{ImportAcceptedResponse, ImportRecord, SubmitOutcome};
use serde_json::Value as JsonValue;
use std::future::IntoFuture;
use std::sync::Arc;

const CSV: &[u8] = b"a,b\n1,2\n";

#[tokio::test]
async fn test_submit_then_duplicate() {
    let app = setup_test_app();

    let first = app
        .server
        .post("/imports")
        .add_query_param("user_id", "u1")
        .multipart(file_form("x.csv", CSV))
        .await;
    first.assert_status(StatusCode::ACCEPTED);
    let first: ImportAcceptedResponse = first.json();
    assert_eq!(first.status, SubmitOutcome::Received);

    let again = app
        .server
        .post("/imports")
        .add_query_param("user_id", "u1")
        .multipart(file_form("x.csv", CSV))
        .await;
    again.assert_status(StatusCode::ACCEPTED);
    let again: ImportAcceptedResponse = again.json();
    assert_eq!(again.status, SubmitOutcome::Duplicate);
    assert_eq!(again.import_id, first.import_id);

    let other = app
        .server
        .post("/imports")
        .add_query_param("user_id", "u2")
        .multipart(file_form("x.csv", CSV))
        .await;
    let other: ImportAcceptedResponse = other.json();
    assert_eq!(other.status, SubmitOutcome::Received);
    assert_ne!(other.import_id, first.import_id);

    assert_eq!(app.store.len(), 2);
}

#[tokio::test]
async fn test_response_body_shape() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/imports")
        .multipart(file_form("x.csv", CSV))
        .await;
    let body: JsonValue = response.json();
    assert_eq!(body["status"], "received");
    assert!(body["import_id"].as_str().is_some());
}

#[tokio::test]
async fn test_get_import_round_trip() {
    let app = setup_test_app();

    let accepted: ImportAcceptedResponse = app
        .server
        .post("/imports")
        .add_query_param("user_id", "u1")
        .multipart(file_form("x.csv", CSV))
        .await
        .json();

    let response = app
        .server
        .get(&format!("/imports/{}", accepted.import_id))
        .await;
    response.assert_status_ok();

    let raw: JsonValue = response.json();
    let created_at = raw["created_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
    assert_eq!(raw["errors"], serde_json::json!([]));

    let record: ImportRecord = response.json();
    assert_eq!(record.id, accepted.import_id);
    assert_eq!(record.filename, "x.csv");
    assert_eq!(record.size, 8);
    assert_eq!(record.submitter_id, "u1");
    assert_eq!(raw["status"], "received");
    assert_eq!(raw["fingerprint"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_missing_or_blank_user_defaults_to_anon() {
    let app = setup_test_app();

    let absent: ImportAcceptedResponse = app
        .server
        .post("/imports")
        .multipart(file_form("x.csv", CSV))
        .await
        .json();

    let blank: ImportAcceptedResponse = app
        .server
        .post("/imports")
        .add_query_param("user_id", "")
        .multipart(file_form("x.csv", CSV))
        .await
        .json();
    assert_eq!(blank.status, SubmitOutcome::Duplicate);
    assert_eq!(blank.import_id, absent.import_id);

    let record: ImportRecord = app
        .server
        .get(&format!("/imports/{}", absent.import_id))
        .await
        .json();
    assert_eq!(record.submitter_id, "anon");
}

#[tokio::test]
async fn test_user_id_with_nul_is_400() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/imports")
        .add_query_param("user_id", "u\01")
        .multipart(file_form("x.csv", CSV))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "INVALID_INPUT");
    assert!(!body.recoverable);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_non_canonical_id_is_404() {
    let app = setup_test_app();

    let accepted: ImportAcceptedResponse = app
        .server
        .post("/imports")
        .multipart(file_form("x.csv", CSV))
        .await
        .json();

    let upper = accepted.import_id.to_string().to_uppercase();
    app.server
        .get(&format!("/imports/{}", upper))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_part_without_filename_is_recorded_as_unknown() {
    let app = setup_test_app();
    let form = MultipartForm::new().add_part("file", axum_test::multipart::Part::bytes(CSV.to_vec()));

    let accepted: ImportAcceptedResponse = app.server.post("/imports").multipart(form).await.json();
    let record: ImportRecord = app
        .server
        .get(&format!("/imports/{}", accepted.import_id))
        .await
        .json();
    assert_eq!(record.filename, "unknown");
}

#[tokio::test]
async fn test_unknown_import_is_404() {
    let app = setup_test_app();

    for id in ["nonexistent", "00000000-0000-0000-0000-000000000000"] {
        let response = app.server.get(&format!("/imports/{}", id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "not found");
        assert_eq!(body.code, "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_oversized_upload_is_413() {
    let app = setup_test_app();
    let content = vec![b'x'; TEST_MAX_UPLOAD_BYTES + 1];

    let response = app
        .server
        .post("/imports")
        .multipart(file_form("big.csv", &content))
        .await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, format!("file too large (>{} bytes)", TEST_MAX_UPLOAD_BYTES));
    assert_eq!(body.code, "PAYLOAD_TOO_LARGE");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_upload_far_beyond_limit_is_rejected() {
    let app = setup_test_app();
    let content = vec![b'x'; 256 * 1024];

    let response = app
        .server
        .post("/imports")
        .multipart(file_form("huge.csv", &content))
        .await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_upload_at_limit_is_accepted() {
    let app = setup_test_app();
    let content = vec![b'x'; TEST_MAX_UPLOAD_BYTES];

    let response = app
        .server
        .post("/imports")
        .multipart(file_form("edge.csv", &content))
        .await;
    response.assert_status(StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_missing_file_field_is_400() {
    let app = setup_test_app();
    let form = MultipartForm::new().add_text("note", "no file here");

    let response = app.server.post("/imports").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "INVALID_INPUT");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_two_file_fields_are_rejected() {
    let app = setup_test_app();
    let form = file_form("a.csv", b"one").add_part(
        "file",
        axum_test::multipart::Part::bytes(b"two".to_vec()).file_name("b.csv"),
    );

    let response = app.server.post("/imports").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_concurrent_submissions_share_one_id() {
    const CALLERS: usize = 16;
    let app = setup_test_app();

    let requests = (0..CALLERS).map(|_| {
        app.server
            .post("/imports")
            .add_query_param("user_id", "racer")
            .multipart(file_form("race.csv", CSV))
            .into_future()
    });
    let responses: Vec<ImportAcceptedResponse> = join_all(requests)
        .await
        .into_iter()
        .map(|r| r.json())
        .collect();

    let received = responses
        .iter()
        .filter(|r| r.status == SubmitOutcome::Received)
        .count();
    assert_eq!(received, 1);
    assert!(responses
        .iter()
        .all(|r| r.import_id == responses[0].import_id));
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_store_unavailable_is_503() {
    let server = server_for(Arc::new(UnreachableStore), TEST_MAX_UPLOAD_BYTES);

    let response = server
        .post("/imports")
        .multipart(file_form("x.csv", CSV))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "STORE_UNAVAILABLE");
    assert!(body.recoverable);
    assert!(body.details.is_none());
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = setup_test_app();

    let live = app.server.get("/healthz").await;
    live.assert_status_ok();
    live.assert_json(&serde_json::json!({ "ok": true }));

    let ready = app.server.get("/readyz").await;
    ready.assert_status_ok();
    let body: JsonValue = ready.json();
    assert_eq!(body["store"], "ready");

    let down = server_for(Arc::new(UnreachableStore), TEST_MAX_UPLOAD_BYTES);
    down.get("/healthz").await.assert_status_ok();
    down.get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_request_id_header() {
    let app = setup_test_app();

    let generated = app.server.get("/healthz").await;
    assert!(!generated.header("x-request-id").is_empty());

    let propagated = app
        .server
        .get("/healthz")
        .add_header("X-Request-ID", "trace-123")
        .await;
    assert_eq!(propagated.header("x-request-id"), "trace-123");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app();

    let response = app.server.get("/api/openapi.json").await;
    response.assert_status_ok();
    let spec: JsonValue = response.json();
    assert!(spec["paths"]["/imports"].is_object());
    assert!(spec["paths"]["/imports/{id}"].is_object());
}
