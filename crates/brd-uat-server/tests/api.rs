// crates/brd-uat-server/tests/api.rs
// ============================================================================
// Module: HTTP API Tests
// Description: Router-level tests for the requirement JSON API.
// Purpose: Validate routes, envelopes, status mapping, and downloads.
// ============================================================================

//! ## Overview
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`:
//! - Multipart create with uploads and document generation
//! - Read, status, delete, and test-case endpoints
//! - Regeneration and download mapping
//! - Error envelopes, legacy aliases, body limits, and audit events

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header;
use brd_uat_core::InMemoryRequirementStore;
use brd_uat_core::SharedRequirementStore;
use brd_uat_server::AuditSink;
use brd_uat_server::ExportDir;
use brd_uat_server::RequestAuditEvent;
use brd_uat_server::RequirementService;
use brd_uat_server::ServerState;
use brd_uat_server::UploadDir;
use brd_uat_server::build_router;
use http_body_util::BodyExt;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use tower::ServiceExt;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const BOUNDARY: &str = "brd-uat-test-boundary";

#[derive(Default)]
struct RecordingAuditSink {
    events: Mutex<Vec<RequestAuditEvent>>,
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn service(dir: &TempDir) -> RequirementService {
    let exports = ExportDir::new(dir.path().join("exports")).unwrap();
    let uploads = UploadDir::new(dir.path().join("uploads"), 3).unwrap();
    let store = SharedRequirementStore::from_store(InMemoryRequirementStore::new());
    RequirementService::new(store, exports, uploads)
}

fn app(dir: &TempDir) -> Router {
    build_router(ServerState::new(service(dir)))
}

fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn create_request(
    path: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(fields, files)))
        .unwrap()
}

fn json_request(method: Method, path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder().method(Method::GET).uri(path).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request).await;
    let value: Value = serde_json::from_slice(&body).unwrap();
    (status, value)
}

async fn create_basic(app: &Router, title: &str) -> Value {
    let (status, body) = send_json(
        app,
        create_request(
            "/api/requirements",
            &[("projectTitle", title), ("requirementDesc", "Users can log in."), ("priority", "High")],
            &[],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

// ============================================================================
// SECTION: Create
// ============================================================================

#[tokio::test]
async fn create_generates_documents_and_reports_counts() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let body = create_basic(&app, "Portal").await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Documents generated successfully"));
    assert_eq!(body["requirement_id"], json!(1));
    assert_eq!(body["project_title"], json!("Portal"));
    assert_eq!(body["brd_sections"], json!(8));
    assert_eq!(body["uat_cases"], json!(10));
    for key in ["brd_docx", "brd_pdf", "uat_xlsx", "uat_report"] {
        let name = body["documents"][key].as_str().unwrap();
        assert!(dir.path().join("exports").join(name).is_file(), "missing {name}");
    }
    let brd_docx = body["documents"]["brd_docx"].as_str().unwrap();
    assert!(brd_docx.starts_with("BRD_1_") && brd_docx.ends_with(".html"));
    assert!(body["documents"]["brd_pdf"].as_str().unwrap().ends_with(".pdf.html"));
}

#[tokio::test]
async fn create_with_change_request_and_upload_adds_sections_and_cases() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let (status, body) = send_json(
        &app,
        create_request(
            "/api/requirements.php",
            &[
                ("projectTitle", "Billing"),
                ("requirementDesc", "Invoices are emailed."),
                ("changeRequest", "Add PDF attachments"),
                ("deliveryDate", "2026-12-31"),
            ],
            &[("supportingDocs[]", "../specs/spec v2.pdf", b"%PDF-1.4".as_slice())],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["brd_sections"], json!(10));
    assert_eq!(body["uat_cases"], json!(12));

    let uploads: Vec<String> = fs::read_dir(dir.path().join("uploads"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].ends_with("_spec_v2.pdf"), "{uploads:?}");

    let (_, document) = send_json(&app, get("/api/requirements/1")).await;
    assert_eq!(document["document"]["supporting_files"], json!(uploads));
    assert_eq!(document["document"]["delivery_date"], json!("2026-12-31"));
    assert_eq!(document["document"]["status"], json!("Generated"));
}

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let (status, body) = send_json(
        &app,
        create_request("/api/requirements", &[("projectTitle", "   ")], &[]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Project title and requirement description are required"));
    assert!(!dir.path().join("exports").exists());
}

#[tokio::test]
async fn create_rejects_too_many_uploads_before_writing() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let files = [
        ("supportingDocs", "a.txt", b"a".as_slice()),
        ("supportingDocs", "b.txt", b"b".as_slice()),
        ("supportingDocs", "c.txt", b"c".as_slice()),
        ("supportingDocs", "d.txt", b"d".as_slice()),
    ];
    let (status, body) = send_json(
        &app,
        create_request(
            "/api/requirements",
            &[("projectTitle", "T"), ("requirementDesc", "D")],
            &files,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("too many supporting files (max 3)"));
    assert!(!dir.path().join("uploads").exists());
}

#[tokio::test]
async fn create_skips_empty_file_parts() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let (status, body) = send_json(
        &app,
        create_request(
            "/api/requirements",
            &[("projectTitle", "T"), ("requirementDesc", "D")],
            &[("supportingDocs[]", "", b"".as_slice()), ("supportingDocs[]", "empty.txt", b"".as_slice())],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["brd_sections"], json!(8));
}

#[tokio::test]
async fn create_keeps_uploads_that_share_a_name() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let (status, body) = send_json(
        &app,
        create_request(
            "/api/requirements",
            &[("projectTitle", "T"), ("requirementDesc", "D")],
            &[
                ("supportingDocs[]", "notes.txt", b"FIRST".as_slice()),
                ("supportingDocs[]", "notes.txt", b"SECOND".as_slice()),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, document) = send_json(&app, get("/api/requirements/1")).await;
    let names: Vec<String> = document["document"]["supporting_files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|name| name.as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("_notes.txt"), "{names:?}");
    assert!(names[1].ends_with("_notes_2.txt"), "{names:?}");
    let contents: Vec<String> = names
        .iter()
        .map(|name| fs::read_to_string(dir.path().join("uploads").join(name)).unwrap())
        .collect();
    assert_eq!(contents, ["FIRST", "SECOND"]);

    let (status, _) = send_json(
        &app,
        create_request(
            "/api/requirements",
            &[("projectTitle", "T2"), ("requirementDesc", "D2")],
            &[("supportingDocs[]", "notes.txt", b"THIRD".as_slice())],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fs::read_dir(dir.path().join("uploads")).unwrap().count(), 3);
}

#[tokio::test]
async fn create_rolls_back_when_exports_cannot_be_written() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("exports"), b"not a directory").unwrap();
    let app = app(&dir);
    let (status, body) = send_json(
        &app,
        create_request(
            "/api/requirements",
            &[("projectTitle", "T"), ("requirementDesc", "D")],
            &[("supportingDocs[]", "notes.txt", b"data".as_slice())],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{body}");
    assert_eq!(body["success"], json!(false));

    let (status, list) = send_json(&app, get("/api/requirements")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["documents"], json!([]));
    assert_eq!(fs::read_dir(dir.path().join("uploads")).unwrap().count(), 0);
}

#[tokio::test]
async fn create_rejects_non_multipart_bodies() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let (status, body) = send_json(
        &app,
        json_request(Method::POST, "/api/requirements", &json!({"projectTitle": "T"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

// ============================================================================
// SECTION: Read, Update, Delete
// ============================================================================

#[tokio::test]
async fn list_returns_newest_first() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create_basic(&app, "First").await;
    create_basic(&app, "Second").await;

    let (status, body) = send_json(&app, get("/api/requirements")).await;
    assert_eq!(status, StatusCode::OK);
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["id"], json!(2));
    assert_eq!(documents[0]["project_title"], json!("Second"));
    assert_eq!(documents[1]["id"], json!(1));
}

#[tokio::test]
async fn get_distinguishes_missing_and_malformed_ids() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let (status, body) = send_json(&app, get("/api/requirements/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Requirement not found"));

    let (status, body) = send_json(&app, get("/api/requirements/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn status_update_round_trips() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create_basic(&app, "Portal").await;

    let (status, body) = send_json(
        &app,
        json_request(Method::PUT, "/api/requirements/1/status", &json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], json!("Completed"));

    let (_, document) = send_json(&app, get("/api/requirements/1")).await;
    assert_eq!(document["document"]["status"], json!("Completed"));

    let (status, body) = send_json(
        &app,
        json_request(Method::PUT, "/api/requirements/1/status", &json!({"status": "Archived"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("invalid status: Archived"));

    let (status, _) = send_json(
        &app,
        json_request(Method::PUT, "/api/requirements/9/status", &json!({"status": "Draft"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_requirement_and_cases() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create_basic(&app, "Portal").await;

    let request =
        Request::builder().method(Method::DELETE).uri("/api/requirements/1").body(Body::empty());
    let (status, body) = send_json(&app, request.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, _) = send_json(&app, get("/api/requirements/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send_json(&app, get("/api/requirements/1/test_cases")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cases_endpoint_returns_persisted_catalog() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create_basic(&app, "Portal").await;

    let (status, body) = send_json(&app, get("/api/requirements/1/test_cases")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["total"], json!(10));
    assert_eq!(body["summary"]["positive"], json!(5));
    assert_eq!(body["summary"]["negative"], json!(5));
    let cases = body["test_cases"].as_array().unwrap();
    assert_eq!(cases[0]["test_id"], json!("TC001"));
    assert_eq!(cases[1]["priority"], json!("High"));
}

// ============================================================================
// SECTION: Regeneration
// ============================================================================

#[tokio::test]
async fn generate_brd_accepts_numeric_and_string_ids() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create_basic(&app, "Portal").await;

    for id in [json!(1), json!("1")] {
        let (status, body) = send_json(
            &app,
            json_request(Method::POST, "/api/generate_brd", &json!({"requirement_id": id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["message"], json!("BRD generated successfully"));
        assert_eq!(body["brd_sections"], json!(8));
        let docx = body["files"]["docx"].as_str().unwrap();
        assert!(dir.path().join("exports").join(docx).is_file());
    }
}

#[tokio::test]
async fn generate_endpoints_validate_requirement_id() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let (status, body) =
        send_json(&app, json_request(Method::POST, "/api/generate_uat", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Requirement ID is required"));

    let (status, body) = send_json(
        &app,
        json_request(Method::POST, "/api/generate_brd.php", &json!({"requirement_id": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Requirement not found"));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/generate_brd")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_uat_reports_files_and_case_count() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create_basic(&app, "Portal").await;

    let (status, body) = send_json(
        &app,
        json_request(Method::POST, "/api/generate_uat.php", &json!({"requirement_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["uat_cases"], json!(10));
    assert!(body["file"].as_str().unwrap().starts_with("UAT_TestCases_1_"));
    assert!(body["report"].as_str().unwrap().starts_with("UAT_Report_1_"));
}

// ============================================================================
// SECTION: Downloads
// ============================================================================

#[tokio::test]
async fn download_serves_attachments_with_real_content_types() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let created = create_basic(&app, "Portal").await;

    let (status, headers, body) = send(&app, get("/api/download?id=1&type=brd&format=docx")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache, must-revalidate");
    let expected = format!(
        "attachment; filename=\"{}\"",
        created["documents"]["brd_docx"].as_str().unwrap()
    );
    assert_eq!(headers[header::CONTENT_DISPOSITION], expected.as_str());
    assert!(std::str::from_utf8(&body).unwrap().contains("Portal"));

    let (status, headers, body) = send(&app, get("/api/download.php?id=1&type=uat&format=csv")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert!(body.starts_with(b"Test ID,Test Scenario,"));

    let (status, _, _) = send(&app, get("/api/download?id=1&type=uat&format=html")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn download_errors_follow_lookup_order() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let created = create_basic(&app, "Portal").await;

    let (status, body) = send_json(&app, get("/api/download?id=1&type=brd")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Missing required parameters: id, type, format"));

    let (status, body) = send_json(&app, get("/api/download?id=7&type=brd&format=pdf")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Requirement not found"));

    let (status, body) = send_json(&app, get("/api/download?id=1&type=brd&format=xlsx")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("File not found for the specified type and format"));

    let pdf = created["documents"]["brd_pdf"].as_str().unwrap();
    fs::remove_file(dir.path().join("exports").join(pdf)).unwrap();
    let (status, body) = send_json(&app, get("/api/download?id=1&type=brd&format=pdf")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("File does not exist on server"));
}

// ============================================================================
// SECTION: Routing Surface
// ============================================================================

#[tokio::test]
async fn unknown_api_paths_return_json_not_found() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let (status, body) = send_json(&app, get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("API endpoint not found"));
    assert_eq!(body["path"], json!("api/nope"));

    let (status, headers, _) = send(&app, get("/missing-page")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let (status, body) = send_json(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn index_is_served_only_when_configured() {
    let dir = TempDir::new().unwrap();
    let (status, _, _) = send(&app(&dir), get("/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let index = dir.path().join("index.html");
    fs::write(&index, "<html><body>form</body></html>").unwrap();
    let app = build_router(ServerState::new(service(&dir)).with_index_path(Some(index)));
    let (status, headers, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
    assert_eq!(&body[..], b"<html><body>form</body></html>");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/requirements")
        .header(header::ORIGIN, "http://example.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let dir = TempDir::new().unwrap();
    let app = build_router(ServerState::new(service(&dir)).with_max_body_bytes(64));
    let padding = "x".repeat(256);
    let (status, body) = send_json(
        &app,
        json_request(
            Method::POST,
            "/api/generate_brd",
            &json!({"requirement_id": 1, "padding": padding}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn api_requests_are_audited() {
    let dir = TempDir::new().unwrap();
    let sink = Arc::new(RecordingAuditSink::default());
    let app = build_router(ServerState::new(service(&dir)).with_audit(sink.clone()));
    create_basic(&app, "Portal").await;
    send_json(&app, get("/api/requirements/99")).await;
    send_json(&app, get("/health")).await;

    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].method, "POST");
    assert_eq!(events[0].status, 200);
    assert_eq!(events[0].requirement_id, Some(1));
    assert_eq!(events[1].status, 404);
    assert_eq!(events[1].requirement_id, Some(99));
    drop(events);
}
