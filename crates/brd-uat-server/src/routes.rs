// brd-uat-server/src/routes.rs
// ============================================================================
// Module: HTTP Routes
// Description: Axum router, handlers, and request audit middleware.
// Purpose: Expose the requirement service as a JSON API.
// Dependencies: axum, tower-http, serde, tracing
// ============================================================================

//! ## Overview
//! Every API response is a JSON envelope carrying `success`. Each API path is
//! also reachable under its legacy `.php` alias. Unknown `/api/*` paths answer
//! with a JSON 404 that echoes the path; other unknown paths get an HTML 404.
//!
//! Handlers are thin: they decode the request, call [`RequirementService`] on
//! a blocking context, and shape the response.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::extract::multipart::Multipart;
use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::BytesRejection;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header;
use axum::middleware::Next;
use axum::middleware::from_fn_with_state;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use brd_uat_core::Requirement;
use brd_uat_core::RequirementId;
use brd_uat_core::TestCase;
use brd_uat_core::TestCaseSummary;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::audit::AuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::RequestAuditEvent;
use crate::audit::RequestAuditEventParams;
use crate::error::ApiError;
use crate::service::BrdFiles;
use crate::service::HTML_CONTENT_TYPE;
use crate::service::RequirementService;
use crate::service::parse_requirement_id;
use crate::uploads::RequirementForm;
use crate::uploads::is_upload_field;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default request body limit (20 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// HTML body for unknown non-API paths.
const NOT_FOUND_PAGE: &str = "<h1>404 - Page Not Found</h1>";

// ============================================================================
// SECTION: Server State
// ============================================================================

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct ServerState {
    /// Requirement operations.
    service: RequirementService,
    /// Request audit sink.
    audit: Arc<dyn AuditSink>,
    /// HTML file served at `/`.
    index_path: Option<PathBuf>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

impl ServerState {
    /// Creates state with a no-op audit sink and the default body limit.
    #[must_use]
    pub fn new(service: RequirementService) -> Self {
        Self {
            service,
            audit: Arc::new(NoopAuditSink),
            index_path: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Sets the HTML file served at `/`.
    #[must_use]
    pub fn with_index_path(mut self, index_path: Option<PathBuf>) -> Self {
        self.index_path = index_path;
        self
    }

    /// Sets the request body limit.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Builds the application router.
pub fn build_router(state: ServerState) -> Router {
    let max_body_bytes = state.max_body_bytes;
    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/health", get(health))
        .route("/api/requirements", get(list_requirements).post(create_requirement))
        .route("/api/requirements.php", get(list_requirements).post(create_requirement))
        .route("/api/requirements/{id}", get(get_requirement).delete(delete_requirement))
        .route("/api/requirements/{id}/status", put(update_status))
        .route("/api/requirements/{id}/test_cases", get(list_test_cases))
        .route("/api/generate_brd", post(generate_brd))
        .route("/api/generate_brd.php", post(generate_brd))
        .route("/api/generate_uat", post(generate_uat))
        .route("/api/generate_uat.php", post(generate_uat))
        .route("/api/download", get(download))
        .route("/api/download.php", get(download))
        .fallback(fallback)
        .layer(from_fn_with_state(state.clone(), audit_requests))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy: any origin, the API methods, and the form headers.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// ============================================================================
// SECTION: Response Bodies
// ============================================================================

/// Generated file names returned by a create request.
#[derive(Debug, Serialize)]
struct CreatedDocuments {
    /// BRD document file.
    brd_docx: String,
    /// BRD print file.
    brd_pdf: String,
    /// UAT CSV file.
    uat_xlsx: String,
    /// UAT report file.
    uat_report: String,
}

/// `POST /api/requirements` response.
#[derive(Debug, Serialize)]
struct CreateResponse {
    /// Always true.
    success: bool,
    /// Human-readable message.
    message: &'static str,
    /// New requirement identifier.
    requirement_id: RequirementId,
    /// Generated files.
    documents: CreatedDocuments,
    /// Normalized project title.
    project_title: String,
    /// Numbered BRD sections.
    brd_sections: usize,
    /// Generated UAT cases.
    uat_cases: usize,
}

/// `GET /api/requirements` response.
#[derive(Debug, Serialize)]
struct ListResponse {
    /// Always true.
    success: bool,
    /// Requirements, newest first.
    documents: Vec<Requirement>,
}

/// `GET /api/requirements/{id}` response.
#[derive(Debug, Serialize)]
struct DocumentResponse {
    /// Always true.
    success: bool,
    /// Requested requirement.
    document: Requirement,
}

/// Plain success acknowledgement.
#[derive(Debug, Serialize)]
struct MessageResponse {
    /// Always true.
    success: bool,
    /// Human-readable message.
    message: &'static str,
}

/// `PUT /api/requirements/{id}/status` response.
#[derive(Debug, Serialize)]
struct StatusResponse {
    /// Always true.
    success: bool,
    /// Human-readable message.
    message: &'static str,
    /// Applied status label.
    status: &'static str,
}

/// `GET /api/requirements/{id}/test_cases` response.
#[derive(Debug, Serialize)]
struct TestCasesResponse {
    /// Always true.
    success: bool,
    /// Requirement identifier.
    requirement_id: RequirementId,
    /// Case tallies.
    summary: TestCaseSummary,
    /// Persisted cases in catalog order.
    test_cases: Vec<TestCase>,
}

/// `POST /api/generate_brd` response.
#[derive(Debug, Serialize)]
struct BrdResponse {
    /// Always true.
    success: bool,
    /// Human-readable message.
    message: &'static str,
    /// Written files.
    files: BrdFiles,
    /// Numbered BRD sections.
    brd_sections: usize,
}

/// `POST /api/generate_uat` response.
#[derive(Debug, Serialize)]
struct UatResponse {
    /// Always true.
    success: bool,
    /// Human-readable message.
    message: &'static str,
    /// CSV file name.
    file: String,
    /// Report file name.
    report: String,
    /// Generated UAT cases.
    uat_cases: usize,
}

/// `GET /health` response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    /// `ok` or `unavailable`.
    status: &'static str,
    /// Failure detail when unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Unknown API path response.
#[derive(Debug, Serialize)]
struct EndpointNotFound {
    /// Always false.
    success: bool,
    /// Fixed message.
    message: &'static str,
    /// Requested path without the leading slash.
    path: String,
}

// ============================================================================
// SECTION: Request Bodies
// ============================================================================

/// Body of the generate endpoints.
#[derive(Debug, Deserialize)]
struct GenerateRequest {
    /// Requirement identifier as a number or numeric string.
    #[serde(default)]
    requirement_id: Option<Value>,
}

/// Body of the status endpoint.
#[derive(Debug, Deserialize)]
struct StatusRequest {
    /// New status label.
    #[serde(default)]
    status: Option<String>,
}

/// Download query parameters.
#[derive(Debug, Deserialize)]
struct DownloadQuery {
    /// Requirement identifier.
    id: Option<String>,
    /// `brd` or `uat`.
    #[serde(rename = "type")]
    kind: Option<String>,
    /// Requested format.
    format: Option<String>,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Serves the configured index page.
async fn index(State(state): State<ServerState>) -> Response {
    let Some(path) = state.index_path.as_ref() else {
        return not_found_page();
    };
    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], bytes).into_response(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "index page unavailable");
            not_found_page()
        }
    }
}

/// Reports store readiness.
async fn health(State(state): State<ServerState>) -> Response {
    match run_blocking(|| state.service.readiness()) {
        Ok(()) => Json(HealthResponse {
            status: "ok",
            message: None,
        })
        .into_response(),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                message: Some(err.to_string()),
            }),
        )
            .into_response(),
    }
}

/// Lists every requirement.
async fn list_requirements(State(state): State<ServerState>) -> Result<Response, ApiError> {
    let documents = run_blocking(|| state.service.list())?;
    Ok(Json(ListResponse {
        success: true,
        documents,
    })
    .into_response())
}

/// Creates a requirement from a multipart form and generates its documents.
async fn create_requirement(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let form = read_form(multipart).await?;
    let created = run_blocking(|| state.service.create(&form))?;
    let id = created.requirement.id;
    let body = CreateResponse {
        success: true,
        message: "Documents generated successfully",
        requirement_id: id,
        documents: CreatedDocuments {
            brd_docx: created.brd.files.docx,
            brd_pdf: created.brd.files.pdf,
            uat_xlsx: created.uat.csv,
            uat_report: created.uat.report,
        },
        project_title: created.requirement.details.project_title,
        brd_sections: created.brd.sections,
        uat_cases: created.uat.cases,
    };
    Ok(scoped(id, Json(body)))
}

/// Loads one requirement.
async fn get_requirement(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_requirement_id(&raw_id)?;
    let result = run_blocking(|| state.service.get(id)).map(|document| {
        Json(DocumentResponse {
            success: true,
            document,
        })
    });
    Ok(scoped(id, result))
}

/// Deletes one requirement.
async fn delete_requirement(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_requirement_id(&raw_id)?;
    let result = run_blocking(|| state.service.delete(id)).map(|()| {
        Json(MessageResponse {
            success: true,
            message: "Requirement deleted successfully",
        })
    });
    Ok(scoped(id, result))
}

/// Updates the lifecycle status of one requirement.
async fn update_status(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let id = parse_requirement_id(&raw_id)?;
    let request: StatusRequest = decode_json(body)?;
    let label = request
        .status
        .filter(|label| !label.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Status is required".to_string()))?;
    let result = run_blocking(|| state.service.set_status(id, &label)).map(|status| {
        Json(StatusResponse {
            success: true,
            message: "Status updated successfully",
            status: status.label(),
        })
    });
    Ok(scoped(id, result))
}

/// Lists the persisted UAT cases of one requirement.
async fn list_test_cases(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_requirement_id(&raw_id)?;
    let result = run_blocking(|| state.service.test_cases(id)).map(|test_cases| {
        Json(TestCasesResponse {
            success: true,
            requirement_id: id,
            summary: TestCaseSummary::from_cases(&test_cases),
            test_cases,
        })
    });
    Ok(scoped(id, result))
}

/// Regenerates the BRD of a stored requirement.
async fn generate_brd(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let request: GenerateRequest = decode_json(body)?;
    let id = requirement_id_from(request.requirement_id.as_ref())?;
    let result = run_blocking(|| state.service.generate_brd(id)).map(|brd| {
        Json(BrdResponse {
            success: true,
            message: "BRD generated successfully",
            files: brd.files,
            brd_sections: brd.sections,
        })
    });
    Ok(scoped(id, result))
}

/// Regenerates the UAT files of a stored requirement.
async fn generate_uat(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let request: GenerateRequest = decode_json(body)?;
    let id = requirement_id_from(request.requirement_id.as_ref())?;
    let result = run_blocking(|| state.service.generate_uat(id)).map(|uat| {
        Json(UatResponse {
            success: true,
            message: "UAT test cases generated successfully",
            file: uat.csv,
            report: uat.report,
            uat_cases: uat.cases,
        })
    });
    Ok(scoped(id, result))
}

/// Streams a generated file as an attachment.
async fn download(
    State(state): State<ServerState>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    let result = run_blocking(|| {
        state.service.download(query.id.as_deref(), query.kind.as_deref(), query.format.as_deref())
    })
    .map(|file| {
        let disposition = format!("attachment; filename=\"{}\"", file.file_name);
        (
            [
                (header::CONTENT_TYPE, file.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
                (header::CACHE_CONTROL, "no-cache, must-revalidate".to_string()),
            ],
            file.bytes,
        )
    });
    match query.id.as_deref().and_then(RequirementId::parse) {
        Some(id) => scoped(id, result),
        None => result.into_response(),
    }
}

/// Answers unknown paths.
async fn fallback(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path == "api" || path.starts_with("api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(EndpointNotFound {
                success: false,
                message: "API endpoint not found",
                path: path.to_string(),
            }),
        )
            .into_response();
    }
    not_found_page()
}

// ============================================================================
// SECTION: Audit Middleware
// ============================================================================

/// Response extension naming the requirement a request touched.
#[derive(Debug, Clone, Copy)]
struct RequirementScope(RequirementId);

/// Records one audit event per API request.
async fn audit_requests(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !path.starts_with("/api") {
        return next.run(request).await;
    }
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(path, |matched| matched.as_str().to_string());
    let response = next.run(request).await;
    let requirement_id =
        response.extensions().get::<RequirementScope>().map(|scope| scope.0.get());
    state.audit.record(&RequestAuditEvent::new(RequestAuditEventParams {
        method,
        route,
        status: response.status().as_u16(),
        requirement_id,
    }));
    response
}

/// Tags a response with the requirement it concerns.
fn scoped(id: RequirementId, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response.extensions_mut().insert(RequirementScope(id));
    response
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Runs a blocking service call, shifting to a blocking context when available.
fn run_blocking<T>(task: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(task)
        }
        _ => task(),
    }
}

/// Collects the multipart form, buffering file parts in memory.
async fn read_form(mut multipart: Multipart) -> Result<RequirementForm, ApiError> {
    let mut form = RequirementForm::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if is_upload_field(&name) {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            form.push_file(&file_name, bytes);
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.set_field(&name, value);
        }
    }
    Ok(form)
}

/// Maps multipart stream failures, preserving the body-limit status.
fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Request body too large".to_string())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// Decodes a JSON request body.
fn decode_json<T: for<'de> Deserialize<'de>>(
    body: Result<Bytes, BytesRejection>,
) -> Result<T, ApiError> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge("Request body too large".to_string())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::BadRequest(format!("Invalid JSON body: {err}")))
}

/// Reads a requirement id given as a JSON number or numeric string.
fn requirement_id_from(value: Option<&Value>) -> Result<RequirementId, ApiError> {
    match value {
        None | Some(Value::Null) => {
            Err(ApiError::BadRequest("Requirement ID is required".to_string()))
        }
        Some(Value::Number(number)) => number
            .as_i64()
            .and_then(RequirementId::new)
            .ok_or_else(|| ApiError::BadRequest(format!("invalid requirement id: {number}"))),
        Some(Value::String(text)) => parse_requirement_id(text),
        Some(other) => Err(ApiError::BadRequest(format!("invalid requirement id: {other}"))),
    }
}

/// HTML 404 page.
fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}
