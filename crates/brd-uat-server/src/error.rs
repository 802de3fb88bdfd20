// brd-uat-server/src/error.rs
// ============================================================================
// Module: API Errors
// Description: HTTP error type and JSON error envelope.
// Purpose: Map domain failures onto stable status codes.
// Dependencies: axum, brd-uat-core, serde, thiserror
// ============================================================================

//! ## Overview
//! Every failed API call answers with `{ "success": false, "message": ... }`.
//! Validation failures are 400, missing records or files 404, oversized
//! bodies 413, and store or filesystem failures 500.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use brd_uat_core::StoreError;
use brd_uat_core::ValidationError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::exports::ExportError;

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Message returned when a requirement does not exist.
pub const REQUIREMENT_NOT_FOUND: &str = "Requirement not found";

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// API request failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request input rejected.
    #[error("{0}")]
    BadRequest(String),
    /// Record or file missing.
    #[error("{0}")]
    NotFound(String),
    /// Request body over the configured limit.
    #[error("{0}")]
    PayloadTooLarge(String),
    /// Store or filesystem failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for the error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Missing requirement error.
    #[must_use]
    pub fn requirement_not_found() -> Self {
        Self::NotFound(REQUIREMENT_NOT_FOUND.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Invalid(message) => Self::BadRequest(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NotFound(_) => Self::NotFound("File does not exist on server".to_string()),
            ExportError::Invalid(message) | ExportError::Io(message) => Self::Internal(message),
        }
    }
}

// ============================================================================
// SECTION: Response Envelope
// ============================================================================

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Always false.
    success: bool,
    /// Human-readable message.
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
