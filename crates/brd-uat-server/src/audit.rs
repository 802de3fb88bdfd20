// brd-uat-server/src/audit.rs
// ============================================================================
// Module: Request Audit Logging
// Description: Structured audit events for API request handling.
// Purpose: Emit one JSON line per API request without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each `/api/*` request produces a [`RequestAuditEvent`]. Sinks decide where
//! the JSON line goes: stderr, an append-only file, or nowhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// Status below 400.
    Ok,
    /// Client error (4xx).
    Rejected,
    /// Server error (5xx).
    Failed,
}

impl RequestOutcome {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        if status >= 500 {
            Self::Failed
        } else if status >= 400 {
            Self::Rejected
        } else {
            Self::Ok
        }
    }
}

/// API request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: String,
    /// Matched route template, or the raw path when unmatched.
    pub route: String,
    /// Response status code.
    pub status: u16,
    /// Requirement touched by the request, when known.
    pub requirement_id: Option<i64>,
    /// Request outcome.
    pub outcome: RequestOutcome,
}

/// Inputs required to construct a request audit event.
pub struct RequestAuditEventParams {
    /// HTTP method.
    pub method: String,
    /// Matched route template.
    pub route: String,
    /// Response status code.
    pub status: u16,
    /// Requirement touched by the request.
    pub requirement_id: Option<i64>,
}

impl RequestAuditEvent {
    /// Builds an audit event stamped with the current time.
    #[must_use]
    pub fn new(params: RequestAuditEventParams) -> Self {
        Self {
            event: "api_request",
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |duration| duration.as_millis()),
            method: params.method,
            route: params.route,
            status: params.status,
            requirement_id: params.requirement_id,
            outcome: RequestOutcome::from_status(params.status),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for API request events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &RequestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::RequestAuditEvent;
    use super::RequestAuditEventParams;
    use super::RequestOutcome;

    #[test]
    fn outcome_follows_status_class() {
        assert_eq!(RequestOutcome::from_status(200), RequestOutcome::Ok);
        assert_eq!(RequestOutcome::from_status(404), RequestOutcome::Rejected);
        assert_eq!(RequestOutcome::from_status(500), RequestOutcome::Failed);
    }

    #[test]
    fn event_serializes_as_single_json_object() {
        let event = RequestAuditEvent::new(RequestAuditEventParams {
            method: "GET".to_string(),
            route: "/api/requirements/{id}".to_string(),
            status: 404,
            requirement_id: Some(3),
        });
        let payload = serde_json::to_string(&event).unwrap_or_default();
        assert!(payload.contains("\"event\":\"api_request\""));
        assert!(payload.contains("\"outcome\":\"rejected\""));
        assert!(payload.contains("\"requirement_id\":3"));
        assert!(!payload.contains('\n'));
    }
}
