// brd-uat-server/src/lib.rs
// ============================================================================
// Module: BRD & UAT Server Library
// Description: HTTP API over the requirement store and document renderers.
// Purpose: Expose form submission, regeneration, and download endpoints.
// Dependencies: brd-uat-core, brd-uat-config, brd-uat-store-sqlite, axum
// ============================================================================

//! ## Overview
//! The server crate hosts the JSON API used by the browser front end. It owns
//! the export and upload directories, the request audit log, and the mapping
//! from domain failures onto HTTP status codes. Inputs are untrusted: file
//! names are sanitized and export reads never leave the export root.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod error;
pub mod exports;
pub mod routes;
pub mod server;
pub mod service;
pub mod uploads;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::RequestOutcome;
pub use audit::StderrAuditSink;
pub use error::ApiError;
pub use exports::ExportDir;
pub use exports::ExportError;
pub use exports::ExportNames;
pub use routes::ServerState;
pub use routes::build_router;
pub use server::BrdUatServer;
pub use server::ServerError;
pub use service::RequirementService;
pub use uploads::RequirementForm;
pub use uploads::UploadDir;
