// brd-uat-core/src/model/mod.rs
// ============================================================================
// Module: BRD & UAT Core Types
// Description: Requirement records, identifiers, and calendar helpers.
// Purpose: Group the domain model consumed by renderers and stores.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Domain model for requirement submissions. Submissions arrive as raw form
//! fields ([`RequirementSubmission`]), are validated into [`NewRequirement`],
//! and are persisted as [`Requirement`] records.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identifiers;
pub mod requirement;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::RequirementId;
pub use requirement::FileUpdate;
pub use requirement::GeneratedFiles;
pub use requirement::MAX_SUPPORTING_FILES;
pub use requirement::MAX_TEXT_BYTES;
pub use requirement::MAX_TITLE_CHARS;
pub use requirement::NewRequirement;
pub use requirement::Priority;
pub use requirement::Requirement;
pub use requirement::RequirementStatus;
pub use requirement::RequirementSubmission;
pub use requirement::ValidationError;
