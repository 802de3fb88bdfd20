// brd-uat-core/src/lib.rs
// ============================================================================
// Module: BRD & UAT Core Library
// Description: Public API surface for the BRD & UAT generator core.
// Purpose: Expose requirement types, renderers, and store interfaces.
// Dependencies: crate::{model, interfaces, render, store}
// ============================================================================

//! ## Overview
//! The core crate owns the requirement model, the business requirements
//! document (BRD) renderer, and the UAT test-case catalog with its CSV and HTML
//! renderers. Persistence is reached only through the [`RequirementStore`]
//! interface so hosts can choose a backend.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod model;
pub mod interfaces;
pub mod render;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use model::*;

pub use interfaces::RequirementStore;
pub use interfaces::StoreError;
pub use render::BrdOptions;
pub use render::BrdVariant;
pub use render::TestCase;
pub use render::TestCaseSummary;
pub use render::TestType;
pub use render::brd_section_count;
pub use render::generate_test_cases;
pub use render::render_brd;
pub use render::render_csv;
pub use render::render_uat_report;
pub use store::InMemoryRequirementStore;
pub use store::SharedRequirementStore;
