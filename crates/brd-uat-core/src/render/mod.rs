// brd-uat-core/src/render/mod.rs
// ============================================================================
// Module: Document Renderers
// Description: BRD HTML, UAT CSV, and UAT HTML report rendering.
// Purpose: Map a requirement onto its generated artifacts.
// Dependencies: crate::model
// ============================================================================

//! ## Overview
//! Renderers are pure functions of their inputs: they never touch the
//! filesystem or the clock. Hosts decide where the output is written.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod brd;
pub mod html;
pub mod report;
pub mod uat;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use brd::BrdOptions;
pub use brd::BrdVariant;
pub use brd::brd_section_count;
pub use brd::render_brd;
pub use report::render_uat_report;
pub use uat::CSV_HEADER;
pub use uat::DEFAULT_EXECUTION_STATUS;
pub use uat::TestCase;
pub use uat::TestCaseSummary;
pub use uat::TestType;
pub use uat::generate_test_cases;
pub use uat::render_csv;
