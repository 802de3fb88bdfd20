// brd-uat-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Requirement Store
// Description: Durable RequirementStore backend using SQLite.
// Purpose: Persist requirements and generated test cases across restarts.
// Dependencies: brd-uat-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`RequirementStore`] implementation.
//! Requirements live in one row each; generated UAT cases live in a child
//! table that is removed with its parent.
//!
//! [`RequirementStore`]: brd_uat_core::RequirementStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteRequirementStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
