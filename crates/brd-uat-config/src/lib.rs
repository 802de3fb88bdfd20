// brd-uat-config/src/lib.rs
// ============================================================================
// Module: BRD & UAT Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for brd-uat.toml semantics.
// Dependencies: brd-uat-core, brd-uat-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `brd-uat-config` defines the configuration model for the BRD & UAT
//! generator server. Loading is strict and fail-closed: oversized, non-UTF-8,
//! or inconsistent files are rejected before any service starts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
