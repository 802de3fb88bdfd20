// brd-uat-core/src/interfaces/mod.rs
// ============================================================================
// Module: BRD & UAT Interfaces
// Description: Backend-agnostic persistence interface for requirements.
// Purpose: Decouple the server from concrete storage engines.
// Dependencies: crate::model, crate::render, thiserror
// ============================================================================

//! ## Overview
//! Requirement persistence is expressed as the [`RequirementStore`] trait.
//! Implementations must be deterministic about ordering and must fail closed
//! when stored data cannot be decoded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::model::FileUpdate;
use crate::model::NewRequirement;
use crate::model::Requirement;
use crate::model::RequirementId;
use crate::model::RequirementStatus;
use crate::render::TestCase;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Requirement store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("requirement store io error: {0}")]
    Io(String),
    /// Stored data is corrupted or cannot be decoded.
    #[error("requirement store corruption: {0}")]
    Corrupt(String),
    /// Stored schema version is incompatible.
    #[error("requirement store version mismatch: {0}")]
    VersionMismatch(String),
    /// Input rejected by the store.
    #[error("requirement store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("requirement store error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Requirement Store
// ============================================================================

/// Persistence for requirement records and their generated test cases.
pub trait RequirementStore {
    /// Persists a new requirement in `Draft` status.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn create(&self, requirement: &NewRequirement) -> Result<Requirement, StoreError>;

    /// Loads a requirement by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn get(&self, id: RequirementId) -> Result<Option<Requirement>, StoreError>;

    /// Lists all requirements, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn list(&self) -> Result<Vec<Requirement>, StoreError>;

    /// Records generated file names and moves the requirement to `Generated`.
    ///
    /// Returns `false` when the update is empty or the requirement is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn update_files(&self, id: RequirementId, update: &FileUpdate) -> Result<bool, StoreError>;

    /// Sets the lifecycle status. Returns `false` when the requirement is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn update_status(
        &self,
        id: RequirementId,
        status: RequirementStatus,
    ) -> Result<bool, StoreError>;

    /// Deletes a requirement and its test cases. Returns `false` when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete(&self, id: RequirementId) -> Result<bool, StoreError>;

    /// Replaces the stored test cases of a requirement.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the requirement is missing or the write fails.
    fn replace_test_cases(&self, id: RequirementId, cases: &[TestCase]) -> Result<(), StoreError>;

    /// Loads the stored test cases of a requirement in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn test_cases(&self, id: RequirementId) -> Result<Vec<TestCase>, StoreError>;

    /// Verifies the store can serve requests.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
