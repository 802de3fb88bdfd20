// brd-uat-core/src/store.rs
// ============================================================================
// Module: In-Memory Requirement Store
// Description: Process-local requirement store and shared store wrapper.
// Purpose: Provide a deterministic store without external dependencies.
// Dependencies: crate::interfaces, crate::model, crate::render
// ============================================================================

//! ## Overview
//! [`InMemoryRequirementStore`] keeps requirements in a mutex-protected map
//! keyed by identifier. It backs tests and the `memory` store mode.
//! [`SharedRequirementStore`] wraps any backend in a clonable `Arc`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::interfaces::RequirementStore;
use crate::interfaces::StoreError;
use crate::model::FileUpdate;
use crate::model::GeneratedFiles;
use crate::model::NewRequirement;
use crate::model::Requirement;
use crate::model::RequirementId;
use crate::model::RequirementStatus;
use crate::model::time::unix_millis;
use crate::render::TestCase;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Stored entry: the record plus its test cases.
#[derive(Debug, Clone)]
struct Entry {
    /// Requirement record.
    requirement: Requirement,
    /// Generated test cases in catalog order.
    test_cases: Vec<TestCase>,
}

/// Mutable state behind the store mutex.
#[derive(Debug, Default)]
struct State {
    /// Last assigned identifier.
    last_id: i64,
    /// Entries keyed by identifier.
    entries: BTreeMap<i64, Entry>,
}

/// In-memory requirement store for tests and local runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRequirementStore {
    /// Store state protected by a mutex.
    state: Arc<Mutex<State>>,
}

impl InMemoryRequirementStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the store state.
    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Store("requirement store mutex poisoned".to_string()))
    }
}

impl RequirementStore for InMemoryRequirementStore {
    fn create(&self, requirement: &NewRequirement) -> Result<Requirement, StoreError> {
        let mut guard = self.lock()?;
        let next = guard.last_id + 1;
        let id = RequirementId::new(next)
            .ok_or_else(|| StoreError::Store("requirement id space exhausted".to_string()))?;
        let now = unix_millis();
        let record = Requirement {
            id,
            details: requirement.clone(),
            files: GeneratedFiles::default(),
            status: RequirementStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        guard.last_id = next;
        guard.entries.insert(
            next,
            Entry {
                requirement: record.clone(),
                test_cases: Vec::new(),
            },
        );
        drop(guard);
        Ok(record)
    }

    fn get(&self, id: RequirementId) -> Result<Option<Requirement>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.entries.get(&id.get()).map(|entry| entry.requirement.clone()))
    }

    fn list(&self) -> Result<Vec<Requirement>, StoreError> {
        let guard = self.lock()?;
        let mut records: Vec<Requirement> =
            guard.entries.values().map(|entry| entry.requirement.clone()).collect();
        drop(guard);
        // Identifier breaks ties between records created in the same millisecond.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    fn update_files(&self, id: RequirementId, update: &FileUpdate) -> Result<bool, StoreError> {
        if update.is_empty() {
            return Ok(false);
        }
        let mut guard = self.lock()?;
        let Some(entry) = guard.entries.get_mut(&id.get()) else {
            return Ok(false);
        };
        entry.requirement.files.apply(update);
        entry.requirement.status = RequirementStatus::Generated;
        entry.requirement.updated_at = unix_millis();
        Ok(true)
    }

    fn update_status(
        &self,
        id: RequirementId,
        status: RequirementStatus,
    ) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        let Some(entry) = guard.entries.get_mut(&id.get()) else {
            return Ok(false);
        };
        entry.requirement.status = status;
        entry.requirement.updated_at = unix_millis();
        Ok(true)
    }

    fn delete(&self, id: RequirementId) -> Result<bool, StoreError> {
        Ok(self.lock()?.entries.remove(&id.get()).is_some())
    }

    fn replace_test_cases(&self, id: RequirementId, cases: &[TestCase]) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        let entry = guard
            .entries
            .get_mut(&id.get())
            .ok_or_else(|| StoreError::Invalid(format!("requirement {id} not found")))?;
        entry.test_cases = cases.to_vec();
        Ok(())
    }

    fn test_cases(&self, id: RequirementId) -> Result<Vec<TestCase>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.entries.get(&id.get()).map(|entry| entry.test_cases.clone()).unwrap_or_default())
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared requirement store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedRequirementStore {
    /// Inner store implementation.
    inner: Arc<dyn RequirementStore + Send + Sync>,
}

impl SharedRequirementStore {
    /// Wraps a requirement store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl RequirementStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn RequirementStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl RequirementStore for SharedRequirementStore {
    fn create(&self, requirement: &NewRequirement) -> Result<Requirement, StoreError> {
        self.inner.create(requirement)
    }

    fn get(&self, id: RequirementId) -> Result<Option<Requirement>, StoreError> {
        self.inner.get(id)
    }

    fn list(&self) -> Result<Vec<Requirement>, StoreError> {
        self.inner.list()
    }

    fn update_files(&self, id: RequirementId, update: &FileUpdate) -> Result<bool, StoreError> {
        self.inner.update_files(id, update)
    }

    fn update_status(
        &self,
        id: RequirementId,
        status: RequirementStatus,
    ) -> Result<bool, StoreError> {
        self.inner.update_status(id, status)
    }

    fn delete(&self, id: RequirementId) -> Result<bool, StoreError> {
        self.inner.delete(id)
    }

    fn replace_test_cases(&self, id: RequirementId, cases: &[TestCase]) -> Result<(), StoreError> {
        self.inner.replace_test_cases(id, cases)
    }

    fn test_cases(&self, id: RequirementId) -> Result<Vec<TestCase>, StoreError> {
        self.inner.test_cases(id)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.inner.readiness()
    }
}
