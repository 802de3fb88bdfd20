// brd-uat-core/src/model/identifiers.rs
// ============================================================================
// Module: Requirement Identifiers
// Description: Strongly typed identifier for stored requirements.
// Purpose: Keep raw integers out of store and router signatures.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Requirements are keyed by a positive integer assigned by the store. The
//! wrapper rejects zero and negative values at construction so downstream code
//! never sees an impossible key.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Identifier of a stored requirement.
///
/// # Invariants
/// - The wrapped value is always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RequirementId(i64);

impl RequirementId {
    /// Creates an identifier, returning `None` for non-positive values.
    #[must_use]
    pub const fn new(value: i64) -> Option<Self> {
        if value > 0 { Some(Self(value)) } else { None }
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Parses an identifier from a decimal string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<i64>().ok().and_then(Self::new)
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for RequirementId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("requirement id must be positive, got {value}"))
    }
}

impl From<RequirementId> for i64 {
    fn from(value: RequirementId) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::RequirementId;

    #[test]
    fn rejects_non_positive_values() {
        assert!(RequirementId::new(0).is_none());
        assert!(RequirementId::new(-4).is_none());
        assert_eq!(RequirementId::new(7).map(RequirementId::get), Some(7));
    }

    #[test]
    fn parse_trims_and_rejects_garbage() {
        assert_eq!(RequirementId::parse(" 12 "), RequirementId::new(12));
        assert!(RequirementId::parse("abc").is_none());
        assert!(RequirementId::parse("").is_none());
    }
}
