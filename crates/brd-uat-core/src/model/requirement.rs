// brd-uat-core/src/model/requirement.rs
// ============================================================================
// Module: Requirement Records
// Description: Submission validation and stored requirement records.
// Purpose: Turn untrusted form input into a normalized requirement.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! A requirement enters the system as a [`RequirementSubmission`] holding raw
//! form strings. [`RequirementSubmission::validate`] trims and checks every
//! field and produces a [`NewRequirement`]. Stores assign identifiers and
//! timestamps, yielding a [`Requirement`]. Values are stored unescaped; HTML
//! escaping happens only when rendering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::Date;

use super::identifiers::RequirementId;
use super::time::optional_iso_date;
use super::time::parse_iso_date;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum project title length in characters.
pub const MAX_TITLE_CHARS: usize = 255;
/// Maximum size of the description and change request fields in bytes.
pub const MAX_TEXT_BYTES: usize = 64 * 1024;
/// Maximum number of supporting file names attached to a requirement.
pub const MAX_SUPPORTING_FILES: usize = 32;

// ============================================================================
// SECTION: Priority
// ============================================================================

/// Requirement priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// High priority.
    High,
    /// Medium priority (default).
    #[default]
    Medium,
    /// Low priority.
    Low,
}

impl Priority {
    /// Returns the canonical label (`High`, `Medium`, `Low`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parses a priority label case-insensitively.
    #[must_use]
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Returns the CSS class used for priority highlighting.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::High => "priority-high",
            Self::Medium => "priority-medium",
            Self::Low => "priority-low",
        }
    }

    /// Returns the highlight colour for the priority.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::High => "#e74c3c",
            Self::Medium => "#f39c12",
            Self::Low => "#27ae60",
        }
    }
}

// ============================================================================
// SECTION: Status
// ============================================================================

/// Lifecycle status of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RequirementStatus {
    /// Stored, no documents generated yet.
    #[default]
    Draft,
    /// At least one document family has been generated.
    Generated,
    /// Marked complete by a reviewer.
    Completed,
}

impl RequirementStatus {
    /// Returns the canonical label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Generated => "Generated",
            Self::Completed => "Completed",
        }
    }

    /// Parses a status label case-insensitively.
    #[must_use]
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "generated" => Some(Self::Generated),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Submission validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title or description missing.
    #[error("Project title and requirement description are required")]
    MissingRequired,
    /// A text field exceeded its limit.
    #[error("{field} exceeds the maximum length of {max}")]
    TooLong {
        /// Field name.
        field: &'static str,
        /// Limit that was exceeded.
        max: usize,
    },
    /// Priority label not recognized.
    #[error("invalid priority: {0}")]
    InvalidPriority(String),
    /// Delivery date not in `YYYY-MM-DD` form.
    #[error("invalid delivery date: {0}")]
    InvalidDeliveryDate(String),
    /// Too many supporting files.
    #[error("too many supporting files (max {0})")]
    TooManyFiles(usize),
}

// ============================================================================
// SECTION: Submission
// ============================================================================

/// Raw requirement submission as received from a form or JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequirementSubmission {
    /// Project title.
    #[serde(default, alias = "projectTitle")]
    pub project_title: String,
    /// Requirement description.
    #[serde(default, alias = "requirementDesc")]
    pub requirement_description: String,
    /// Optional change request text.
    #[serde(default, alias = "changeRequest")]
    pub change_request: Option<String>,
    /// Optional priority label.
    #[serde(default)]
    pub priority: Option<String>,
    /// Optional delivery date (`YYYY-MM-DD`).
    #[serde(default, alias = "deliveryDate")]
    pub delivery_date: Option<String>,
    /// Names of stored supporting files.
    #[serde(default)]
    pub supporting_files: Vec<String>,
}

impl RequirementSubmission {
    /// Validates and normalizes the submission.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a required field is missing or a
    /// value is malformed.
    pub fn validate(self) -> Result<NewRequirement, ValidationError> {
        let project_title = self.project_title.trim().to_string();
        let requirement_description = self.requirement_description.trim().to_string();
        if project_title.is_empty() || requirement_description.is_empty() {
            return Err(ValidationError::MissingRequired);
        }
        if project_title.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::TooLong {
                field: "project_title",
                max: MAX_TITLE_CHARS,
            });
        }
        if requirement_description.len() > MAX_TEXT_BYTES {
            return Err(ValidationError::TooLong {
                field: "requirement_description",
                max: MAX_TEXT_BYTES,
            });
        }
        let change_request = non_blank(self.change_request);
        if change_request.as_ref().is_some_and(|text| text.len() > MAX_TEXT_BYTES) {
            return Err(ValidationError::TooLong {
                field: "change_request",
                max: MAX_TEXT_BYTES,
            });
        }
        let priority = match non_blank(self.priority) {
            None => Priority::default(),
            Some(label) => {
                Priority::parse_label(&label).ok_or(ValidationError::InvalidPriority(label))?
            }
        };
        let delivery_date = match non_blank(self.delivery_date) {
            None => None,
            Some(text) => {
                Some(parse_iso_date(&text).ok_or(ValidationError::InvalidDeliveryDate(text))?)
            }
        };
        if self.supporting_files.len() > MAX_SUPPORTING_FILES {
            return Err(ValidationError::TooManyFiles(MAX_SUPPORTING_FILES));
        }
        let supporting_files = self
            .supporting_files
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Ok(NewRequirement {
            project_title,
            requirement_description,
            change_request,
            priority,
            delivery_date,
            supporting_files,
        })
    }
}

/// Trims an optional string, mapping blank values to `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|text| text.trim().to_string()).filter(|text| !text.is_empty())
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Validated requirement content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRequirement {
    /// Project title.
    pub project_title: String,
    /// Requirement description.
    pub requirement_description: String,
    /// Optional change request text (never blank when present).
    pub change_request: Option<String>,
    /// Priority level.
    pub priority: Priority,
    /// Optional expected delivery date.
    #[serde(with = "optional_iso_date", default)]
    pub delivery_date: Option<Date>,
    /// Names of stored supporting files.
    #[serde(default)]
    pub supporting_files: Vec<String>,
}

impl NewRequirement {
    /// Returns true when a change request is attached.
    #[must_use]
    pub fn has_change_request(&self) -> bool {
        self.change_request.as_deref().is_some_and(|text| !text.trim().is_empty())
    }
}

/// Export file names generated for a requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFiles {
    /// BRD document file name.
    pub brd_docx_file: Option<String>,
    /// BRD print-layout file name.
    pub brd_pdf_file: Option<String>,
    /// UAT CSV file name.
    pub uat_xlsx_file: Option<String>,
    /// UAT HTML report file name.
    pub uat_report_file: Option<String>,
}

impl GeneratedFiles {
    /// Applies a partial update, overwriting only the provided names.
    pub fn apply(&mut self, update: &FileUpdate) {
        if let Some(name) = &update.brd_docx {
            self.brd_docx_file = Some(name.clone());
        }
        if let Some(name) = &update.brd_pdf {
            self.brd_pdf_file = Some(name.clone());
        }
        if let Some(name) = &update.uat_xlsx {
            self.uat_xlsx_file = Some(name.clone());
        }
        if let Some(name) = &update.uat_report {
            self.uat_report_file = Some(name.clone());
        }
    }
}

/// Partial update of generated file names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUpdate {
    /// New BRD document file name.
    pub brd_docx: Option<String>,
    /// New BRD print-layout file name.
    pub brd_pdf: Option<String>,
    /// New UAT CSV file name.
    pub uat_xlsx: Option<String>,
    /// New UAT report file name.
    pub uat_report: Option<String>,
}

impl FileUpdate {
    /// Returns true when no file name is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brd_docx.is_none()
            && self.brd_pdf.is_none()
            && self.uat_xlsx.is_none()
            && self.uat_report.is_none()
    }
}

/// Stored requirement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Store-assigned identifier.
    pub id: RequirementId,
    /// Validated requirement content.
    #[serde(flatten)]
    pub details: NewRequirement,
    /// Generated export file names.
    #[serde(flatten)]
    pub files: GeneratedFiles,
    /// Lifecycle status.
    pub status: RequirementStatus,
    /// Creation time (unix millis).
    pub created_at: i64,
    /// Last update time (unix millis).
    pub updated_at: i64,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
