// brd-uat-server/src/uploads.rs
// ============================================================================
// Module: Supporting File Uploads
// Description: Multipart form model and upload directory storage.
// Purpose: Persist supporting documents under sanitized, timestamped names.
// Dependencies: bytes, brd-uat-core
// ============================================================================

//! ## Overview
//! A create request arrives as a multipart form. [`RequirementForm`] collects
//! the text fields and file parts; [`UploadDir`] stores accepted files as
//! `{unix}_{name}` where `name` is reduced to its final path component and
//! restricted to `[A-Za-z0-9._-]`. Stored uploads are never overwritten.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use brd_uat_core::RequirementSubmission;
use bytes::Bytes;
use tracing::warn;

use crate::exports::ExportError;
use crate::exports::create_new_under;
use crate::exports::remove_under;
use crate::exports::validate_path;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Multipart field names that carry supporting documents.
pub const UPLOAD_FIELD_NAMES: [&str; 2] = ["supportingDocs", "supportingDocs[]"];

/// Candidate names tried per upload before giving up.
const MAX_NAME_ATTEMPTS: usize = 1_000;

/// Name used when sanitizing leaves nothing behind.
const FALLBACK_FILE_NAME: &str = "upload";

// ============================================================================
// SECTION: Form Model
// ============================================================================

/// One uploaded file part.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub file_name: String,
    /// File contents.
    pub bytes: Bytes,
}

/// Multipart requirement form as received from the browser.
#[derive(Debug, Clone, Default)]
pub struct RequirementForm {
    /// `projectTitle` field.
    pub project_title: String,
    /// `requirementDesc` field.
    pub requirement_description: String,
    /// `changeRequest` field.
    pub change_request: Option<String>,
    /// `priority` field.
    pub priority: Option<String>,
    /// `deliveryDate` field.
    pub delivery_date: Option<String>,
    /// Non-empty file parts.
    pub files: Vec<UploadedFile>,
}

impl RequirementForm {
    /// Assigns a text field by its form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "projectTitle" | "project_title" => self.project_title = value,
            "requirementDesc" | "requirement_description" => self.requirement_description = value,
            "changeRequest" | "change_request" => self.change_request = Some(value),
            "priority" => self.priority = Some(value),
            "deliveryDate" | "delivery_date" => self.delivery_date = Some(value),
            _ => {}
        }
    }

    /// Adds a file part, skipping parts without a name or content.
    pub fn push_file(&mut self, file_name: &str, bytes: Bytes) {
        if file_name.trim().is_empty() || bytes.is_empty() {
            return;
        }
        self.files.push(UploadedFile {
            file_name: file_name.to_string(),
            bytes,
        });
    }

    /// Builds the submission, recording the stored names of the uploads.
    #[must_use]
    pub fn to_submission(&self, stored_names: Vec<String>) -> RequirementSubmission {
        RequirementSubmission {
            project_title: self.project_title.clone(),
            requirement_description: self.requirement_description.clone(),
            change_request: self.change_request.clone(),
            priority: self.priority.clone(),
            delivery_date: self.delivery_date.clone(),
            supporting_files: stored_names,
        }
    }
}

/// Returns true when a multipart field name carries supporting documents.
#[must_use]
pub fn is_upload_field(name: &str) -> bool {
    UPLOAD_FIELD_NAMES.contains(&name)
}

// ============================================================================
// SECTION: Upload Directory
// ============================================================================

/// Storage root for supporting documents.
#[derive(Debug, Clone)]
pub struct UploadDir {
    /// Configured root directory.
    root: PathBuf,
    /// Maximum number of files per request.
    max_files: usize,
}

impl UploadDir {
    /// Creates an upload directory handle. The directory is created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Invalid`] when the root path exceeds length limits.
    pub fn new(root: PathBuf, max_files: usize) -> Result<Self, ExportError> {
        validate_path(&root)?;
        Ok(Self {
            root,
            max_files,
        })
    }

    /// Maximum number of files accepted per request.
    #[must_use]
    pub const fn max_files(&self) -> usize {
        self.max_files
    }

    /// Writes each file under a fresh `{unix}_{sanitized}` name and returns
    /// the names in input order.
    ///
    /// An existing file is never replaced: a taken name gets a counter before
    /// its extension (`{unix}_{stem}_2.pdf`). Files written by a failed call
    /// are removed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when a write fails or no free name is found.
    pub fn store(
        &self,
        files: &[UploadedFile],
        unix_seconds: u64,
    ) -> Result<Vec<String>, ExportError> {
        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            match self.store_one(file, unix_seconds) {
                Ok(name) => stored.push(name),
                Err(err) => {
                    self.remove_all(&stored);
                    return Err(err);
                }
            }
        }
        Ok(stored)
    }

    /// Removes previously stored uploads, logging names that could not be removed.
    pub fn remove_all(&self, names: &[String]) {
        for name in names {
            if let Err(err) = remove_under(&self.root, name) {
                warn!(file = %name, error = %err, "failed to remove upload");
            }
        }
    }

    /// Writes one file under the first free candidate name.
    fn store_one(&self, file: &UploadedFile, unix_seconds: u64) -> Result<String, ExportError> {
        let base = stored_upload_name(unix_seconds, &file.file_name);
        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let candidate =
                if attempt == 1 { base.clone() } else { numbered_upload_name(&base, attempt) };
            if create_new_under(&self.root, &candidate, &file.bytes)? {
                return Ok(candidate);
            }
        }
        Err(ExportError::Io(format!("no free upload name for {base}")))
    }
}

// ============================================================================
// SECTION: Naming
// ============================================================================

/// Builds the stored name `{unix}_{sanitized}` for an uploaded file.
#[must_use]
pub fn stored_upload_name(unix_seconds: u64, original: &str) -> String {
    format!("{unix_seconds}_{}", sanitize_file_name(original))
}

/// Inserts `_{counter}` before the extension of a stored name.
#[must_use]
pub fn numbered_upload_name(name: &str, counter: usize) -> String {
    match name.rfind('.') {
        Some(index) if index > 0 => {
            format!("{}_{counter}{}", &name[..index], &name[index..])
        }
        _ => format!("{name}_{counter}"),
    }
}

/// Reduces a client file name to a safe final component.
#[must_use]
pub fn sanitize_file_name(original: &str) -> String {
    let last = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') { ch } else { '_' })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|ch| ch == '.') {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::RequirementForm;
    use super::is_upload_field;
    use super::numbered_upload_name;
    use super::sanitize_file_name;
    use super::stored_upload_name;

    #[test]
    fn sanitize_keeps_final_component() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\spec v2.pdf"), "spec_v2.pdf");
        assert_eq!(sanitize_file_name("résumé.docx"), "r_sum_.docx");
    }

    #[test]
    fn sanitize_never_returns_dot_names() {
        assert_eq!(sanitize_file_name(".."), "upload");
        assert_eq!(sanitize_file_name("dir/"), "upload");
    }

    #[test]
    fn stored_name_is_prefixed_with_timestamp() {
        assert_eq!(stored_upload_name(42, "notes.txt"), "42_notes.txt");
    }

    #[test]
    fn counter_goes_before_the_extension() {
        assert_eq!(numbered_upload_name("42_spec.v2.pdf", 2), "42_spec.v2_2.pdf");
        assert_eq!(numbered_upload_name("42_README", 3), "42_README_3");
    }

    #[test]
    fn empty_parts_are_skipped() {
        let mut form = RequirementForm::default();
        form.push_file("", Bytes::from_static(b"data"));
        form.push_file("empty.txt", Bytes::new());
        form.push_file("kept.txt", Bytes::from_static(b"data"));
        assert_eq!(form.files.len(), 1);
        assert_eq!(form.files[0].file_name, "kept.txt");
    }

    #[test]
    fn both_upload_field_spellings_are_accepted() {
        assert!(is_upload_field("supportingDocs"));
        assert!(is_upload_field("supportingDocs[]"));
        assert!(!is_upload_field("projectTitle"));
    }
}
