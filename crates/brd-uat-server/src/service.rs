// brd-uat-server/src/service.rs
// ============================================================================
// Module: Requirement Service
// Description: Request-level operations over the store and export files.
// Purpose: Keep HTTP handlers thin by owning the create/generate/download flow.
// Dependencies: brd-uat-core, tracing
// ============================================================================

//! ## Overview
//! [`RequirementService`] is the single entry point the HTTP layer calls. It
//! is synchronous: handlers move calls onto a blocking context because the
//! store backends perform blocking I/O.
//!
//! A create request validates the form before any upload touches the disk,
//! then stores the record, generates both document families, and records the
//! generated file names.

// ============================================================================
// SECTION: Imports
// ============================================================================

use brd_uat_core::BrdOptions;
use brd_uat_core::BrdVariant;
use brd_uat_core::FileUpdate;
use brd_uat_core::GeneratedFiles;
use brd_uat_core::Requirement;
use brd_uat_core::RequirementId;
use brd_uat_core::RequirementStatus;
use brd_uat_core::RequirementStore;
use brd_uat_core::SharedRequirementStore;
use brd_uat_core::TestCase;
use brd_uat_core::brd_section_count;
use brd_uat_core::generate_test_cases;
use brd_uat_core::model::time::today_utc;
use brd_uat_core::model::time::unix_seconds;
use brd_uat_core::render_brd;
use brd_uat_core::render_csv;
use brd_uat_core::render_uat_report;
use serde::Serialize;
use tracing::info;
use tracing::warn;

use crate::error::ApiError;
use crate::exports::ExportDir;
use crate::exports::ExportNames;
use crate::uploads::RequirementForm;
use crate::uploads::UploadDir;
use crate::uploads::stored_upload_name;

// ============================================================================
// SECTION: Content Types
// ============================================================================

/// Content type of generated HTML files.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
/// Content type of generated CSV files.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

// ============================================================================
// SECTION: Results
// ============================================================================

/// BRD files written by one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrdFiles {
    /// Document layout file name.
    pub docx: String,
    /// Print layout file name.
    pub pdf: String,
}

/// Outcome of a BRD generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrdGeneration {
    /// Written files.
    pub files: BrdFiles,
    /// Number of numbered sections in the document.
    pub sections: usize,
}

/// Outcome of a UAT generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UatGeneration {
    /// CSV file name.
    pub csv: String,
    /// HTML report file name.
    pub report: String,
    /// Number of generated test cases.
    pub cases: usize,
}

/// Outcome of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRequirement {
    /// Stored record, including generated file names.
    pub requirement: Requirement,
    /// BRD generation outcome.
    pub brd: BrdGeneration,
    /// UAT generation outcome.
    pub uat: UatGeneration,
}

/// File selected for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Stored file name, used for the attachment name.
    pub file_name: String,
    /// Content type of the stored bytes.
    pub content_type: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Requirement operations shared by every HTTP handler.
#[derive(Clone)]
pub struct RequirementService {
    /// Requirement store.
    store: SharedRequirementStore,
    /// Export root for generated files.
    exports: ExportDir,
    /// Upload root for supporting documents.
    uploads: UploadDir,
}

impl RequirementService {
    /// Creates a service over a store and its file roots.
    #[must_use]
    pub const fn new(store: SharedRequirementStore, exports: ExportDir, uploads: UploadDir) -> Self {
        Self {
            store,
            exports,
            uploads,
        }
    }

    /// Checks store readiness.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] when the store is unavailable.
    pub fn readiness(&self) -> Result<(), ApiError> {
        self.store.readiness().map_err(ApiError::from)
    }

    /// Validates a form, stores its uploads and record, and generates documents.
    ///
    /// A failure after the record is created deletes the record and the
    /// uploads written for it before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] for invalid input and
    /// [`ApiError::Internal`] for store or filesystem failures.
    pub fn create(&self, form: &RequirementForm) -> Result<CreatedRequirement, ApiError> {
        if form.files.len() > self.uploads.max_files() {
            return Err(ApiError::BadRequest(format!(
                "too many supporting files (max {})",
                self.uploads.max_files()
            )));
        }
        let unix = unix_seconds();
        let provisional: Vec<String> =
            form.files.iter().map(|file| stored_upload_name(unix, &file.file_name)).collect();
        let mut details = form.to_submission(provisional).validate()?;
        let stored_names = self.uploads.store(&form.files, unix)?;
        details.supporting_files.clone_from(&stored_names);
        let requirement = match self.store.create(&details) {
            Ok(requirement) => requirement,
            Err(err) => {
                self.uploads.remove_all(&stored_names);
                return Err(err.into());
            }
        };
        let created = match self.generate_for_new(&requirement, unix) {
            Ok(created) => created,
            Err(err) => {
                self.rollback_create(requirement.id, &stored_names);
                return Err(err);
            }
        };
        info!(
            requirement_id = %requirement.id,
            uploads = stored_names.len(),
            "requirement created"
        );
        Ok(created)
    }

    /// Lists every requirement, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] when the store fails.
    pub fn list(&self) -> Result<Vec<Requirement>, ApiError> {
        Ok(self.store.list()?)
    }

    /// Loads one requirement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the requirement is missing.
    pub fn get(&self, id: RequirementId) -> Result<Requirement, ApiError> {
        self.store.get(id)?.ok_or_else(ApiError::requirement_not_found)
    }

    /// Deletes one requirement and its test cases.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the requirement is missing.
    pub fn delete(&self, id: RequirementId) -> Result<(), ApiError> {
        if !self.store.delete(id)? {
            return Err(ApiError::requirement_not_found());
        }
        info!(requirement_id = %id, "requirement deleted");
        Ok(())
    }

    /// Sets the lifecycle status from its label.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] for unknown labels and
    /// [`ApiError::NotFound`] when the requirement is missing.
    pub fn set_status(&self, id: RequirementId, label: &str) -> Result<RequirementStatus, ApiError> {
        let status = RequirementStatus::parse_label(label)
            .ok_or_else(|| ApiError::BadRequest(format!("invalid status: {}", label.trim())))?;
        if !self.store.update_status(id, status)? {
            return Err(ApiError::requirement_not_found());
        }
        Ok(status)
    }

    /// Loads the persisted UAT cases of a requirement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the requirement is missing.
    pub fn test_cases(&self, id: RequirementId) -> Result<Vec<TestCase>, ApiError> {
        self.get(id)?;
        Ok(self.store.test_cases(id)?)
    }

    /// Regenerates the BRD files of a stored requirement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the requirement is missing.
    pub fn generate_brd(&self, id: RequirementId) -> Result<BrdGeneration, ApiError> {
        let requirement = self.get(id)?;
        let names = ExportNames::new(id, unix_seconds());
        let brd = self.write_brd(&requirement, &names)?;
        let update = FileUpdate {
            brd_docx: Some(brd.files.docx.clone()),
            brd_pdf: Some(brd.files.pdf.clone()),
            ..FileUpdate::default()
        };
        self.store.update_files(id, &update)?;
        info!(requirement_id = %id, sections = brd.sections, "brd generated");
        Ok(brd)
    }

    /// Regenerates the UAT files and test cases of a stored requirement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the requirement is missing.
    pub fn generate_uat(&self, id: RequirementId) -> Result<UatGeneration, ApiError> {
        let requirement = self.get(id)?;
        let names = ExportNames::new(id, unix_seconds());
        let uat = self.write_uat(&requirement, &names)?;
        let update = FileUpdate {
            uat_xlsx: Some(uat.csv.clone()),
            uat_report: Some(uat.report.clone()),
            ..FileUpdate::default()
        };
        self.store.update_files(id, &update)?;
        info!(requirement_id = %id, cases = uat.cases, "uat generated");
        Ok(uat)
    }

    /// Resolves and reads a generated file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] when a parameter is missing and
    /// [`ApiError::NotFound`] when the record, mapping, or file is absent.
    pub fn download(
        &self,
        id: Option<&str>,
        kind: Option<&str>,
        format: Option<&str>,
    ) -> Result<Download, ApiError> {
        let (Some(id), Some(kind), Some(format)) = (present(id), present(kind), present(format))
        else {
            return Err(ApiError::BadRequest(
                "Missing required parameters: id, type, format".to_string(),
            ));
        };
        let id = parse_requirement_id(id)?;
        let requirement = self.get(id)?;
        let (file_name, content_type) = select_download(&requirement.files, kind, format)
            .ok_or_else(|| {
                ApiError::NotFound("File not found for the specified type and format".to_string())
            })?;
        let bytes = self.exports.read(file_name)?;
        Ok(Download {
            file_name: file_name.to_string(),
            content_type,
            bytes,
        })
    }

    /// Generates both document families for a freshly created record.
    fn generate_for_new(
        &self,
        requirement: &Requirement,
        unix: u64,
    ) -> Result<CreatedRequirement, ApiError> {
        let names = ExportNames::new(requirement.id, unix);
        let brd = self.write_brd(requirement, &names)?;
        let uat = self.write_uat(requirement, &names)?;
        let update = FileUpdate {
            brd_docx: Some(brd.files.docx.clone()),
            brd_pdf: Some(brd.files.pdf.clone()),
            uat_xlsx: Some(uat.csv.clone()),
            uat_report: Some(uat.report.clone()),
        };
        self.store.update_files(requirement.id, &update)?;
        Ok(CreatedRequirement {
            requirement: self.get(requirement.id)?,
            brd,
            uat,
        })
    }

    /// Deletes a partially created record and its uploads.
    fn rollback_create(&self, id: RequirementId, uploads: &[String]) {
        if let Err(err) = self.store.delete(id) {
            warn!(requirement_id = %id, error = %err, "failed to roll back requirement");
        }
        self.uploads.remove_all(uploads);
    }

    /// Renders and writes both BRD layouts.
    fn write_brd(
        &self,
        requirement: &Requirement,
        names: &ExportNames,
    ) -> Result<BrdGeneration, ApiError> {
        let generated_on = today_utc();
        for (name, variant) in
            [(&names.brd_document, BrdVariant::Document), (&names.brd_print, BrdVariant::Print)]
        {
            let html = render_brd(&requirement.details, requirement.status, &BrdOptions {
                generated_on,
                variant,
            });
            self.exports.write(name, html.as_bytes())?;
        }
        Ok(BrdGeneration {
            files: BrdFiles {
                docx: names.brd_document.clone(),
                pdf: names.brd_print.clone(),
            },
            sections: brd_section_count(&requirement.details),
        })
    }

    /// Generates the UAT catalog, persists it, and writes the CSV and report.
    fn write_uat(
        &self,
        requirement: &Requirement,
        names: &ExportNames,
    ) -> Result<UatGeneration, ApiError> {
        let details = &requirement.details;
        let cases = generate_test_cases(details.priority, details.has_change_request());
        self.store.replace_test_cases(requirement.id, &cases)?;
        self.exports.write(&names.uat_csv, render_csv(&cases).as_bytes())?;
        let report =
            render_uat_report(&details.project_title, details.priority, &cases, today_utc());
        self.exports.write(&names.uat_report, report.as_bytes())?;
        Ok(UatGeneration {
            csv: names.uat_csv.clone(),
            report: names.uat_report.clone(),
            cases: cases.len(),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a requirement identifier supplied by a client.
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] when the value is not a positive integer.
pub fn parse_requirement_id(value: &str) -> Result<RequirementId, ApiError> {
    RequirementId::parse(value)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid requirement id: {}", value.trim())))
}

/// Maps a download type and format onto a stored file and its content type.
#[must_use]
pub fn select_download<'a>(
    files: &'a GeneratedFiles,
    kind: &str,
    format: &str,
) -> Option<(&'a str, &'static str)> {
    let (file, content_type) = match (
        kind.trim().to_ascii_lowercase().as_str(),
        format.trim().to_ascii_lowercase().as_str(),
    ) {
        ("brd", "docx" | "html") => (&files.brd_docx_file, HTML_CONTENT_TYPE),
        ("brd", "pdf") => (&files.brd_pdf_file, HTML_CONTENT_TYPE),
        ("uat", "xlsx" | "csv") => (&files.uat_xlsx_file, CSV_CONTENT_TYPE),
        ("uat", "html") => (&files.uat_report_file, HTML_CONTENT_TYPE),
        _ => return None,
    };
    file.as_deref().filter(|name| !name.is_empty()).map(|name| (name, content_type))
}

/// Treats blank query values as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use brd_uat_core::GeneratedFiles;

    use super::CSV_CONTENT_TYPE;
    use super::HTML_CONTENT_TYPE;
    use super::select_download;

    fn files() -> GeneratedFiles {
        GeneratedFiles {
            brd_docx_file: Some("BRD_1_10.html".to_string()),
            brd_pdf_file: Some("BRD_1_10.pdf.html".to_string()),
            uat_xlsx_file: Some("UAT_TestCases_1_10.csv".to_string()),
            uat_report_file: None,
        }
    }

    #[test]
    fn format_aliases_map_to_the_same_file() {
        let files = files();
        assert_eq!(select_download(&files, "brd", "docx"), select_download(&files, "brd", "html"));
        assert_eq!(
            select_download(&files, "uat", "XLSX"),
            Some(("UAT_TestCases_1_10.csv", CSV_CONTENT_TYPE))
        );
        assert_eq!(
            select_download(&files, "brd", "pdf"),
            Some(("BRD_1_10.pdf.html", HTML_CONTENT_TYPE))
        );
    }

    #[test]
    fn unknown_or_missing_files_map_to_none() {
        let files = files();
        assert_eq!(select_download(&files, "uat", "html"), None);
        assert_eq!(select_download(&files, "brd", "xlsx"), None);
        assert_eq!(select_download(&files, "report", "pdf"), None);
    }
}
