// brd-uat-server/src/exports.rs
// ============================================================================
// Module: Export Directory
// Description: Filesystem storage for generated BRD and UAT files.
// Purpose: Write and read export files without escaping the export root.
// Dependencies: std::fs, thiserror
// ============================================================================

//! ## Overview
//! Generated documents live under a single export root. Writes and reads take
//! a bare file name, resolve it against the canonical root, and reject
//! absolute paths or `..` components before touching the disk.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use brd_uat_core::RequirementId;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum length of a configured directory path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of one path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Export and upload file errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Path rejected before any filesystem access.
    #[error("invalid export path: {0}")]
    Invalid(String),
    /// File absent on disk.
    #[error("export file not found: {0}")]
    NotFound(String),
    /// Filesystem failure.
    #[error("export io error: {0}")]
    Io(String),
}

// ============================================================================
// SECTION: File Names
// ============================================================================

/// Names of the files produced by one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNames {
    /// BRD document (`BRD_{id}_{unix}.html`).
    pub brd_document: String,
    /// BRD print layout (`BRD_{id}_{unix}.pdf.html`).
    pub brd_print: String,
    /// UAT CSV (`UAT_TestCases_{id}_{unix}.csv`).
    pub uat_csv: String,
    /// UAT HTML report (`UAT_Report_{id}_{unix}.html`).
    pub uat_report: String,
}

impl ExportNames {
    /// Builds the export names for a requirement at a unix timestamp.
    #[must_use]
    pub fn new(id: RequirementId, unix_seconds: u64) -> Self {
        Self {
            brd_document: format!("BRD_{id}_{unix_seconds}.html"),
            brd_print: format!("BRD_{id}_{unix_seconds}.pdf.html"),
            uat_csv: format!("UAT_TestCases_{id}_{unix_seconds}.csv"),
            uat_report: format!("UAT_Report_{id}_{unix_seconds}.html"),
        }
    }
}

// ============================================================================
// SECTION: Export Directory
// ============================================================================

/// Export root for generated documents.
#[derive(Debug, Clone)]
pub struct ExportDir {
    /// Configured root directory.
    root: PathBuf,
}

impl ExportDir {
    /// Creates an export directory handle. The directory is created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Invalid`] when the root path exceeds length limits.
    pub fn new(root: PathBuf) -> Result<Self, ExportError> {
        validate_path(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Returns the configured root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` to `name` under the export root, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the name is unsafe or the write fails.
    pub fn write(&self, name: &str, bytes: &[u8]) -> Result<(), ExportError> {
        write_under(&self.root, name, bytes)
    }

    /// Reads `name` from the export root.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotFound`] when the file is absent and
    /// [`ExportError::Invalid`] when the name escapes the root.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, ExportError> {
        if !self.root.is_dir() {
            return Err(ExportError::NotFound(name.to_string()));
        }
        let path = resolve_path(&self.root, name)?;
        if !path.is_file() {
            return Err(ExportError::NotFound(name.to_string()));
        }
        fs::read(&path).map_err(|err| ExportError::Io(err.to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Creates `root` when needed and writes `bytes` to `name` beneath it.
fn write_under(root: &Path, name: &str, bytes: &[u8]) -> Result<(), ExportError> {
    ensure_relative_path(Path::new(name))?;
    fs::create_dir_all(root)
        .map_err(|err| ExportError::Io(format!("unable to create directory: {err}")))?;
    let path = resolve_path(root, name)?;
    fs::write(&path, bytes).map_err(|err| ExportError::Io(format!("unable to write {name}: {err}")))
}

/// Creates `root` when needed and writes `bytes` to a new file `name`.
///
/// Returns `Ok(false)` without touching the disk when `name` already exists.
pub(crate) fn create_new_under(
    root: &Path,
    name: &str,
    bytes: &[u8],
) -> Result<bool, ExportError> {
    ensure_relative_path(Path::new(name))?;
    fs::create_dir_all(root)
        .map_err(|err| ExportError::Io(format!("unable to create directory: {err}")))?;
    let path = resolve_path(root, name)?;
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(ExportError::Io(format!("unable to create {name}: {err}"))),
    };
    if let Err(err) = file.write_all(bytes) {
        drop(file);
        let _ = fs::remove_file(&path);
        return Err(ExportError::Io(format!("unable to write {name}: {err}")));
    }
    Ok(true)
}

/// Removes `name` beneath `root`.
pub(crate) fn remove_under(root: &Path, name: &str) -> Result<(), ExportError> {
    let path = resolve_path(root, name)?;
    fs::remove_file(&path).map_err(|err| ExportError::Io(format!("unable to remove {name}: {err}")))
}

/// Resolves a relative file name against a canonical root.
fn resolve_path(root: &Path, relative: &str) -> Result<PathBuf, ExportError> {
    let candidate = PathBuf::from(relative);
    ensure_relative_path(&candidate)?;
    let root = root
        .canonicalize()
        .map_err(|err| ExportError::Io(format!("unable to resolve export root: {err}")))?;
    let joined = root.join(&candidate);
    let parent = joined
        .parent()
        .ok_or_else(|| ExportError::Invalid("export path missing parent".to_string()))?;
    let parent = parent
        .canonicalize()
        .map_err(|_| ExportError::NotFound(relative.to_string()))?;
    if !parent.starts_with(&root) {
        return Err(ExportError::Invalid("export path escapes export root".to_string()));
    }
    let file_name = candidate
        .file_name()
        .ok_or_else(|| ExportError::Invalid("export path missing filename".to_string()))?;
    Ok(parent.join(file_name))
}

/// Validates a directory path against length constraints.
pub(crate) fn validate_path(path: &Path) -> Result<(), ExportError> {
    if path.as_os_str().is_empty() {
        return Err(ExportError::Invalid("directory path is empty".to_string()));
    }
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ExportError::Invalid("directory path exceeds limit".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ExportError::Invalid("directory path component too long".to_string()));
        }
    }
    Ok(())
}

/// Rejects absolute paths and parent-directory components.
fn ensure_relative_path(candidate: &Path) -> Result<(), ExportError> {
    if candidate.as_os_str().is_empty() {
        return Err(ExportError::Invalid("empty file name".to_string()));
    }
    if candidate.is_absolute() {
        return Err(ExportError::Invalid("absolute export path not allowed".to_string()));
    }
    for component in candidate.components() {
        match component {
            Component::ParentDir => {
                return Err(ExportError::Invalid("export path escapes export root".to_string()));
            }
            Component::Prefix(_) | Component::RootDir => {
                return Err(ExportError::Invalid("absolute export path not allowed".to_string()));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
