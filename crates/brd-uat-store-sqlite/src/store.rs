// brd-uat-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Requirement Store
// Description: Durable RequirementStore backed by SQLite.
// Purpose: Persist requirement records and their UAT cases.
// Dependencies: brd-uat-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`RequirementStore`] using `SQLite`.
//! Enumerations are stored as their canonical labels and list columns as JSON
//! arrays. Loads fail closed: an unknown label or malformed JSON surfaces as
//! [`SqliteStoreError::Corrupt`] instead of a best-effort value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use brd_uat_core::FileUpdate;
use brd_uat_core::GeneratedFiles;
use brd_uat_core::NewRequirement;
use brd_uat_core::Priority;
use brd_uat_core::Requirement;
use brd_uat_core::RequirementId;
use brd_uat_core::RequirementStatus;
use brd_uat_core::RequirementStore;
use brd_uat_core::StoreError;
use brd_uat_core::TestCase;
use brd_uat_core::TestType;
use brd_uat_core::model::time::format_iso_date;
use brd_uat_core::model::time::parse_iso_date;
use brd_uat_core::model::time::unix_millis;
use brd_uat_core::render::DEFAULT_EXECUTION_STATUS;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

/// Column list shared by every requirement query.
const REQUIREMENT_COLUMNS: &str = "id, project_title, requirement_description, change_request, \
                                   priority, delivery_date, supporting_files, brd_docx_file, \
                                   brd_pdf_file, uat_xlsx_file, uat_report_file, status, \
                                   created_at, updated_at";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` requirement store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Builds a config with default pragmas for `path`.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Error messages avoid embedding requirement text.
#[derive(Debug, Error, Clone)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Stored data cannot be decoded.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store input.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Maps an engine error into the store error space.
#[allow(clippy::needless_pass_by_value, reason = "Used directly as a `map_err` callback.")]
fn db_error(err: rusqlite::Error) -> SqliteStoreError {
    SqliteStoreError::Db(err.to_string())
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed requirement store.
///
/// # Invariants
/// - Connection access is serialized through a mutex.
/// - Test cases are deleted with their requirement (`ON DELETE CASCADE`).
#[derive(Clone)]
pub struct SqliteRequirementStore {
    /// Shared connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteRequirementStore {
    /// Opens an `SQLite`-backed requirement store, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteStoreError::Io("sqlite connection mutex poisoned".to_string()))
    }

    /// Inserts a requirement row and reads it back.
    fn insert_requirement(
        &self,
        requirement: &NewRequirement,
    ) -> Result<Requirement, SqliteStoreError> {
        let supporting_files = serde_json::to_string(&requirement.supporting_files)
            .map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
        let now = unix_millis();
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO requirements (project_title, requirement_description, \
                 change_request, priority, delivery_date, supporting_files, status, created_at, \
                 updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                params![
                    requirement.project_title,
                    requirement.requirement_description,
                    requirement.change_request,
                    requirement.priority.label(),
                    requirement.delivery_date.map(format_iso_date),
                    supporting_files,
                    RequirementStatus::Draft.label(),
                    now,
                ],
            )
            .map_err(db_error)?;
        let raw_id = guard.last_insert_rowid();
        drop(guard);
        let id = RequirementId::new(raw_id)
            .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid row id {raw_id}")))?;
        Ok(Requirement {
            id,
            details: requirement.clone(),
            files: GeneratedFiles::default(),
            status: RequirementStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Loads one requirement row.
    fn load_requirement(&self, id: RequirementId) -> Result<Option<Requirement>, SqliteStoreError> {
        let guard = self.lock()?;
        let raw = guard
            .query_row(
                &format!("SELECT {REQUIREMENT_COLUMNS} FROM requirements WHERE id = ?1"),
                params![id.get()],
                RawRequirement::from_row,
            )
            .optional()
            .map_err(db_error)?;
        drop(guard);
        raw.map(RawRequirement::decode).transpose()
    }

    /// Loads all requirement rows, newest first.
    fn load_all(&self) -> Result<Vec<Requirement>, SqliteStoreError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare(&format!(
                "SELECT {REQUIREMENT_COLUMNS} FROM requirements ORDER BY created_at DESC, id DESC"
            ))
            .map_err(db_error)?;
        let rows = statement
            .query_map(params![], RawRequirement::from_row)
            .map_err(db_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error)?;
        drop(statement);
        drop(guard);
        rows.into_iter().map(RawRequirement::decode).collect()
    }

    /// Writes the provided file names and marks the requirement `Generated`.
    fn write_files(&self, id: RequirementId, update: &FileUpdate) -> Result<bool, SqliteStoreError> {
        if update.is_empty() {
            return Ok(false);
        }
        let guard = self.lock()?;
        let changed = guard
            .execute(
                "UPDATE requirements SET brd_docx_file = COALESCE(?1, brd_docx_file), \
                 brd_pdf_file = COALESCE(?2, brd_pdf_file), uat_xlsx_file = COALESCE(?3, \
                 uat_xlsx_file), uat_report_file = COALESCE(?4, uat_report_file), status = ?5, \
                 updated_at = ?6 WHERE id = ?7",
                params![
                    update.brd_docx,
                    update.brd_pdf,
                    update.uat_xlsx,
                    update.uat_report,
                    RequirementStatus::Generated.label(),
                    unix_millis(),
                    id.get(),
                ],
            )
            .map_err(db_error)?;
        Ok(changed > 0)
    }

    /// Writes the lifecycle status.
    fn write_status(
        &self,
        id: RequirementId,
        status: RequirementStatus,
    ) -> Result<bool, SqliteStoreError> {
        let guard = self.lock()?;
        let changed = guard
            .execute(
                "UPDATE requirements SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.label(), unix_millis(), id.get()],
            )
            .map_err(db_error)?;
        Ok(changed > 0)
    }

    /// Deletes a requirement row; child test cases cascade.
    fn remove(&self, id: RequirementId) -> Result<bool, SqliteStoreError> {
        let guard = self.lock()?;
        let changed = guard
            .execute("DELETE FROM requirements WHERE id = ?1", params![id.get()])
            .map_err(db_error)?;
        Ok(changed > 0)
    }

    /// Replaces all test case rows of a requirement in one transaction.
    fn write_test_cases(
        &self,
        id: RequirementId,
        cases: &[TestCase],
    ) -> Result<(), SqliteStoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(db_error)?;
        let exists: Option<i64> = tx
            .query_row("SELECT id FROM requirements WHERE id = ?1", params![id.get()], |row| {
                row.get(0)
            })
            .optional()
            .map_err(db_error)?;
        if exists.is_none() {
            return Err(SqliteStoreError::Invalid(format!("requirement {id} not found")));
        }
        tx.execute("DELETE FROM test_cases WHERE requirement_id = ?1", params![id.get()])
            .map_err(db_error)?;
        for (position, case) in cases.iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|_| SqliteStoreError::Invalid("too many test cases".to_string()))?;
            let steps = serde_json::to_string(&case.steps)
                .map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
            tx.execute(
                "INSERT INTO test_cases (requirement_id, position, test_id, scenario, test_type, \
                 steps, expected_result, priority, category, status) VALUES (?1, ?2, ?3, ?4, ?5, \
                 ?6, ?7, ?8, ?9, ?10)",
                params![
                    id.get(),
                    position,
                    case.test_id,
                    case.scenario,
                    case.test_type.label(),
                    steps,
                    case.expected_result,
                    case.priority.label(),
                    case.category,
                    DEFAULT_EXECUTION_STATUS,
                ],
            )
            .map_err(db_error)?;
        }
        tx.commit().map_err(db_error)
    }

    /// Loads test case rows in catalog order.
    fn load_test_cases(&self, id: RequirementId) -> Result<Vec<TestCase>, SqliteStoreError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare(
                "SELECT test_id, scenario, test_type, steps, expected_result, priority, category \
                 FROM test_cases WHERE requirement_id = ?1 ORDER BY position",
            )
            .map_err(db_error)?;
        let rows = statement
            .query_map(params![id.get()], RawTestCase::from_row)
            .map_err(db_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error)?;
        drop(statement);
        drop(guard);
        rows.into_iter().map(RawTestCase::decode).collect()
    }

    /// Verifies the store can execute a simple SQL statement.
    fn check_connection(&self) -> Result<(), SqliteStoreError> {
        let guard = self.lock()?;
        guard.query_row("SELECT 1", params![], |row| row.get::<_, i64>(0)).map_err(db_error)?;
        Ok(())
    }
}

impl RequirementStore for SqliteRequirementStore {
    fn create(&self, requirement: &NewRequirement) -> Result<Requirement, StoreError> {
        Ok(self.insert_requirement(requirement)?)
    }

    fn get(&self, id: RequirementId) -> Result<Option<Requirement>, StoreError> {
        Ok(self.load_requirement(id)?)
    }

    fn list(&self) -> Result<Vec<Requirement>, StoreError> {
        Ok(self.load_all()?)
    }

    fn update_files(&self, id: RequirementId, update: &FileUpdate) -> Result<bool, StoreError> {
        Ok(self.write_files(id, update)?)
    }

    fn update_status(
        &self,
        id: RequirementId,
        status: RequirementStatus,
    ) -> Result<bool, StoreError> {
        Ok(self.write_status(id, status)?)
    }

    fn delete(&self, id: RequirementId) -> Result<bool, StoreError> {
        Ok(self.remove(id)?)
    }

    fn replace_test_cases(&self, id: RequirementId, cases: &[TestCase]) -> Result<(), StoreError> {
        Ok(self.write_test_cases(id, cases)?)
    }

    fn test_cases(&self, id: RequirementId) -> Result<Vec<TestCase>, StoreError> {
        Ok(self.load_test_cases(id)?)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        Ok(self.check_connection()?)
    }
}

// ============================================================================
// SECTION: Row Decoding
// ============================================================================

/// Requirement row as stored, before label and JSON decoding.
struct RawRequirement {
    /// Row identifier.
    id: i64,
    /// Project title.
    project_title: String,
    /// Requirement description.
    requirement_description: String,
    /// Optional change request.
    change_request: Option<String>,
    /// Priority label.
    priority: String,
    /// Optional ISO delivery date.
    delivery_date: Option<String>,
    /// JSON array of supporting file names.
    supporting_files: String,
    /// Generated file names.
    files: GeneratedFiles,
    /// Status label.
    status: String,
    /// Creation time (unix millis).
    created_at: i64,
    /// Update time (unix millis).
    updated_at: i64,
}

impl RawRequirement {
    /// Reads the columns listed in [`REQUIREMENT_COLUMNS`].
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            project_title: row.get(1)?,
            requirement_description: row.get(2)?,
            change_request: row.get(3)?,
            priority: row.get(4)?,
            delivery_date: row.get(5)?,
            supporting_files: row.get(6)?,
            files: GeneratedFiles {
                brd_docx_file: row.get(7)?,
                brd_pdf_file: row.get(8)?,
                uat_xlsx_file: row.get(9)?,
                uat_report_file: row.get(10)?,
            },
            status: row.get(11)?,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }

    /// Decodes labels and JSON columns, failing closed on unknown values.
    fn decode(self) -> Result<Requirement, SqliteStoreError> {
        let id = RequirementId::new(self.id)
            .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid requirement id {}", self.id)))?;
        let priority = Priority::parse_label(&self.priority).ok_or_else(|| {
            SqliteStoreError::Corrupt(format!("requirement {id} has unknown priority"))
        })?;
        let status = RequirementStatus::parse_label(&self.status).ok_or_else(|| {
            SqliteStoreError::Corrupt(format!("requirement {id} has unknown status"))
        })?;
        let delivery_date = match self.delivery_date.as_deref() {
            None | Some("") => None,
            Some(text) => Some(parse_iso_date(text).ok_or_else(|| {
                SqliteStoreError::Corrupt(format!("requirement {id} has malformed delivery date"))
            })?),
        };
        let supporting_files: Vec<String> =
            serde_json::from_str(&self.supporting_files).map_err(|err| {
                SqliteStoreError::Corrupt(format!("requirement {id} supporting files: {err}"))
            })?;
        Ok(Requirement {
            id,
            details: NewRequirement {
                project_title: self.project_title,
                requirement_description: self.requirement_description,
                change_request: self.change_request,
                priority,
                delivery_date,
                supporting_files,
            },
            files: self.files,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Test case row as stored.
struct RawTestCase {
    /// Catalog identifier.
    test_id: String,
    /// Scenario description.
    scenario: String,
    /// Test type label.
    test_type: String,
    /// JSON array of steps.
    steps: String,
    /// Expected outcome.
    expected_result: String,
    /// Priority label.
    priority: String,
    /// Category label.
    category: String,
}

impl RawTestCase {
    /// Reads a `test_cases` row.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            test_id: row.get(0)?,
            scenario: row.get(1)?,
            test_type: row.get(2)?,
            steps: row.get(3)?,
            expected_result: row.get(4)?,
            priority: row.get(5)?,
            category: row.get(6)?,
        })
    }

    /// Decodes labels and the steps array.
    fn decode(self) -> Result<TestCase, SqliteStoreError> {
        let test_type = TestType::parse_label(&self.test_type).ok_or_else(|| {
            SqliteStoreError::Corrupt(format!("test case {} has unknown type", self.test_id))
        })?;
        let priority = Priority::parse_label(&self.priority).ok_or_else(|| {
            SqliteStoreError::Corrupt(format!("test case {} has unknown priority", self.test_id))
        })?;
        let steps: Vec<String> = serde_json::from_str(&self.steps).map_err(|err| {
            SqliteStoreError::Corrupt(format!("test case {} steps: {err}", self.test_id))
        })?;
        Ok(TestCase {
            test_id: self.test_id,
            scenario: self.scenario,
            test_type,
            steps,
            expected_result: self.expected_result,
            priority,
            category: self.category,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags).map_err(db_error)?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability and cascading deletes.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection.execute_batch("PRAGMA foreign_keys = ON;").map_err(db_error)?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(db_error)?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(db_error)?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(db_error)?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(db_error)?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(db_error)?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(db_error)?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(db_error)?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS requirements (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    project_title TEXT NOT NULL,
                    requirement_description TEXT NOT NULL,
                    change_request TEXT,
                    priority TEXT NOT NULL,
                    delivery_date TEXT,
                    supporting_files TEXT NOT NULL DEFAULT '[]',
                    brd_docx_file TEXT,
                    brd_pdf_file TEXT,
                    uat_xlsx_file TEXT,
                    uat_report_file TEXT,
                    status TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_requirements_created
                    ON requirements (created_at DESC, id DESC);
                CREATE TABLE IF NOT EXISTS test_cases (
                    requirement_id INTEGER NOT NULL,
                    position INTEGER NOT NULL,
                    test_id TEXT NOT NULL,
                    scenario TEXT NOT NULL,
                    test_type TEXT NOT NULL,
                    steps TEXT NOT NULL,
                    expected_result TEXT NOT NULL,
                    priority TEXT NOT NULL,
                    category TEXT NOT NULL,
                    status TEXT NOT NULL,
                    PRIMARY KEY (requirement_id, position),
                    FOREIGN KEY (requirement_id)
                        REFERENCES requirements(id) ON DELETE CASCADE
                );",
            )
            .map_err(db_error)?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(db_error)?;
    Ok(())
}
