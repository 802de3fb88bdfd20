// brd-uat-config/src/config.rs
// ============================================================================
// Module: BRD & UAT Configuration
// Description: Configuration loading and validation for the generator server.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: brd-uat-core, brd-uat-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section has defaults, so an empty file is a valid configuration that
//! binds to loopback and keeps requirements in memory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use brd_uat_core::MAX_SUPPORTING_FILES;
use brd_uat_store_sqlite::SqliteStoreConfig;
use brd_uat_store_sqlite::SqliteStoreMode;
use brd_uat_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "brd-uat.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "BRD_UAT_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Hard ceiling for request bodies (uploads included).
pub const MAX_BODY_BYTES_LIMIT: usize = 256 * 1024 * 1024;

/// Default bind address.
const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default export directory.
const DEFAULT_EXPORT_DIR: &str = "exports";
/// Default upload directory.
const DEFAULT_UPLOAD_DIR: &str = "uploads";

// ============================================================================
// SECTION: Config Root
// ============================================================================

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrdUatConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Requirement store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Generated document configuration.
    #[serde(default)]
    pub exports: ExportsConfig,
    /// Supporting file upload configuration.
    #[serde(default)]
    pub uploads: UploadsConfig,
    /// Request audit log configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl BrdUatConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order is the explicit `path`, then [`CONFIG_ENV_VAR`], then
    /// [`DEFAULT_CONFIG_NAME`] in the working directory. Only the last of
    /// these may be absent, in which case defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            let mut config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.store.validate()?;
        self.exports.validate()?;
        self.uploads.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (`host:port`).
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Optional HTML file served at `/`.
    #[serde(default)]
    pub index_path: Option<PathBuf>,
    /// Permit binding to non-loopback addresses.
    #[serde(default)]
    pub allow_non_loopback: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            index_path: None,
            allow_non_loopback: false,
        }
    }
}

impl ServerConfig {
    /// Parses the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid bind address: {}", self.bind)))
    }

    /// Validates server settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes > MAX_BODY_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_body_bytes exceeds limit of {MAX_BODY_BYTES_LIMIT}"
            )));
        }
        let addr = self.bind_addr()?;
        if !addr.ip().is_loopback() && !self.allow_non_loopback {
            return Err(ConfigError::Invalid(
                "non-loopback bind disallowed without server.allow_non_loopback".to_string(),
            ));
        }
        if let Some(path) = &self.index_path {
            validate_path_field("server.index_path", path)?;
        }
        Ok(())
    }
}

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Returns the default max body size (uploads included).
const fn default_max_body_bytes() -> usize {
    20 * 1024 * 1024
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Requirement store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    /// Process-local store; data is lost on restart.
    #[default]
    Memory,
    /// Durable `SQLite` store.
    Sqlite,
}

/// Requirement store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store backend type.
    #[serde(rename = "type", default)]
    pub store_type: StoreType,
    /// `SQLite` database path when using the sqlite backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_store_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` synchronous mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::default(),
            path: None,
            busy_timeout_ms: default_store_busy_timeout_ms(),
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

impl StoreConfig {
    /// Returns the `SQLite` store config when the sqlite backend is selected.
    #[must_use]
    pub fn sqlite(&self) -> Option<SqliteStoreConfig> {
        match (self.store_type, &self.path) {
            (StoreType::Sqlite, Some(path)) => Some(SqliteStoreConfig {
                path: path.clone(),
                busy_timeout_ms: self.busy_timeout_ms,
                journal_mode: self.journal_mode,
                sync_mode: self.sync_mode,
            }),
            _ => None,
        }
    }

    /// Validates store configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.store_type {
            StoreType::Memory => {
                if self.path.is_some() {
                    return Err(ConfigError::Invalid("memory store must not set path".to_string()));
                }
                Ok(())
            }
            StoreType::Sqlite => {
                let path = self.path.as_ref().ok_or_else(|| {
                    ConfigError::Invalid("sqlite store requires path".to_string())
                })?;
                validate_path_field("store.path", path)
            }
        }
    }
}

/// Returns the default store busy timeout.
const fn default_store_busy_timeout_ms() -> u64 {
    5_000
}

// ============================================================================
// SECTION: Exports and Uploads
// ============================================================================

/// Generated document configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportsConfig {
    /// Directory receiving generated documents.
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

impl Default for ExportsConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

impl ExportsConfig {
    /// Validates export settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_field("exports.dir", &self.dir)
    }
}

/// Returns the default export directory.
fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

/// Supporting file upload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    /// Directory receiving uploaded files.
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,
    /// Maximum files accepted per submission (1 to 32).
    #[serde(default = "default_max_upload_files")]
    pub max_files: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_files: default_max_upload_files(),
        }
    }
}

impl UploadsConfig {
    /// Validates upload settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_field("uploads.dir", &self.dir)?;
        if self.max_files == 0 {
            return Err(ConfigError::Invalid(
                "uploads.max_files must be greater than zero".to_string(),
            ));
        }
        if self.max_files > MAX_SUPPORTING_FILES {
            return Err(ConfigError::Invalid(format!(
                "uploads.max_files exceeds limit of {MAX_SUPPORTING_FILES}"
            )));
        }
        Ok(())
    }
}

/// Returns the default upload directory.
fn default_upload_dir() -> PathBuf {
    PathBuf::from(DEFAULT_UPLOAD_DIR)
}

/// Returns the default upload count limit.
const fn default_max_upload_files() -> usize {
    10
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Request audit log configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Emit one JSON line per API request.
    #[serde(default)]
    pub enabled: bool,
    /// Append audit lines to this file instead of stderr.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_field("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path; the flag is true when the path was requested.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path against length constraints.
fn validate_path_field(field: &str, path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
