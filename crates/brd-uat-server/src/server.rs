// brd-uat-server/src/server.rs
// ============================================================================
// Module: BRD & UAT Server
// Description: Server bootstrap from configuration and HTTP serving.
// Purpose: Wire the store, file roots, and audit sink into the router.
// Dependencies: brd-uat-config, brd-uat-core, brd-uat-store-sqlite, axum, tokio
// ============================================================================

//! ## Overview
//! [`BrdUatServer::from_config`] validates configuration, builds the
//! configured requirement store and audit sink, and assembles the router.
//! [`BrdUatServer::serve`] binds the configured address and runs until the
//! listener fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use brd_uat_config::AuditConfig;
use brd_uat_config::BrdUatConfig;
use brd_uat_config::StoreType;
use brd_uat_core::InMemoryRequirementStore;
use brd_uat_core::SharedRequirementStore;
use brd_uat_store_sqlite::SqliteRequirementStore;
use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::exports::ExportDir;
use crate::routes::ServerState;
use crate::routes::build_router;
use crate::service::RequirementService;
use crate::uploads::UploadDir;

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP server instance.
pub struct BrdUatServer {
    /// Validated configuration.
    config: BrdUatConfig,
    /// Handler state.
    state: ServerState,
}

impl BrdUatServer {
    /// Builds a server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when validation or initialization fails.
    pub fn from_config(mut config: BrdUatConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let store = build_requirement_store(&config)?;
        let exports = ExportDir::new(config.exports.dir.clone())
            .map_err(|err| ServerError::Init(err.to_string()))?;
        let uploads = UploadDir::new(config.uploads.dir.clone(), config.uploads.max_files)
            .map_err(|err| ServerError::Init(err.to_string()))?;
        let audit = build_audit_sink(&config.audit)?;
        let service = RequirementService::new(store, exports, uploads);
        let state = ServerState::new(service)
            .with_audit(audit)
            .with_index_path(config.server.index_path.clone())
            .with_max_body_bytes(config.server.max_body_bytes);
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the application router.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Serves HTTP requests on the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr = self
            .config
            .server
            .bind_addr()
            .map_err(|err| ServerError::Config(err.to_string()))?;
        let app = build_router(self.state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        if !addr.ip().is_loopback() {
            warn!(%addr, "server bound to a non-loopback address without authentication");
        }
        info!(%addr, store = ?self.config.store.store_type, "brd-uat server listening");
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))
    }
}

/// Builds the requirement store from configuration.
fn build_requirement_store(config: &BrdUatConfig) -> Result<SharedRequirementStore, ServerError> {
    let store = match config.store.store_type {
        StoreType::Memory => SharedRequirementStore::from_store(InMemoryRequirementStore::new()),
        StoreType::Sqlite => {
            let sqlite_config = config.store.sqlite().ok_or_else(|| {
                ServerError::Config("sqlite store requires path".to_string())
            })?;
            let store = SqliteRequirementStore::new(&sqlite_config)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            SharedRequirementStore::from_store(store)
        }
    };
    Ok(store)
}

/// Builds the request audit sink from configuration.
fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = FileAuditSink::new(path)
                .map_err(|err| ServerError::Init(format!("audit log: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization failures.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}
