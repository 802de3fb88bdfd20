// crates/brd-uat-store-sqlite/tests/sqlite_store_unit.rs
// ============================================================================
// Module: SQLite Requirement Store Unit Tests
// Description: Persistence, ordering, and integrity tests for the SQLite store.
// Purpose: Validate path safety, schema versioning, cascades, and corruption
//          detection.
// ============================================================================

//! ## Overview
//! Unit-level tests for `SQLite` store invariants:
//! - Path safety checks (directory rejection)
//! - Schema version validation
//! - Requirement lifecycle and newest-first listing
//! - Test case persistence and cascading deletes
//! - Fail-closed decoding of corrupted rows

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::path::Path;

use brd_uat_core::FileUpdate;
use brd_uat_core::NewRequirement;
use brd_uat_core::Priority;
use brd_uat_core::RequirementId;
use brd_uat_core::RequirementStatus;
use brd_uat_core::RequirementStore;
use brd_uat_core::StoreError;
use brd_uat_core::generate_test_cases;
use brd_uat_core::model::time::parse_iso_date;
use brd_uat_store_sqlite::SqliteRequirementStore;
use brd_uat_store_sqlite::SqliteStoreConfig;
use brd_uat_store_sqlite::SqliteStoreError;
use brd_uat_store_sqlite::SqliteStoreMode;
use brd_uat_store_sqlite::SqliteSyncMode;
use rusqlite::Connection;
use rusqlite::params;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn store_for(path: &Path) -> SqliteRequirementStore {
    let config = SqliteStoreConfig {
        path: path.to_path_buf(),
        busy_timeout_ms: 1_000,
        journal_mode: SqliteStoreMode::Wal,
        sync_mode: SqliteSyncMode::Full,
    };
    SqliteRequirementStore::new(&config).expect("store init")
}

fn requirement(title: &str) -> NewRequirement {
    NewRequirement {
        project_title: title.to_string(),
        requirement_description: "Users log in.\nUsers log out.".to_string(),
        change_request: Some("Add SSO".to_string()),
        priority: Priority::High,
        delivery_date: parse_iso_date("2026-12-31"),
        supporting_files: vec!["1700000000_spec.pdf".to_string()],
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn sqlite_store_round_trips_requirements() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("store.db"));
    let created = store.create(&requirement("Portal")).unwrap();
    assert_eq!(created.status, RequirementStatus::Draft);
    let loaded = store.get(created.id).unwrap().expect("stored");
    assert_eq!(loaded, created);
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("store.db");
    let id = store_for(&path).create(&requirement("Portal")).unwrap().id;
    let reopened = store_for(&path);
    assert_eq!(reopened.get(id).unwrap().unwrap().details.project_title, "Portal");
}

#[test]
fn sqlite_store_lists_newest_first() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("store.db"));
    for title in ["A", "B", "C"] {
        store.create(&requirement(title)).unwrap();
    }
    let titles: Vec<String> =
        store.list().unwrap().into_iter().map(|record| record.details.project_title).collect();
    assert_eq!(titles, ["C", "B", "A"]);
}

#[test]
fn sqlite_store_update_files_merges_and_marks_generated() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("store.db"));
    let id = store.create(&requirement("Portal")).unwrap().id;
    let brd = FileUpdate {
        brd_docx: Some("BRD_1_1.html".to_string()),
        brd_pdf: Some("BRD_1_1.pdf.html".to_string()),
        ..FileUpdate::default()
    };
    let uat = FileUpdate {
        uat_xlsx: Some("UAT_TestCases_1_2.csv".to_string()),
        ..FileUpdate::default()
    };
    assert!(store.update_files(id, &brd).unwrap());
    assert!(store.update_files(id, &uat).unwrap());
    assert!(!store.update_files(id, &FileUpdate::default()).unwrap());
    let loaded = store.get(id).unwrap().unwrap();
    assert_eq!(loaded.status, RequirementStatus::Generated);
    assert_eq!(loaded.files.brd_docx_file.as_deref(), Some("BRD_1_1.html"));
    assert_eq!(loaded.files.uat_xlsx_file.as_deref(), Some("UAT_TestCases_1_2.csv"));
    assert_eq!(loaded.files.uat_report_file, None);
}

#[test]
fn sqlite_store_missing_rows_report_false() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("store.db"));
    let missing = RequirementId::new(99).unwrap();
    assert!(store.get(missing).unwrap().is_none());
    assert!(!store.update_status(missing, RequirementStatus::Completed).unwrap());
    assert!(!store.delete(missing).unwrap());
    let update = FileUpdate {
        brd_docx: Some("x.html".to_string()),
        ..FileUpdate::default()
    };
    assert!(!store.update_files(missing, &update).unwrap());
    assert!(matches!(store.replace_test_cases(missing, &[]), Err(StoreError::Invalid(_))));
}

#[test]
fn sqlite_store_test_cases_keep_order_and_cascade() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("store.db"));
    let id = store.create(&requirement("Portal")).unwrap().id;
    let cases = generate_test_cases(Priority::Low, true);
    store.replace_test_cases(id, &cases).unwrap();
    assert_eq!(store.test_cases(id).unwrap(), cases);

    store.replace_test_cases(id, &cases[.. 3]).unwrap();
    assert_eq!(store.test_cases(id).unwrap().len(), 3);

    assert!(store.delete(id).unwrap());
    let conn = Connection::open(temp.path().join("store.db")).unwrap();
    let remaining: i64 =
        conn.query_row("SELECT COUNT(1) FROM test_cases", params![], |row| row.get(0)).unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn sqlite_store_rejects_directory_path() {
    let temp = TempDir::new().unwrap();
    let config = SqliteStoreConfig::for_path(temp.path());
    let err = SqliteRequirementStore::new(&config).err().expect("directory rejected");
    assert!(matches!(err, SqliteStoreError::Invalid(_)));
}

#[test]
fn sqlite_store_rejects_unknown_schema_version() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE store_meta (version INTEGER NOT NULL);").unwrap();
    conn.execute("INSERT INTO store_meta (version) VALUES (?1)", params![999_i64]).unwrap();
    drop(conn);
    let err = SqliteRequirementStore::new(&SqliteStoreConfig::for_path(&path)).err().unwrap();
    assert!(matches!(err, SqliteStoreError::VersionMismatch(_)));
}

#[test]
fn sqlite_store_fails_closed_on_unknown_labels() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.db");
    let store = store_for(&path);
    let id = store.create(&requirement("Portal")).unwrap().id;
    let conn = Connection::open(&path).unwrap();
    conn.execute("UPDATE requirements SET priority = 'Urgent' WHERE id = ?1", params![id.get()])
        .unwrap();
    drop(conn);
    assert!(matches!(store.get(id), Err(StoreError::Corrupt(_))));
    assert!(matches!(store.list(), Err(StoreError::Corrupt(_))));
}

#[test]
fn sqlite_store_fails_closed_on_malformed_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.db");
    let store = store_for(&path);
    let id = store.create(&requirement("Portal")).unwrap().id;
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "UPDATE requirements SET supporting_files = 'not json' WHERE id = ?1",
        params![id.get()],
    )
    .unwrap();
    drop(conn);
    assert!(matches!(store.get(id), Err(StoreError::Corrupt(_))));
}

#[test]
fn sqlite_store_reports_ready() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("store.db"));
    store.readiness().unwrap();
}
