// crates/brd-uat-core/tests/store.rs
// ============================================================================
// Module: In-Memory Store Tests
// Description: Tests for the in-memory requirement store.
// Purpose: Validate lifecycle transitions and ordering guarantees.
// ============================================================================

//! In-memory requirement store tests.

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

use brd_uat_core::FileUpdate;
use brd_uat_core::InMemoryRequirementStore;
use brd_uat_core::NewRequirement;
use brd_uat_core::Priority;
use brd_uat_core::RequirementId;
use brd_uat_core::RequirementStatus;
use brd_uat_core::RequirementStore;
use brd_uat_core::SharedRequirementStore;
use brd_uat_core::generate_test_cases;

fn requirement(title: &str) -> NewRequirement {
    NewRequirement {
        project_title: title.to_string(),
        requirement_description: "Description".to_string(),
        change_request: None,
        priority: Priority::Medium,
        delivery_date: None,
        supporting_files: Vec::new(),
    }
}

#[test]
fn create_assigns_increasing_ids_in_draft() {
    let store = InMemoryRequirementStore::new();
    let first = store.create(&requirement("A")).unwrap();
    let second = store.create(&requirement("B")).unwrap();
    assert_eq!(first.id.get(), 1);
    assert_eq!(second.id.get(), 2);
    assert_eq!(first.status, RequirementStatus::Draft);
    assert_eq!(first.files.brd_docx_file, None);
}

#[test]
fn list_returns_newest_first() {
    let store = InMemoryRequirementStore::new();
    for title in ["A", "B", "C"] {
        store.create(&requirement(title)).unwrap();
    }
    let titles: Vec<String> =
        store.list().unwrap().into_iter().map(|record| record.details.project_title).collect();
    assert_eq!(titles, ["C", "B", "A"]);
}

#[test]
fn update_files_marks_generated() {
    let store = InMemoryRequirementStore::new();
    let record = store.create(&requirement("A")).unwrap();
    let update = FileUpdate {
        brd_docx: Some("BRD_1_1700000000.html".to_string()),
        brd_pdf: Some("BRD_1_1700000000.pdf.html".to_string()),
        ..FileUpdate::default()
    };
    assert!(store.update_files(record.id, &update).unwrap());
    let loaded = store.get(record.id).unwrap().unwrap();
    assert_eq!(loaded.status, RequirementStatus::Generated);
    assert_eq!(loaded.files.brd_docx_file.as_deref(), Some("BRD_1_1700000000.html"));
    assert_eq!(loaded.files.uat_xlsx_file, None);
}

#[test]
fn empty_update_is_a_no_op() {
    let store = InMemoryRequirementStore::new();
    let record = store.create(&requirement("A")).unwrap();
    assert!(!store.update_files(record.id, &FileUpdate::default()).unwrap());
    assert_eq!(store.get(record.id).unwrap().unwrap().status, RequirementStatus::Draft);
}

#[test]
fn missing_requirement_reports_false() {
    let store = InMemoryRequirementStore::new();
    let missing = RequirementId::new(42).unwrap();
    assert!(store.get(missing).unwrap().is_none());
    assert!(!store.delete(missing).unwrap());
    assert!(!store.update_status(missing, RequirementStatus::Completed).unwrap());
    assert!(store.replace_test_cases(missing, &[]).is_err());
    assert!(store.test_cases(missing).unwrap().is_empty());
}

#[test]
fn delete_removes_record_and_cases() {
    let store = SharedRequirementStore::from_store(InMemoryRequirementStore::new());
    let record = store.create(&requirement("A")).unwrap();
    store.replace_test_cases(record.id, &generate_test_cases(Priority::Low, false)).unwrap();
    assert_eq!(store.test_cases(record.id).unwrap().len(), 10);
    assert!(store.delete(record.id).unwrap());
    assert!(store.get(record.id).unwrap().is_none());
    assert!(store.test_cases(record.id).unwrap().is_empty());
}

#[test]
fn replace_test_cases_overwrites_previous_set() {
    let store = InMemoryRequirementStore::new();
    let record = store.create(&requirement("A")).unwrap();
    store.replace_test_cases(record.id, &generate_test_cases(Priority::Low, true)).unwrap();
    store.replace_test_cases(record.id, &generate_test_cases(Priority::Low, false)).unwrap();
    assert_eq!(store.test_cases(record.id).unwrap().len(), 10);
}

#[test]
fn status_can_be_completed() {
    let store = InMemoryRequirementStore::new();
    let record = store.create(&requirement("A")).unwrap();
    assert!(store.update_status(record.id, RequirementStatus::Completed).unwrap());
    assert_eq!(store.get(record.id).unwrap().unwrap().status, RequirementStatus::Completed);
}
