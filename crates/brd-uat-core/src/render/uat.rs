// brd-uat-core/src/render/uat.rs
// ============================================================================
// Module: UAT Test Cases
// Description: Fixed UAT catalog and CSV serialization.
// Purpose: Derive acceptance test cases from a requirement.
// Dependencies: crate::model, serde
// ============================================================================

//! ## Overview
//! Test cases come from a fixed catalog of ten base cases plus two change
//! request cases. Only the priority of the core-functionality and
//! change-request cases depends on the requirement; every other field is
//! constant. CSV output quotes fields the way spreadsheet tools expect.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::Priority;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// CSV header row, in column order.
pub const CSV_HEADER: [&str; 10] = [
    "Test ID",
    "Test Scenario",
    "Test Type",
    "Test Steps",
    "Expected Result",
    "Priority",
    "Category",
    "Status",
    "Actual Result",
    "Comments",
];

/// Execution status written for every freshly generated case.
pub const DEFAULT_EXECUTION_STATUS: &str = "Not Executed";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Whether a test exercises expected or failure behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestType {
    /// Expected-path test.
    Positive,
    /// Failure-path test.
    Negative,
}

impl TestType {
    /// Returns the canonical label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
        }
    }

    /// Parses a label case-insensitively.
    #[must_use]
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }
}

/// A single UAT test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Catalog identifier (`TC001`..`TC012`).
    pub test_id: String,
    /// Scenario description.
    pub scenario: String,
    /// Positive or negative.
    pub test_type: TestType,
    /// Ordered steps, already numbered.
    pub steps: Vec<String>,
    /// Expected outcome.
    pub expected_result: String,
    /// Case priority.
    pub priority: Priority,
    /// Category label.
    pub category: String,
}

/// Counts shown in the report summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TestCaseSummary {
    /// Total cases.
    pub total: usize,
    /// Positive cases.
    pub positive: usize,
    /// Negative cases.
    pub negative: usize,
}

impl TestCaseSummary {
    /// Tallies a case list.
    #[must_use]
    pub fn from_cases(cases: &[TestCase]) -> Self {
        let positive = cases.iter().filter(|case| case.test_type == TestType::Positive).count();
        Self {
            total: cases.len(),
            positive,
            negative: cases.len() - positive,
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Priority source for a catalog entry.
#[derive(Clone, Copy)]
enum CasePriority {
    /// Constant priority.
    Fixed(Priority),
    /// Inherits the requirement priority.
    Requirement,
}

/// Static catalog entry.
struct CatalogEntry {
    /// Test identifier.
    id: &'static str,
    /// Scenario description.
    scenario: &'static str,
    /// Test type.
    test_type: TestType,
    /// Unnumbered steps.
    steps: &'static [&'static str],
    /// Expected result.
    expected: &'static str,
    /// Priority source.
    priority: CasePriority,
    /// Category label.
    category: &'static str,
}

/// Cases generated for every requirement.
const BASE_CASES: &[CatalogEntry] = &[
    CatalogEntry {
        id: "TC001",
        scenario: "Verify system login with valid credentials",
        test_type: TestType::Positive,
        steps: &[
            "Navigate to login page",
            "Enter valid username",
            "Enter valid password",
            "Click login button",
        ],
        expected: "User should be successfully logged into the system",
        priority: CasePriority::Fixed(Priority::High),
        category: "Authentication",
    },
    CatalogEntry {
        id: "TC002",
        scenario: "Verify main functionality as per requirements",
        test_type: TestType::Positive,
        steps: &["Access main feature", "Perform primary function", "Verify results"],
        expected: "System should perform the main functionality as described in requirements",
        priority: CasePriority::Requirement,
        category: "Core Functionality",
    },
    CatalogEntry {
        id: "TC003",
        scenario: "Verify data validation for required fields",
        test_type: TestType::Positive,
        steps: &[
            "Access data entry form",
            "Fill all required fields with valid data",
            "Submit form",
        ],
        expected: "Form should be successfully submitted and data should be saved",
        priority: CasePriority::Fixed(Priority::High),
        category: "Data Validation",
    },
    CatalogEntry {
        id: "TC004",
        scenario: "Verify system performance under normal load",
        test_type: TestType::Positive,
        steps: &["Perform normal operations", "Monitor response times", "Check system stability"],
        expected: "System should respond within acceptable time limits and remain stable",
        priority: CasePriority::Fixed(Priority::Medium),
        category: "Performance",
    },
    CatalogEntry {
        id: "TC005",
        scenario: "Verify user interface responsiveness",
        test_type: TestType::Positive,
        steps: &[
            "Access system on different devices",
            "Test UI elements",
            "Verify layout adaptation",
        ],
        expected: "UI should be responsive and adapt to different screen sizes",
        priority: CasePriority::Fixed(Priority::Medium),
        category: "UI/UX",
    },
    CatalogEntry {
        id: "TC006",
        scenario: "Verify system behavior with invalid login credentials",
        test_type: TestType::Negative,
        steps: &[
            "Navigate to login page",
            "Enter invalid username",
            "Enter invalid password",
            "Click login button",
        ],
        expected: "System should display appropriate error message and deny access",
        priority: CasePriority::Fixed(Priority::High),
        category: "Security",
    },
    CatalogEntry {
        id: "TC007",
        scenario: "Verify system behavior with empty required fields",
        test_type: TestType::Negative,
        steps: &[
            "Access data entry form",
            "Leave required fields empty",
            "Attempt to submit form",
        ],
        expected: "System should display validation errors and prevent form submission",
        priority: CasePriority::Fixed(Priority::High),
        category: "Data Validation",
    },
    CatalogEntry {
        id: "TC008",
        scenario: "Verify system behavior with invalid data formats",
        test_type: TestType::Negative,
        steps: &[
            "Enter data in incorrect format",
            "Attempt to save/submit",
            "Verify error handling",
        ],
        expected: "System should validate data format and display appropriate error messages",
        priority: CasePriority::Fixed(Priority::Medium),
        category: "Data Validation",
    },
    CatalogEntry {
        id: "TC009",
        scenario: "Verify system behavior under excessive load",
        test_type: TestType::Negative,
        steps: &[
            "Simulate high user load",
            "Perform multiple operations simultaneously",
            "Monitor system response",
        ],
        expected: "System should handle load gracefully and maintain functionality or display \
                   appropriate messages",
        priority: CasePriority::Fixed(Priority::Medium),
        category: "Performance",
    },
    CatalogEntry {
        id: "TC010",
        scenario: "Verify unauthorized access prevention",
        test_type: TestType::Negative,
        steps: &[
            "Attempt to access restricted areas without proper authentication",
            "Try to perform unauthorized actions",
        ],
        expected: "System should prevent unauthorized access and display security warnings",
        priority: CasePriority::Fixed(Priority::High),
        category: "Security",
    },
];

/// Cases appended when a change request is present.
const CHANGE_REQUEST_CASES: &[CatalogEntry] = &[
    CatalogEntry {
        id: "TC011",
        scenario: "Verify implementation of change request requirements",
        test_type: TestType::Positive,
        steps: &[
            "Access modified functionality",
            "Test change request features",
            "Verify integration with existing system",
        ],
        expected: "Change request should be implemented as specified without breaking existing \
                   functionality",
        priority: CasePriority::Requirement,
        category: "Change Request",
    },
    CatalogEntry {
        id: "TC012",
        scenario: "Verify backward compatibility after change implementation",
        test_type: TestType::Negative,
        steps: &[
            "Test existing functionality",
            "Verify no regression issues",
            "Check data integrity",
        ],
        expected: "Existing functionality should remain unaffected by the changes",
        priority: CasePriority::Fixed(Priority::High),
        category: "Regression",
    },
];

impl CatalogEntry {
    /// Materializes the entry for a requirement priority.
    fn to_case(&self, requirement_priority: Priority) -> TestCase {
        let priority = match self.priority {
            CasePriority::Fixed(priority) => priority,
            CasePriority::Requirement => requirement_priority,
        };
        TestCase {
            test_id: self.id.to_string(),
            scenario: self.scenario.to_string(),
            test_type: self.test_type,
            steps: self
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| format!("{}. {step}", index + 1))
                .collect(),
            expected_result: self.expected.to_string(),
            priority,
            category: self.category.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Generates the UAT cases for a requirement.
///
/// Returns ten cases, or twelve when `has_change_request` is true.
#[must_use]
pub fn generate_test_cases(priority: Priority, has_change_request: bool) -> Vec<TestCase> {
    let extra: &[CatalogEntry] = if has_change_request { CHANGE_REQUEST_CASES } else { &[] };
    BASE_CASES.iter().chain(extra).map(|entry| entry.to_case(priority)).collect()
}

// ============================================================================
// SECTION: CSV
// ============================================================================

/// Serializes cases as CSV with a header row. Every row ends with `\n`.
#[must_use]
pub fn render_csv(cases: &[TestCase]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_HEADER.iter().copied());
    for case in cases {
        let steps = case.steps.join("\n");
        push_row(
            &mut out,
            [
                case.test_id.as_str(),
                case.scenario.as_str(),
                case.test_type.label(),
                steps.as_str(),
                case.expected_result.as_str(),
                case.priority.label(),
                case.category.as_str(),
                DEFAULT_EXECUTION_STATUS,
                "",
                "",
            ]
            .into_iter(),
        );
    }
    out
}

/// Appends one CSV record.
fn push_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (index, field) in fields.enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

/// Appends one field, quoting it when it holds a delimiter, quote, or line break.
fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
