// brd-uat-core/src/render/report.rs
// ============================================================================
// Module: UAT Report Renderer
// Description: Human-readable HTML report of generated UAT cases.
// Purpose: Give testers a printable execution sheet per requirement.
// Dependencies: crate::model, crate::render
// ============================================================================

//! ## Overview
//! The report shows a summary table followed by one card per test case.
//! Negative cases get a distinct header class so they stand out.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;

use super::html::escape_html;
use super::html::escape_multiline;
use super::uat::DEFAULT_EXECUTION_STATUS;
use super::uat::TestCase;
use super::uat::TestCaseSummary;
use super::uat::TestType;
use crate::model::Priority;
use crate::model::time::format_long_date;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Report stylesheet.
const REPORT_STYLES: &str = "
        body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }
        .header { text-align: center; border-bottom: 2px solid #3498db; padding-bottom: 20px; margin-bottom: 30px; }
        .header h1 { color: #2c3e50; }
        .summary { background: #ecf0f1; padding: 20px; border-radius: 8px; margin-bottom: 30px; }
        .test-case { border: 1px solid #bdc3c7; margin-bottom: 20px; border-radius: 8px; overflow: hidden; }
        .test-header { background: #3498db; color: white; padding: 15px; font-weight: bold; }
        .test-header.negative { background: #e74c3c; }
        .test-content { padding: 20px; }
        .test-steps { background: #f8f9fa; padding: 15px; border-radius: 5px; margin: 10px 0; }
        .priority-high { color: #e74c3c; font-weight: bold; }
        .priority-medium { color: #f39c12; font-weight: bold; }
        .priority-low { color: #27ae60; font-weight: bold; }
        table { width: 100%; border-collapse: collapse; margin: 15px 0; }
        th, td { border: 1px solid #bdc3c7; padding: 12px; text-align: left; }
        th { background: #ecf0f1; }
";

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the UAT report for a project.
#[must_use]
pub fn render_uat_report(
    project_title: &str,
    priority: Priority,
    cases: &[TestCase],
    generated_on: Date,
) -> String {
    let summary = TestCaseSummary::from_cases(cases);
    let mut html = String::with_capacity(8 * 1024 + cases.len() * 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset='UTF-8'>\n");
    html.push_str("    <title>UAT Test Cases Report</title>\n    <style>");
    html.push_str(REPORT_STYLES);
    html.push_str("    </style>\n</head>\n<body>\n");
    html.push_str(&format!(
        "    <div class='header'>\n        <h1>UAT Test Cases Report</h1>\n        <h2>{}</h2>\n        \
         <p>Generated on: {}</p>\n    </div>\n",
        escape_html(project_title),
        format_long_date(generated_on)
    ));
    html.push_str(&format!(
        "    <div class='summary'>\n        <h3>Test Summary</h3>\n        <table>\n            \
         <tr><th>Total Test Cases</th><td>{}</td></tr>\n            \
         <tr><th>Positive Test Cases</th><td>{}</td></tr>\n            \
         <tr><th>Negative Test Cases</th><td>{}</td></tr>\n            \
         <tr><th>Priority Level</th><td>{}</td></tr>\n        </table>\n    </div>\n",
        summary.total,
        summary.positive,
        summary.negative,
        priority.label()
    ));
    html.push_str("    <h3>Test Cases Details</h3>\n");
    for case in cases {
        push_case(&mut html, case);
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Appends one test case card.
fn push_case(html: &mut String, case: &TestCase) {
    let header_class = match case.test_type {
        TestType::Positive => "test-header",
        TestType::Negative => "test-header negative",
    };
    html.push_str(&format!(
        "    <div class='test-case'>\n        <div class='{header_class}'>\n            {} - {}\n            \
         <span style='float: right;'>[{} Test]</span>\n        </div>\n",
        escape_html(&case.test_id),
        escape_html(&case.scenario),
        case.test_type.label()
    ));
    html.push_str(&format!(
        "        <div class='test-content'>\n            <p><strong>Category:</strong> {}</p>\n            \
         <p><strong>Priority:</strong> <span class='{}'>{}</span></p>\n            \
         <div class='test-steps'>\n                <strong>Test Steps:</strong><br />\n                \
         {}\n            </div>\n            <p><strong>Expected Result:</strong> {}</p>\n",
        escape_html(&case.category),
        case.priority.css_class(),
        case.priority.label(),
        escape_multiline(&case.steps.join("\n")),
        escape_html(&case.expected_result)
    ));
    html.push_str(&format!(
        "            <table>\n                \
         <tr><th>Status</th><th>Actual Result</th><th>Comments</th><th>Tester</th><th>Date</th></tr>\n                \
         <tr><td>{DEFAULT_EXECUTION_STATUS}</td><td></td><td></td><td></td><td></td></tr>\n            \
         </table>\n        </div>\n    </div>\n"
    ));
}
