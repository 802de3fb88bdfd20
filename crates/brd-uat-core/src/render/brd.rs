// brd-uat-core/src/render/brd.rs
// ============================================================================
// Module: BRD Renderer
// Description: Business requirements document rendering to HTML.
// Purpose: Produce the narrative BRD for a single requirement.
// Dependencies: crate::model, crate::render::html
// ============================================================================

//! ## Overview
//! The BRD is a fixed ten-section template. Sections 4 (change requests) and
//! 9 (supporting documents) are rendered only when the requirement carries the
//! corresponding data; section numbers stay fixed so omitted sections leave a
//! gap in the numbering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;

use super::html::escape_html;
use super::html::escape_multiline;
use crate::model::NewRequirement;
use crate::model::RequirementStatus;
use crate::model::time::format_long_date;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Output layout for a rendered BRD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrdVariant {
    /// Screen document layout.
    #[default]
    Document,
    /// Print layout with page margins.
    Print,
}

/// Rendering options for [`render_brd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrdOptions {
    /// Date printed in the header and footer.
    pub generated_on: Date,
    /// Output layout.
    pub variant: BrdVariant,
}

// ============================================================================
// SECTION: Fixed Content
// ============================================================================

/// Shared stylesheet for BRD documents.
const BRD_STYLES: &str = "
        body { font-family: 'Arial', sans-serif; line-height: 1.6; margin: 40px; color: #333; }
        .header { text-align: center; border-bottom: 3px solid #2c3e50; padding-bottom: 20px; margin-bottom: 30px; }
        .header h1 { color: #2c3e50; font-size: 28px; margin-bottom: 10px; }
        .header p { color: #7f8c8d; font-size: 16px; }
        .section { margin-bottom: 30px; }
        .section h2 { color: #34495e; border-left: 4px solid #3498db; padding-left: 15px; font-size: 20px; }
        .section h3 { color: #2c3e50; font-size: 16px; margin-top: 20px; }
        .info-table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        .info-table th, .info-table td { border: 1px solid #bdc3c7; padding: 12px; text-align: left; }
        .info-table th { background-color: #ecf0f1; font-weight: bold; color: #2c3e50; }
        .requirements-list { background-color: #f8f9fa; border-left: 4px solid #28a745; padding: 20px; margin: 15px 0; }
        .change-request { background-color: #fff3cd; border-left: 4px solid #ffc107; padding: 20px; margin: 15px 0; }
        .footer { margin-top: 50px; padding-top: 20px; border-top: 2px solid #ecf0f1; text-align: center; color: #7f8c8d; }
";

/// Extra rules for the print layout.
const PRINT_STYLES: &str = "
        @page { size: A4; margin: 20mm; }
        body.print { margin: 0; }
        .section { page-break-inside: avoid; }
";

/// Fixed functional requirement subsections.
const FUNCTIONAL: &[(&str, &[&str])] = &[
    (
        "5.1 Core Functionality",
        &[
            "System shall meet all specified business requirements",
            "User interface shall be intuitive and user-friendly",
            "System shall provide appropriate error handling and validation",
            "All user inputs shall be validated for security and data integrity",
        ],
    ),
    (
        "5.2 Performance Requirements",
        &[
            "System response time shall not exceed 3 seconds for standard operations",
            "System shall support concurrent users based on priority level",
            "System shall maintain 99.9% uptime during business hours",
        ],
    ),
];

/// Fixed non-functional requirement subsections.
const NON_FUNCTIONAL: &[(&str, &[&str])] = &[
    (
        "6.1 Security Requirements",
        &[
            "All data transmissions shall be encrypted",
            "User authentication and authorization shall be implemented",
            "System shall log all user activities for audit purposes",
        ],
    ),
    (
        "6.2 Compatibility Requirements",
        &[
            "System shall be compatible with modern web browsers",
            "Mobile responsiveness shall be implemented for all interfaces",
            "System shall integrate with existing infrastructure",
        ],
    ),
];

/// Fixed assumptions and constraints subsections.
const ASSUMPTIONS: &[(&str, &[&str])] = &[
    (
        "7.1 Assumptions",
        &[
            "All required resources will be available as planned",
            "Stakeholders will provide timely feedback and approvals",
            "Third-party integrations will be available and functional",
        ],
    ),
    (
        "7.2 Constraints",
        &[
            "Project must be completed within the specified timeframe",
            "Solution must work within existing technology stack",
            "Budget constraints must be adhered to",
        ],
    ),
];

/// Fixed acceptance criteria.
const ACCEPTANCE_CRITERIA: &[&str] = &[
    "All functional requirements must be fully implemented and tested",
    "System must pass all UAT test cases",
    "Performance benchmarks must be met",
    "Security requirements must be validated",
    "User documentation must be complete and approved",
];

/// Sign-off roles.
const SIGN_OFF_ROLES: &[&str] = &["Business Analyst", "Project Manager", "Stakeholder"];

/// Blank signature line.
const SIGNATURE_LINE: &str = "_________________";

/// Number of sections rendered for every requirement.
const ALWAYS_RENDERED_SECTIONS: usize = 8;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Returns the number of numbered sections the BRD will contain.
#[must_use]
pub fn brd_section_count(requirement: &NewRequirement) -> usize {
    ALWAYS_RENDERED_SECTIONS
        + usize::from(requirement.has_change_request())
        + usize::from(!requirement.supporting_files.is_empty())
}

/// Renders the BRD for a requirement as a complete HTML document.
#[must_use]
pub fn render_brd(
    requirement: &NewRequirement,
    status: RequirementStatus,
    options: &BrdOptions,
) -> String {
    let title = escape_html(&requirement.project_title);
    let generated_on = format_long_date(options.generated_on);
    let delivery = requirement
        .delivery_date
        .map_or_else(|| "Not specified".to_string(), format_long_date);
    let priority = requirement.priority;

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset='UTF-8'>\n");
    html.push_str("    <title>Business Requirements Document</title>\n    <style>");
    html.push_str(BRD_STYLES);
    html.push_str(&format!(
        "        .{} {{ color: {}; font-weight: bold; }}\n",
        priority.css_class(),
        priority.color()
    ));
    if options.variant == BrdVariant::Print {
        html.push_str(PRINT_STYLES);
    }
    html.push_str("    </style>\n</head>\n");
    match options.variant {
        BrdVariant::Document => html.push_str("<body>\n"),
        BrdVariant::Print => html.push_str("<body class='print'>\n"),
    }

    html.push_str(&format!(
        "    <div class='header'>\n        <h1>Business Requirements Document</h1>\n        \
         <p>{title}</p>\n        <p>Generated on: {generated_on}</p>\n    </div>\n"
    ));

    open_section(&mut html, "1. Executive Summary");
    html.push_str(&format!(
        "        <p>This Business Requirements Document (BRD) outlines the detailed requirements \
         for the <strong>{title}</strong> project. This document serves as a comprehensive guide \
         for all stakeholders involved in the project development and implementation \
         process.</p>\n"
    ));
    close_section(&mut html);

    open_section(&mut html, "2. Project Information");
    html.push_str("        <table class='info-table'>\n");
    info_row(&mut html, "Project Title", &title);
    info_row(
        &mut html,
        "Priority Level",
        &format!("<span class='{}'>{}</span>", priority.css_class(), priority.label()),
    );
    info_row(&mut html, "Expected Delivery Date", &delivery);
    info_row(&mut html, "Document Version", "1.0");
    info_row(&mut html, "Status", status.label());
    html.push_str("        </table>\n");
    close_section(&mut html);

    open_section(&mut html, "3. Business Requirements");
    html.push_str(&format!(
        "        <div class='requirements-list'>\n            <h3>Primary Requirements</h3>\n            \
         <p>{}</p>\n        </div>\n",
        escape_multiline(&requirement.requirement_description)
    ));
    close_section(&mut html);

    if let Some(change_request) =
        requirement.change_request.as_deref().filter(|_| requirement.has_change_request())
    {
        open_section(&mut html, "4. Change Requests");
        html.push_str(&format!(
            "        <div class='change-request'>\n            <h3>Requested Changes</h3>\n            \
             <p>{}</p>\n        </div>\n",
            escape_multiline(change_request)
        ));
        close_section(&mut html);
    }

    open_section(&mut html, "5. Functional Requirements");
    subsections(&mut html, FUNCTIONAL);
    close_section(&mut html);

    open_section(&mut html, "6. Non-Functional Requirements");
    subsections(&mut html, NON_FUNCTIONAL);
    close_section(&mut html);

    open_section(&mut html, "7. Assumptions and Constraints");
    subsections(&mut html, ASSUMPTIONS);
    close_section(&mut html);

    open_section(&mut html, "8. Acceptance Criteria");
    bullet_list(&mut html, ACCEPTANCE_CRITERIA.iter().copied().map(str::to_string));
    close_section(&mut html);

    if !requirement.supporting_files.is_empty() {
        open_section(&mut html, "9. Supporting Documents");
        bullet_list(&mut html, requirement.supporting_files.iter().map(|name| escape_html(name)));
        close_section(&mut html);
    }

    open_section(&mut html, "10. Approval and Sign-off");
    html.push_str(
        "        <table class='info-table'>\n            \
         <tr><th>Role</th><th>Name</th><th>Signature</th><th>Date</th></tr>\n",
    );
    for role in SIGN_OFF_ROLES {
        html.push_str(&format!(
            "            <tr><td>{role}</td><td>{SIGNATURE_LINE}</td><td>{SIGNATURE_LINE}</td>\
             <td>{SIGNATURE_LINE}</td></tr>\n"
        ));
    }
    html.push_str("        </table>\n");
    close_section(&mut html);

    html.push_str(&format!(
        "    <div class='footer'>\n        <p>This document is confidential and proprietary. \
         Distribution is restricted to authorized personnel only.</p>\n        <p>Generated by \
         BRD &amp; UAT Generator System on {generated_on}</p>\n    </div>\n"
    ));
    html.push_str("</body>\n</html>\n");
    html
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Opens a numbered section.
fn open_section(html: &mut String, heading: &str) {
    html.push_str(&format!("    <div class='section'>\n        <h2>{heading}</h2>\n"));
}

/// Closes a section.
fn close_section(html: &mut String) {
    html.push_str("    </div>\n");
}

/// Writes a header/value row of the information table. `value` must be escaped.
fn info_row(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!("            <tr><th>{label}</th><td>{value}</td></tr>\n"));
}

/// Writes titled bullet lists.
fn subsections(html: &mut String, groups: &[(&str, &[&str])]) {
    for (heading, items) in groups {
        html.push_str(&format!("        <h3>{heading}</h3>\n"));
        bullet_list(html, items.iter().copied().map(str::to_string));
    }
}

/// Writes an unordered list. Items must already be escaped.
fn bullet_list(html: &mut String, items: impl Iterator<Item = String>) {
    html.push_str("        <ul>\n");
    for item in items {
        html.push_str(&format!("            <li>{item}</li>\n"));
    }
    html.push_str("        </ul>\n");
}
