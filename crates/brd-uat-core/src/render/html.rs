// brd-uat-core/src/render/html.rs
// ============================================================================
// Module: HTML Text Helpers
// Description: Escaping and line-break conversion for rendered HTML.
// Purpose: Ensure user text is inert inside generated documents.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! All user-supplied text passes through [`escape_html`] exactly once before
//! it is embedded in markup.

/// Escapes `&`, `<`, `>`, `"`, and `'` for use in HTML text and attributes.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escapes text and inserts `<br />` before each line break.
#[must_use]
pub fn escape_multiline(value: &str) -> String {
    let escaped = escape_html(value);
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                out.push_str("<br />\r");
                if chars.peek() == Some(&'\n') {
                    out.push('\n');
                    chars.next();
                }
            }
            '\n' => out.push_str("<br />\n"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_html;
    use super::escape_multiline;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn converts_each_line_ending_once() {
        assert_eq!(escape_multiline("a\nb"), "a<br />\nb");
        assert_eq!(escape_multiline("a\r\nb"), "a<br />\r\nb");
        assert_eq!(escape_multiline("a\rb"), "a<br />\rb");
    }
}
