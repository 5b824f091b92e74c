//! Source code context visualization for error messages
//!
//! Extracts the line an error points at and draws a caret under the
//! offending column.

use super::Error;
use crate::reader::Location;

/// Format source context with line number and caret pointing to error column
///
/// # Example
/// ```text
///  5 | (+ x 1)
///    |    ^
/// ```
pub fn format_source_context(source: &str, location: &Location) -> String {
    match extract_source_line(source, location.line) {
        Some(line) => {
            let line_num = location.line.to_string();
            let padding = " ".repeat(line_num.len());
            format!(
                "{} | {}\n{} | {}\n",
                line_num,
                line,
                padding,
                highlight_column(&line, location.col)
            )
        }
        None => String::new(),
    }
}

/// Render an error followed by the source excerpt it points at, if any.
pub fn format_error_with_source(err: &Error, source: &str) -> String {
    let mut out = err.to_string();
    if let Some(loc) = &err.location {
        let context = format_source_context(source, loc);
        if !context.is_empty() {
            out.push('\n');
            out.push_str(&context);
        }
    }
    out
}

/// Extract a single line from source code by line number (1-based)
pub fn extract_source_line(source: &str, line_num: usize) -> Option<String> {
    if line_num == 0 {
        return None;
    }
    source.lines().nth(line_num - 1).map(|line| line.to_string())
}

/// Create a caret line pointing at a 1-based column. Tabs count as four.
pub fn highlight_column(line: &str, col: usize) -> String {
    if col == 0 {
        return "^".to_string();
    }

    let mut width = 0;
    for ch in line.chars().take(col - 1) {
        width += if ch == '\t' { 4 } else { 1 };
    }

    let mut caret = " ".repeat(width);
    caret.push('^');
    caret
}
