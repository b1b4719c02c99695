//! Cloze linting
//!
//! Checks for:
//! - Blank markers without an answer template
//! - Answer templates without a blank marker
//! - `!!` delimiters that did not form a highlight
//! - Exercises without any blank

use crate::cloze::Cloze;
use crate::core::model::{ItemError, ResultItem, Severity};

/// A lint issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub path: String,
    pub line: Option<u32>,
}

impl LintIssue {
    pub fn error(code: &str, message: &str, path: &str, line: Option<u32>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message: message.to_string(),
            path: path.to_string(),
            line,
        }
    }

    pub fn warning(code: &str, message: &str, path: &str, line: Option<u32>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.to_string(),
            path: path.to_string(),
            line,
        }
    }

    pub fn to_result_item(&self) -> ResultItem {
        ResultItem::issue(self.severity, ItemError::new(&self.code, &self.message))
            .with_path(&self.path)
            .with_line(self.line)
    }
}

/// Lint a built cloze
///
/// Line numbers refer to the authored markup; anchors never add lines.
pub fn lint_cloze(cloze: &Cloze, path: &str) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    if cloze.blanks.is_empty() {
        issues.push(LintIssue::error(
            "NO_BLANKS",
            "Cloze has no linked blanks",
            path,
            None,
        ));
    }

    for line in &cloze.diagnostics.unlinked_blank_lines {
        issues.push(LintIssue::warning(
            "UNLINKED_BLANK",
            "Blank marker has no answer and renders as an empty placeholder",
            path,
            Some(*line),
        ));
    }

    if cloze.diagnostics.unused_templates > 0 {
        issues.push(LintIssue::warning(
            "UNUSED_BLANK",
            &format!(
                "{} answer(s) have no matching blank marker",
                cloze.diagnostics.unused_templates
            ),
            path,
            None,
        ));
    }

    issues.extend(check_stray_delimiters(&cloze.html, path));

    issues
}

/// Report `!!` left over after scanning (unclosed or longer than 40 characters)
fn check_stray_delimiters(html: &str, path: &str) -> Vec<LintIssue> {
    html.lines()
        .enumerate()
        .filter(|(_, line)| line.contains("!!"))
        .map(|(line_num, _)| {
            LintIssue::warning(
                "STRAY_HIGHLIGHT_DELIMITER",
                "'!!' does not form a highlight (unclosed or longer than 40 characters)",
                path,
                Some(line_num as u32 + 1),
            )
        })
        .collect()
}
