//! Template diagnostics
//!
//! Turns fill results into readable reports and lints templates before a
//! fill. The lint can identify:
//!
//! - Content controls without a tag (they can never be filled)
//! - Table controls whose cells hold no controls (rows cannot be generated)
//! - Tags used by more than one top-level control
//!
//! ## Example
//!
//! ```rust
//! use docx_template::diagnostics::{check_template, DiagnosticLevel};
//! use docx_template::Document;
//!
//! let doc = Document::parse(r#"<w:body><w:sdt><w:sdtPr/><w:sdtContent/></w:sdt></w:body>"#).unwrap();
//! let result = check_template(&doc);
//! assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Warning);
//! ```

use indexmap::IndexMap;
use std::fmt;

use crate::core::result::ProcessResult;
use crate::core::template::find_placeholders;
use crate::data::names::{SDT, SDT_CONTENT, TABLE, TABLE_CELL};
use crate::dom::{Document, NodeId};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the output may not be what the author expects
    Warning,
    /// Error - content was not (fully) written
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Element path of the offending node, e.g. `/w:body/w:sdt[2]`
    pub path: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            path: None,
            suggestion: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> /w:body/w:sdt[2]
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        if let Some(ref path) = self.path {
            write!(f, "\n  --> {}", path)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Turn the errors of a fill pass into diagnostics
pub fn report(result: &ProcessResult) -> CheckResult {
    let mut check = CheckResult::new();
    for error in result.errors() {
        let diag = Diagnostic::new(DiagnosticLevel::Error, error.to_string());
        let diag = if error.is_placeholder_not_found() {
            diag.with_suggestion(format!(
                "add a content control tagged '{}' to the template",
                error.item_name()
            ))
        } else {
            diag
        };
        check.add(diag);
    }
    if result.success() && result.is_handled() {
        check.add(Diagnostic::new(
            DiagnosticLevel::Info,
            format!("{} item(s) filled", result.handled_items().count()),
        ));
    }
    check
}

/// Lint a template before filling it
pub fn check_template(doc: &Document) -> CheckResult {
    let mut result = CheckResult::new();
    let controls = doc.descendants(doc.root(), SDT);

    for &sdt in &controls {
        if doc.placeholder_tag(sdt).is_none() {
            result.add(
                Diagnostic::new(DiagnosticLevel::Warning, "content control has no tag")
                    .with_path(node_path(doc, sdt))
                    .with_suggestion("set a tag in the control properties so it can be filled"),
            );
        }
    }

    for &sdt in &controls {
        if is_table_control(doc, sdt) && !cells_hold_controls(doc, sdt) {
            let name = doc.placeholder_tag(sdt).unwrap_or("<untagged>");
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!("table control '{}' has no content controls in its cells", name),
                )
                .with_path(node_path(doc, sdt))
                .with_suggestion("wrap each repeating cell's content in a tagged control"),
            );
        }
    }

    let mut tags: IndexMap<&str, usize> = IndexMap::new();
    for &sdt in &controls {
        if let Some(tag) = doc.placeholder_tag(sdt) {
            *tags.entry(tag).or_insert(0) += 1;
        }
    }
    for (tag, _) in tags.iter().filter(|&(_, &count)| count > 1) {
        let top_level = find_placeholders(doc, tag).len();
        if top_level > 1 {
            result.add(Diagnostic::new(
                DiagnosticLevel::Info,
                format!(
                    "tag '{}' is used by {} top-level controls, all receive the same content",
                    tag, top_level
                ),
            ));
        }
    }

    result
}

/// A control whose body is (or directly wraps) a table
fn is_table_control(doc: &Document, sdt: NodeId) -> bool {
    doc.child(sdt, SDT_CONTENT)
        .map_or(false, |content| doc.child(content, TABLE).is_some())
}

fn cells_hold_controls(doc: &Document, sdt: NodeId) -> bool {
    doc.descendants(sdt, TABLE_CELL)
        .into_iter()
        .any(|cell| !doc.descendants(cell, SDT).is_empty())
}

/// Element path from the root, with 1-based positions among same-named siblings
fn node_path(doc: &Document, id: NodeId) -> String {
    let mut segments = Vec::new();
    let mut current = Some(id);
    while let Some(node) = current {
        let Some(name) = doc.name(node) else {
            break;
        };
        let segment = match doc.parent(node) {
            Some(parent) => {
                let same: Vec<NodeId> = doc
                    .children(parent)
                    .iter()
                    .copied()
                    .filter(|&c| doc.is(c, name))
                    .collect();
                if same.len() > 1 {
                    let index = same.iter().position(|&c| c == node).unwrap_or(0) + 1;
                    format!("{}[{}]", name, index)
                } else {
                    name.to_string()
                }
            }
            None => name.to_string(),
        };
        segments.push(segment);
        current = doc.parent(node);
    }
    segments.reverse();
    format!("/{}", segments.join("/"))
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ProcessError;

    const TABLE_WITHOUT_CELL_CONTROLS: &str = r#"<w:body><w:sdt><w:sdtPr><w:tag w:val="Team"/></w:sdtPr><w:sdtContent><w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl></w:sdtContent></w:sdt></w:body>"#;

    #[test]
    fn test_untagged_control_warning() {
        let doc = Document::parse(
            r#"<w:body><w:p/><w:p><w:sdt><w:sdtPr/><w:sdtContent/></w:sdt></w:p></w:body>"#,
        )
        .unwrap();
        let result = check_template(&doc);
        assert_eq!(result.warnings, 1);
        assert_eq!(
            result.diagnostics[0].path.as_deref(),
            Some("/w:body/w:p[2]/w:sdt")
        );
    }

    #[test]
    fn test_table_without_cell_controls() {
        let doc = Document::parse(TABLE_WITHOUT_CELL_CONTROLS).unwrap();
        let result = check_template(&doc);
        assert!(result.has_errors());
        assert!(result.diagnostics[0].message.contains("'Team'"));
    }

    #[test]
    fn test_duplicate_top_level_tags() {
        let control = r#"<w:sdt><w:sdtPr><w:tag w:val="Name"/></w:sdtPr><w:sdtContent/></w:sdt>"#;
        let doc = Document::parse(&format!("<w:body>{}{}</w:body>", control, control)).unwrap();
        let result = check_template(&doc);
        assert_eq!(result.infos, 1);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_clean_template() {
        let doc = Document::parse(
            r#"<w:body><w:sdt><w:sdtPr><w:tag w:val="Name"/></w:sdtPr><w:sdtContent/></w:sdt></w:body>"#,
        )
        .unwrap();
        let result = check_template(&doc);
        assert!(result.is_empty());
        assert_eq!(result.summary(), "no issues found");
    }

    #[test]
    fn test_report_errors() {
        let result = ProcessResult::error(ProcessError::placeholder_not_found("Team", "Table"));
        let check = report(&result);
        assert_eq!(check.errors, 1);
        assert_eq!(check.diagnostics[0].message, "Table content control 'Team' not found");
        assert!(check.diagnostics[0]
            .suggestion
            .as_deref()
            .unwrap()
            .contains("'Team'"));
    }

    #[test]
    fn test_summary_format() {
        let mut result = CheckResult::new();
        result.add(Diagnostic::new(DiagnosticLevel::Error, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));

        let summary = result.summary();
        assert!(summary.contains("1 error"));
        assert!(summary.contains("1 warning"));
    }

    #[test]
    fn test_format_without_color() {
        let mut result = CheckResult::new();
        result.add(Diagnostic::new(DiagnosticLevel::Error, "broken").with_path("/w:body"));
        let text = format_diagnostics(&result, false);
        assert!(text.starts_with("error: broken\n  --> /w:body"));
        assert!(text.ends_with("Summary: 1 error"));
    }
}
