//! # docx-template
//!
//! Fills WordprocessingML templates: content controls (`w:sdt`) tagged with
//! a name receive typed content, and tables wrapped in a control are grown
//! row by row from a prototype, merged cells included.
//!
//! ## Features
//!
//! - **Repeating tables**: multi-row prototypes, vertical merge continuation,
//!   nested tables and controls inside cells
//! - **Merge regions**: vertical and horizontal cell merges on the generated grid
//! - **Checkboxes and text fields**
//! - **Collected errors**: one bad item never stops the rest of the batch
//! - **Template lint**: untagged controls, tables without cell controls
//!
//! ## Usage
//!
//! ```rust
//! use docx_template::{fill_xml, ContentItem, FieldContent, FillOptions, RowData, TableContent};
//!
//! let template = r#"<w:body><w:sdt><w:sdtPr><w:tag w:val="Team"/></w:sdtPr><w:sdtContent><w:tbl><w:tr><w:tc><w:sdt><w:sdtPr><w:tag w:val="Name"/></w:sdtPr><w:sdtContent><w:p/></w:sdtContent></w:sdt></w:tc></w:tr></w:tbl></w:sdtContent></w:sdt></w:body>"#;
//!
//! let team = TableContent::new("Team").with_rows(vec![
//!     RowData::new(vec![FieldContent::new("Name", "Ada").into()]),
//!     RowData::new(vec![FieldContent::new("Name", "Grace").into()]),
//! ]);
//!
//! let items: Vec<ContentItem> = vec![team.into()];
//! let (xml, result) = fill_xml(template, &items, FillOptions::clean()).unwrap();
//! assert!(result.success());
//! assert!(xml.contains("Ada") && xml.contains("Grace"));
//! assert!(!xml.contains("w:sdt"));
//! ```

/// Content model: the typed items a template is filled with
pub mod content;

/// Fill engine
pub mod core;

/// Data layer - element names and schema tables
pub mod data;

/// Markup tree layer
pub mod dom;

/// Utility modules
pub mod utils;

// Re-export the content model
pub use content::{
    CheckBoxContent, ContentItem, FieldContent, MergeRegion, RowData, TableContent,
};

#[cfg(feature = "data-loading")]
pub use content::loading;

// Re-export the engine
pub use crate::core::{
    CheckBoxProcessor, ContentProcessor, FieldProcessor, FillOptions, ProcessResult, Processor,
    TableProcessor, TemplateProcessor,
};

pub use dom::{Document, NodeId};

// Re-export data modules
pub use data::names;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{ProcessError, TemplateError, TemplateResult};

/// Fill a parsed document in place
pub fn fill_document(
    doc: &mut Document,
    items: &[ContentItem],
    options: FillOptions,
) -> ProcessResult {
    TemplateProcessor::new(options).fill(doc, items)
}

/// Parse a document part, fill it and serialize it again.
///
/// Item errors are reported through the returned [`ProcessResult`]; only
/// malformed XML fails the call.
pub fn fill_xml(
    xml: &str,
    items: &[ContentItem],
    options: FillOptions,
) -> TemplateResult<(String, ProcessResult)> {
    let mut doc = Document::parse(xml)?;
    let result = fill_document(&mut doc, items, options);
    Ok((doc.to_xml()?, result))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:sdt><w:sdtPr><w:tag w:val="Agree"/></w:sdtPr><w:sdtContent><w:r><w:fldChar><w:ffData><w:checkBox><w:default w:val="0"/></w:checkBox></w:ffData></w:fldChar></w:r></w:sdtContent></w:sdt></w:p></w:body></w:document>"#;

    #[test]
    fn test_fill_xml_keeps_declaration() {
        let items: Vec<ContentItem> = vec![CheckBoxContent::new("Agree", true).into()];
        let (xml, result) = fill_xml(FORM, &items, FillOptions::new()).unwrap();
        assert!(result.success());
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<w:checked w:val="1"/>"#));
        assert!(xml.contains("xmlns:w="));
    }

    #[test]
    fn test_fill_xml_rejects_malformed_input() {
        let err = fill_xml("<w:body><w:p></w:body>", &[], FillOptions::new()).unwrap_err();
        assert!(matches!(err, TemplateError::XmlError { .. }));
    }

    #[test]
    fn test_fill_document_reports_missing() {
        let mut doc = Document::parse(FORM).unwrap();
        let items: Vec<ContentItem> = vec![FieldContent::new("Missing", "x").into()];
        let result = fill_document(&mut doc, &items, FillOptions::new());
        assert!(!result.success());
        assert!(result.errors()[0].is_placeholder_not_found());
    }
}
