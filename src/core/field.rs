//! Plain text filling

use crate::content::ContentItem;
use crate::core::context::FillOptions;
use crate::core::dispatch::Processor;
use crate::core::result::ProcessResult;
use crate::data::names::{
    PARAGRAPH, RUN, RUN_PR, SDT_CONTENT, SDT_PR, SHOWING_PLACEHOLDER, TEXT, XML_SPACE,
};
use crate::dom::{Document, NodeId};
use crate::utils::error::ProcessError;

/// Writes a text value into the first run of a control
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldProcessor {
    options: FillOptions,
}

impl FieldProcessor {
    pub fn new(options: FillOptions) -> Self {
        FieldProcessor { options }
    }
}

impl Processor for FieldProcessor {
    fn options(&self) -> FillOptions {
        self.options
    }

    fn fill_item(
        &self,
        doc: &mut Document,
        placeholder: Option<NodeId>,
        item: &ContentItem,
    ) -> ProcessResult {
        let ContentItem::Field(field) = item else {
            return ProcessResult::not_handled();
        };

        let Some(placeholder) = placeholder else {
            return ProcessResult::error(ProcessError::placeholder_not_found(
                &field.name,
                item.kind_name(),
            ));
        };

        if field.is_hidden {
            doc.detach(placeholder);
            return ProcessResult::handled(item);
        }

        let Some(content) = doc.child(placeholder, SDT_CONTENT) else {
            return ProcessResult::error(ProcessError::malformed(
                &field.name,
                item.kind_name(),
                "has no content body",
            ));
        };

        set_field_text(doc, content, &field.value);

        // The prompt text formatting no longer applies
        if let Some(pr) = doc.child(placeholder, SDT_PR) {
            if let Some(showing) = doc.child(pr, SHOWING_PLACEHOLDER) {
                doc.detach(showing);
            }
        }

        ProcessResult::handled(item)
    }
}

/// Put `value` in the first `w:t` and drop the others.
///
/// Run and paragraph formatting of the first run is kept.
fn set_field_text(doc: &mut Document, content: NodeId, value: &str) {
    let texts = doc.descendants(content, TEXT);
    if let Some((&first, rest)) = texts.split_first() {
        doc.set_text(first, value);
        doc.set_attr(first, XML_SPACE, "preserve");
        for &text in rest {
            let run = doc.parent(text);
            doc.detach(text);
            if let Some(run) = run.filter(|&run| is_empty_run(doc, run)) {
                doc.detach(run);
            }
        }
        return;
    }

    let run = match doc.descendants(content, RUN).first().copied() {
        Some(run) => run,
        None => {
            let run = doc.create_element(RUN);
            match doc.descendants(content, PARAGRAPH).first().copied() {
                Some(paragraph) => doc.append_child(paragraph, run),
                None => doc.append_child(content, run),
            }
            run
        }
    };

    let text = doc.create_element(TEXT);
    doc.set_attr(text, XML_SPACE, "preserve");
    doc.set_text(text, value);
    doc.append_child(run, text);
}

/// A run left with nothing but its properties
fn is_empty_run(doc: &Document, run: NodeId) -> bool {
    doc.name(run) == Some(RUN)
        && doc
            .child_elements(run)
            .into_iter()
            .all(|child| doc.name(child) == Some(RUN_PR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FieldContent;
    use pretty_assertions::assert_eq;

    fn fill(xml: &str, field: FieldContent, options: FillOptions) -> (Document, ProcessResult) {
        let mut doc = Document::parse(xml).unwrap();
        let root = doc.root_element().unwrap();
        let sdt = doc.descendants(root, "w:sdt")[0];
        let item: ContentItem = field.into();
        let result = FieldProcessor::new(options).fill_content(&mut doc, Some(sdt), &[item]);
        (doc, result)
    }

    #[test]
    fn test_first_text_replaced_rest_dropped() {
        let xml = r#"<w:p><w:sdt><w:sdtPr><w:tag w:val="Name"/><w:showingPlcHdr/></w:sdtPr><w:sdtContent><w:r><w:rPr><w:b/></w:rPr><w:t>Click</w:t></w:r><w:r><w:t> here</w:t></w:r></w:sdtContent></w:sdt></w:p>"#;
        let (doc, result) = fill(xml, FieldContent::new("Name", "Eric"), FillOptions::new());
        assert!(result.success());
        assert_eq!(
            doc.to_xml().unwrap(),
            r#"<w:p><w:sdt><w:sdtPr><w:tag w:val="Name"/></w:sdtPr><w:sdtContent><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Eric</w:t></w:r></w:sdtContent></w:sdt></w:p>"#
        );
    }

    #[test]
    fn test_emptied_runs_dropped_others_kept() {
        let xml = r#"<w:p><w:sdt><w:sdtPr><w:tag w:val="Name"/></w:sdtPr><w:sdtContent><w:r><w:t>a</w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>b</w:t></w:r><w:r><w:tab/><w:t>c</w:t></w:r></w:sdtContent></w:sdt></w:p>"#;
        let (doc, result) = fill(xml, FieldContent::new("Name", "Eric"), FillOptions::new());
        assert!(result.success());
        assert_eq!(
            doc.to_xml().unwrap(),
            r#"<w:p><w:sdt><w:sdtPr><w:tag w:val="Name"/></w:sdtPr><w:sdtContent><w:r><w:t xml:space="preserve">Eric</w:t></w:r><w:r><w:tab/></w:r></w:sdtContent></w:sdt></w:p>"#
        );
    }

    #[test]
    fn test_run_created_in_empty_paragraph() {
        let xml = r#"<w:tc><w:sdt><w:sdtPr><w:tag w:val="Name"/></w:sdtPr><w:sdtContent><w:p/></w:sdtContent></w:sdt></w:tc>"#;
        let (doc, _) = fill(xml, FieldContent::new("Name", "Bob"), FillOptions::clean());
        assert_eq!(
            doc.to_xml().unwrap(),
            r#"<w:tc><w:p><w:r><w:t xml:space="preserve">Bob</w:t></w:r></w:p></w:tc>"#
        );
    }

    #[test]
    fn test_hidden_field_removes_control() {
        let xml = r#"<w:p><w:sdt><w:sdtPr><w:tag w:val="Name"/></w:sdtPr><w:sdtContent><w:r><w:t>x</w:t></w:r></w:sdtContent></w:sdt></w:p>"#;
        let (doc, result) = fill(xml, FieldContent::new("Name", "x").hidden(), FillOptions::clean());
        assert!(result.is_handled());
        assert_eq!(doc.to_xml().unwrap(), "<w:p/>");
    }
}
