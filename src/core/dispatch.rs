//! Processor contract and the per-kind dispatcher

use crate::content::ContentItem;
use crate::core::checkbox::CheckBoxProcessor;
use crate::core::context::FillOptions;
use crate::core::field::FieldProcessor;
use crate::core::result::ProcessResult;
use crate::core::table::TableProcessor;
use crate::dom::{Document, NodeId};
use crate::utils::error::ProcessError;

/// Fills one kind of content into a content control.
///
/// A processor that receives an item of another kind returns
/// [`ProcessResult::not_handled`] without touching the tree. A missing
/// placeholder (`None`) is recorded as an error for items the processor
/// does handle.
pub trait Processor {
    fn options(&self) -> FillOptions;

    /// Fill a single item
    fn fill_item(
        &self,
        doc: &mut Document,
        placeholder: Option<NodeId>,
        item: &ContentItem,
    ) -> ProcessResult;

    /// Remove the content control once its content is in place
    fn remove_wrapper(&self, doc: &mut Document, placeholder: NodeId) {
        doc.unwrap_placeholder(placeholder);
    }

    /// Fill every item into the same placeholder and merge the results.
    ///
    /// Items nobody claimed are skipped. When something was handled
    /// without errors and the options ask for it, the wrapper is removed.
    fn fill_content(
        &self,
        doc: &mut Document,
        placeholder: Option<NodeId>,
        items: &[ContentItem],
    ) -> ProcessResult {
        let mut result = ProcessResult::not_handled();

        for item in items {
            let item_result = self.fill_item(doc, placeholder, item);
            if item_result.is_not_handled() {
                continue;
            }
            result.merge(item_result);
        }

        if result.is_handled() && result.success() && self.options().remove_wrapper_on_success {
            if let Some(placeholder) = placeholder {
                // Hidden items may already have removed the control
                if doc.parent(placeholder).is_some() {
                    self.remove_wrapper(doc, placeholder);
                }
            }
        }

        result
    }
}

/// Routes each item to the processor for its kind
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentProcessor {
    options: FillOptions,
}

impl ContentProcessor {
    pub fn new(options: FillOptions) -> Self {
        ContentProcessor { options }
    }

    /// Fill `item` into a placeholder already matched by tag.
    ///
    /// The tag matched, so a result nobody claimed means the control's
    /// structure does not fit the item's kind.
    pub fn fill_claimed(
        &self,
        doc: &mut Document,
        placeholder: NodeId,
        item: &ContentItem,
    ) -> ProcessResult {
        let result = self.fill_item(doc, Some(placeholder), item);
        if result.is_not_handled() {
            return ProcessResult::error(ProcessError::malformed(
                item.name(),
                item.kind_name(),
                "has no matching structure in its content control",
            ));
        }
        result
    }
}

impl Processor for ContentProcessor {
    fn options(&self) -> FillOptions {
        self.options
    }

    fn fill_item(
        &self,
        doc: &mut Document,
        placeholder: Option<NodeId>,
        item: &ContentItem,
    ) -> ProcessResult {
        let items = std::slice::from_ref(item);
        match item {
            ContentItem::Table(_) => {
                TableProcessor::new(self.options).fill_content(doc, placeholder, items)
            }
            ContentItem::CheckBox(_) => {
                CheckBoxProcessor::new(self.options).fill_content(doc, placeholder, items)
            }
            ContentItem::Field(_) => {
                FieldProcessor::new(self.options).fill_content(doc, placeholder, items)
            }
        }
    }

    // The kind processors remove their own wrappers
    fn remove_wrapper(&self, _doc: &mut Document, _placeholder: NodeId) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CheckBoxContent, FieldContent, TableContent};

    const CHECKBOX: &str = r#"<w:body><w:sdt><w:sdtPr><w:tag w:val="Agree"/></w:sdtPr><w:sdtContent><w:r><w:fldChar><w:ffData><w:checkBox><w:sizeAuto/><w:default w:val="0"/></w:checkBox></w:ffData></w:fldChar></w:r></w:sdtContent></w:sdt></w:body>"#;

    fn placeholder(doc: &Document) -> NodeId {
        let body = doc.root_element().unwrap();
        doc.descendants(body, "w:sdt")[0]
    }

    #[test]
    fn test_dispatch_by_kind() {
        let mut doc = Document::parse(CHECKBOX).unwrap();
        let sdt = placeholder(&doc);
        let item: ContentItem = CheckBoxContent::new("Agree", true).into();

        let result = ContentProcessor::default().fill_content(&mut doc, Some(sdt), &[item.clone()]);
        assert!(result.success());
        assert!(result.is_item_handled(&item));
    }

    #[test]
    fn test_missing_placeholder_is_reported_per_item() {
        let mut doc = Document::parse(CHECKBOX).unwrap();
        let items: Vec<ContentItem> = vec![
            CheckBoxContent::new("Agree", true).into(),
            TableContent::new("Team").into(),
        ];

        let result = ContentProcessor::default().fill_content(&mut doc, None, &items);
        assert!(!result.success());
        assert!(!result.is_handled());
        assert_eq!(
            result.errors(),
            &[
                ProcessError::placeholder_not_found("Agree", "CheckBox"),
                ProcessError::placeholder_not_found("Team", "Table"),
            ]
        );
    }

    #[test]
    fn test_kind_processor_ignores_other_kinds() {
        let mut doc = Document::parse(CHECKBOX).unwrap();
        let before = doc.to_xml().unwrap();
        let sdt = placeholder(&doc);
        let item: ContentItem = FieldContent::new("Agree", "yes").into();

        let result = CheckBoxProcessor::new(FillOptions::clean()).fill_content(
            &mut doc,
            Some(sdt),
            &[item],
        );
        assert!(result.is_not_handled());
        assert_eq!(doc.to_xml().unwrap(), before);
    }

    #[test]
    fn test_wrapper_removed_on_success() {
        let mut doc = Document::parse(CHECKBOX).unwrap();
        let sdt = placeholder(&doc);
        let item: ContentItem = CheckBoxContent::new("Agree", false).into();

        let result = ContentProcessor::new(FillOptions::clean()).fill_content(
            &mut doc,
            Some(sdt),
            &[item],
        );
        assert!(result.success());
        let body = doc.root_element().unwrap();
        assert!(doc.descendants(body, "w:sdt").is_empty());
        assert_eq!(doc.descendants(body, "w:checkBox").len(), 1);
    }
}
