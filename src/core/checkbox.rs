//! Legacy form checkbox filling

use crate::content::ContentItem;
use crate::core::context::FillOptions;
use crate::core::dispatch::Processor;
use crate::core::result::ProcessResult;
use crate::data::names::{CHECKED, CHECK_BOX, DEFAULT, SDT_CONTENT, VAL};
use crate::dom::{Document, NodeId};
use crate::utils::error::ProcessError;

/// Sets the checked and default state of a `w:checkBox` inside a control
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckBoxProcessor {
    options: FillOptions,
}

impl CheckBoxProcessor {
    pub fn new(options: FillOptions) -> Self {
        CheckBoxProcessor { options }
    }
}

impl Processor for CheckBoxProcessor {
    fn options(&self) -> FillOptions {
        self.options
    }

    fn fill_item(
        &self,
        doc: &mut Document,
        placeholder: Option<NodeId>,
        item: &ContentItem,
    ) -> ProcessResult {
        let ContentItem::CheckBox(check_box) = item else {
            return ProcessResult::not_handled();
        };

        let Some(placeholder) = placeholder else {
            return ProcessResult::error(ProcessError::placeholder_not_found(
                &check_box.name,
                item.kind_name(),
            ));
        };

        // A control without a checkbox is not ours: leave it to other processors
        if fill_check_box(doc, placeholder, check_box.checked) {
            ProcessResult::handled(item)
        } else {
            ProcessResult::not_handled()
        }
    }
}

fn fill_check_box(doc: &mut Document, placeholder: NodeId, checked: bool) -> bool {
    let Some(content) = doc.child(placeholder, SDT_CONTENT) else {
        return false;
    };
    let Some(check_box) = doc.descendants_and_self(content, CHECK_BOX).first().copied() else {
        return false;
    };

    let value = if checked { "1" } else { "0" };

    // CT_FFCheckBox orders w:default before w:checked
    match doc.child(check_box, DEFAULT) {
        Some(default) => doc.set_attr(default, VAL, value),
        None => {
            let default = doc.create_element(DEFAULT);
            doc.set_attr(default, VAL, value);
            match doc.child(check_box, CHECKED) {
                Some(existing) => doc.insert_before(existing, default),
                None => doc.append_child(check_box, default),
            }
        }
    }

    match doc.child(check_box, CHECKED) {
        Some(state) => doc.set_attr(state, VAL, value),
        None => {
            let state = doc.create_element(CHECKED);
            doc.set_attr(state, VAL, value);
            doc.append_child(check_box, state);
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CheckBoxContent;
    use pretty_assertions::assert_eq;

    fn template(check_box: &str) -> String {
        format!(
            r#"<w:p><w:sdt><w:sdtPr><w:tag w:val="Agree"/></w:sdtPr><w:sdtContent><w:r><w:fldChar><w:ffData>{}</w:ffData></w:fldChar></w:r></w:sdtContent></w:sdt></w:p>"#,
            check_box
        )
    }

    fn fill(xml: &str, checked: bool) -> (Document, ProcessResult) {
        let mut doc = Document::parse(xml).unwrap();
        let p = doc.root_element().unwrap();
        let sdt = doc.child(p, "w:sdt").unwrap();
        let item: ContentItem = CheckBoxContent::new("Agree", checked).into();
        let result = CheckBoxProcessor::default().fill_content(&mut doc, Some(sdt), &[item]);
        (doc, result)
    }

    #[test]
    fn test_existing_state_is_updated() {
        let xml = template(r#"<w:checkBox><w:sizeAuto/><w:default w:val="0"/><w:checked w:val="0"/></w:checkBox>"#);
        let (doc, result) = fill(&xml, true);
        assert!(result.success());
        assert!(result.is_handled());
        let cb = doc.descendants(doc.root(), "w:checkBox")[0];
        assert_eq!(
            doc.outer_xml(cb).unwrap(),
            r#"<w:checkBox><w:sizeAuto/><w:default w:val="1"/><w:checked w:val="1"/></w:checkBox>"#
        );
    }

    #[test]
    fn test_missing_state_elements_are_created() {
        let xml = template(r#"<w:checkBox><w:sizeAuto/></w:checkBox>"#);
        let (doc, result) = fill(&xml, false);
        assert!(result.success());
        let cb = doc.descendants(doc.root(), "w:checkBox")[0];
        assert_eq!(
            doc.outer_xml(cb).unwrap(),
            r#"<w:checkBox><w:sizeAuto/><w:default w:val="0"/><w:checked w:val="0"/></w:checkBox>"#
        );
    }

    #[test]
    fn test_default_inserted_before_checked() {
        let xml = template(r#"<w:checkBox><w:checked w:val="0"/></w:checkBox>"#);
        let (doc, _) = fill(&xml, true);
        let cb = doc.descendants(doc.root(), "w:checkBox")[0];
        assert_eq!(
            doc.outer_xml(cb).unwrap(),
            r#"<w:checkBox><w:default w:val="1"/><w:checked w:val="1"/></w:checkBox>"#
        );
    }

    #[test]
    fn test_control_without_checkbox_is_not_handled() {
        let xml = template("<w:textInput/>");
        let (doc, result) = fill(&xml, true);
        assert!(result.is_not_handled());
        assert!(doc.descendants(doc.root(), "w:checked").is_empty());
    }
}
