//! Whole-document fill pass

use crate::content::ContentItem;
use crate::core::context::FillOptions;
use crate::core::dispatch::ContentProcessor;
use crate::core::result::ProcessResult;
use crate::data::names::{SDT, TABLE_CELL};
use crate::dom::{Document, NodeId};
use crate::utils::error::ProcessError;

/// Fills a list of items into a document, locating each item's controls by tag.
///
/// Each item is independent: a missing or malformed placeholder is recorded
/// and the remaining items are still filled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateProcessor {
    options: FillOptions,
}

impl TemplateProcessor {
    pub fn new(options: FillOptions) -> Self {
        TemplateProcessor { options }
    }

    pub fn options(&self) -> FillOptions {
        self.options
    }

    /// Fill every item, in order
    pub fn fill(&self, doc: &mut Document, items: &[ContentItem]) -> ProcessResult {
        let dispatcher = ContentProcessor::new(self.options);
        let mut result = ProcessResult::not_handled();

        for item in items {
            let placeholders = find_placeholders(doc, item.name());
            if placeholders.is_empty() {
                result.add_error(ProcessError::placeholder_not_found(
                    item.name(),
                    item.kind_name(),
                ));
                continue;
            }

            log::debug!(
                "{} '{}': {} placeholder(s)",
                item.kind_name(),
                item.name(),
                placeholders.len()
            );
            for placeholder in placeholders {
                // An earlier fill of the same item may have removed it
                if !doc.is_attached(placeholder) {
                    continue;
                }
                result.merge(dispatcher.fill_claimed(doc, placeholder, item));
            }
        }

        result
    }
}

/// Outermost controls tagged `name` that are not part of a repeating table
pub fn find_placeholders(doc: &Document, name: &str) -> Vec<NodeId> {
    doc.descendants(doc.root(), SDT)
        .into_iter()
        .filter(|&sdt| doc.placeholder_tag(sdt) == Some(name))
        .filter(|&sdt| !has_tagged_ancestor(doc, sdt, name))
        .filter(|&sdt| !in_repeating_region(doc, sdt))
        .collect()
}

fn has_tagged_ancestor(doc: &Document, sdt: NodeId, name: &str) -> bool {
    doc.parent(sdt).map_or(false, |parent| {
        doc.ancestors_and_self(parent, SDT)
            .into_iter()
            .any(|outer| doc.placeholder_tag(outer) == Some(name))
    })
}

/// Whether `sdt` sits in a table cell that is itself inside a control.
///
/// Such controls are filled per row by the enclosing table item.
fn in_repeating_region(doc: &Document, sdt: NodeId) -> bool {
    let mut in_cell = false;
    let mut current = doc.parent(sdt);
    while let Some(node) = current {
        if doc.is(node, TABLE_CELL) {
            in_cell = true;
        } else if in_cell && doc.is(node, SDT) {
            return true;
        }
        current = doc.parent(node);
    }
    false
}
