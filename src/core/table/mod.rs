//! Repeating table engine
//!
//! Fills a table wrapped by a content control with one row group per data
//! row, then rebuilds the requested cell merges on the generated grid.
//!
//! # Architecture
//!
//! ```text
//! placeholder -> prototype rows (+ vertical merge continuation)
//!             -> clone per data row, fill nested controls recursively
//!             -> insert clones, drop prototype
//!             -> vertical merges, then horizontal merges
//! ```
//!
//! The rewrite is not transactional: when an error is recorded the rows
//! already generated stay in the tree.

mod merge;
mod prototype;


use crate::content::{ContentItem, TableContent};
use crate::core::context::FillOptions;
use crate::core::dispatch::{ContentProcessor, Processor};
use crate::core::result::ProcessResult;
use crate::data::names::{
    MERGE_CONTINUE, MERGE_RESTART, SDT, TABLE, TABLE_CELL, TABLE_CELL_PR, TABLE_ROW, VAL, V_MERGE,
};
use crate::dom::{Document, NodeId};
use crate::utils::error::ProcessError;

pub use merge::{apply_merges, set_cell_marker};
use prototype::{check_coverage, select_prototype, Coverage};

/// Vertical merge state of a cell, read from `w:tcPr/w:vMerge`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalMerge {
    /// Starts a vertical span
    Restart,
    /// Continues the span above (no value or `continue`)
    Continue,
    /// Any value Word does not define
    Other,
}

/// Rows of `tbl`, not including rows of tables nested in its cells
pub fn table_rows(doc: &Document, tbl: NodeId) -> Vec<NodeId> {
    doc.scoped_descendants(tbl, TABLE_ROW, TABLE)
}

/// Cells of `row`, not including cells of nested tables
pub fn row_cells(doc: &Document, row: NodeId) -> Vec<NodeId> {
    doc.scoped_descendants(row, TABLE_CELL, TABLE)
}

pub fn vertical_merge(doc: &Document, cell: NodeId) -> Option<VerticalMerge> {
    let pr = doc.child(cell, TABLE_CELL_PR)?;
    let marker = doc.child(pr, V_MERGE)?;
    Some(match doc.attr(marker, VAL) {
        None | Some(MERGE_CONTINUE) => VerticalMerge::Continue,
        Some(MERGE_RESTART) => VerticalMerge::Restart,
        Some(_) => VerticalMerge::Other,
    })
}

/// Whether any cell below `placeholder` holds a content control
fn has_cell_placeholders(doc: &Document, placeholder: NodeId) -> bool {
    doc.descendants(placeholder, TABLE_CELL)
        .into_iter()
        .any(|cell| !doc.descendants(cell, SDT).is_empty())
}

/// Fills repeating tables
#[derive(Debug, Clone, Copy, Default)]
pub struct TableProcessor {
    options: FillOptions,
}

impl TableProcessor {
    pub fn new(options: FillOptions) -> Self {
        TableProcessor { options }
    }

    fn fill_table(
        &self,
        doc: &mut Document,
        placeholder: NodeId,
        item: &ContentItem,
        table: &TableContent,
    ) -> ProcessResult {
        let kind = item.kind_name();
        let mut result = ProcessResult::not_handled();

        if !has_cell_placeholders(doc, placeholder) {
            result.add_error(ProcessError::malformed(
                &table.name,
                kind,
                "doesn't contain content controls in cells",
            ));
            return result;
        }

        if table.is_hidden || table.rows.is_empty() {
            for tbl in doc.first_level_descendants_and_self(placeholder, TABLE) {
                doc.detach(tbl);
            }
            log::debug!("table '{}' removed (hidden or no rows)", table.name);
            result.add_handled(item);
            return result;
        }

        let Some(tbl) = doc.descendants(placeholder, TABLE).first().copied() else {
            result.add_error(ProcessError::malformed(&table.name, kind, "doesn't contain a table"));
            return result;
        };

        let field_names = table.field_names();
        let rows = table_rows(doc, tbl);
        let Some(mut prototype) = select_prototype(doc, &rows, &field_names) else {
            result.add_error(ProcessError::malformed(
                &table.name,
                kind,
                "doesn't contain rows with cell content controls",
            ));
            return result;
        };

        match check_coverage(doc, &prototype, &field_names) {
            Coverage::Complete => {}
            Coverage::Narrowed { keep, discard } => {
                log::debug!(
                    "table '{}': prototype narrowed to the row holding every field",
                    table.name
                );
                for row in discard {
                    doc.detach(row);
                }
                prototype = vec![keep];
            }
            Coverage::Missing(missing) => {
                result.add_error(ProcessError::malformed(
                    &table.name,
                    kind,
                    format!(
                        "doesn't contain rows with cell content {} {}",
                        if missing.len() > 1 { "controls" } else { "control" },
                        missing
                            .iter()
                            .map(|name| format!("'{}'", name))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                ));
            }
            Coverage::Ambiguous(count) => {
                result.add_error(ProcessError::malformed(
                    &table.name,
                    kind,
                    format!(
                        "has {} alternative rows holding every field, cannot pick one",
                        count
                    ),
                ));
            }
        }

        log::debug!(
            "table '{}': {} prototype row(s), {} data row(s)",
            table.name,
            prototype.len(),
            table.rows.len()
        );

        let nested = ContentProcessor::new(self.options);
        let Some(&last) = prototype.last() else {
            return result;
        };
        let mut anchor = last;

        for row in &table.rows {
            let group: Vec<NodeId> = prototype.iter().map(|&r| doc.deep_clone(r)).collect();

            let controls: Vec<NodeId> = group
                .iter()
                .flat_map(|&r| doc.first_level_descendants_and_self(r, SDT))
                .collect();
            for sdt in controls {
                let Some(field_name) = doc.placeholder_tag(sdt).map(str::to_owned) else {
                    continue;
                };
                let Some(content) = row.get_content_item(&field_name) else {
                    continue;
                };
                result.merge(nested.fill_claimed(doc, sdt, content));
            }

            for clone in group {
                doc.insert_after(anchor, clone);
                anchor = clone;
            }
        }

        for row in prototype {
            doc.detach(row);
        }

        if !table.merges.is_empty() {
            apply_merges(doc, tbl, &table.merges, &table.name, &mut result);
        }

        result.add_handled(item);
        result
    }
}

impl Processor for TableProcessor {
    fn options(&self) -> FillOptions {
        self.options
    }

    fn fill_item(
        &self,
        doc: &mut Document,
        placeholder: Option<NodeId>,
        item: &ContentItem,
    ) -> ProcessResult {
        let ContentItem::Table(table) = item else {
            return ProcessResult::not_handled();
        };

        match placeholder {
            Some(placeholder) => self.fill_table(doc, placeholder, item, table),
            None => ProcessResult::error(ProcessError::placeholder_not_found(
                &table.name,
                item.kind_name(),
            )),
        }
    }

    /// Unwraps the table control and every control around it
    fn remove_wrapper(&self, doc: &mut Document, placeholder: NodeId) {
        for sdt in doc.ancestors_and_self(placeholder, SDT) {
            doc.unwrap_placeholder(sdt);
        }
    }
}
