//! Prototype row group detection

use fxhash::FxHashSet;

use super::{row_cells, vertical_merge, VerticalMerge};
use crate::data::names::SDT;
use crate::dom::{Document, NodeId};

/// Select the rows cloned once per data row.
///
/// The group runs from the first to the last row holding a control for one
/// of `field_names` (any control when there are none), then extends over
/// following rows that continue a vertical merge still open at the last
/// row. Returns `None` when no row qualifies.
pub(super) fn select_prototype(
    doc: &Document,
    rows: &[NodeId],
    field_names: &[&str],
) -> Option<Vec<NodeId>> {
    let is_field_control = |sdt: NodeId| {
        field_names.is_empty()
            || doc
                .placeholder_tag(sdt)
                .map_or(false, |tag| field_names.contains(&tag))
    };

    let carrying: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, &row)| doc.descendants(row, SDT).into_iter().any(is_field_control))
        .map(|(i, _)| i)
        .collect();

    let first = *carrying.first()?;
    let last = *carrying.last()?;
    let mut group = rows[first..=last].to_vec();

    // Columns whose merge may continue below the last data row
    let mut active: Vec<bool> = row_cells(doc, rows[last])
        .into_iter()
        .map(|cell| vertical_merge(doc, cell).is_some())
        .collect();

    for &row in &rows[last + 1..] {
        if !active.iter().any(|&a| a) {
            break;
        }

        let next: Vec<bool> = row_cells(doc, row)
            .into_iter()
            .zip(active.iter().chain(std::iter::repeat(&false)))
            .map(|(cell, &was_active)| {
                was_active && vertical_merge(doc, cell) == Some(VerticalMerge::Continue)
            })
            .collect();

        if !next.iter().any(|&a| a) {
            break;
        }
        group.push(row);
        active = next;
    }

    Some(group)
}

/// How well a prototype covers the table's field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Coverage {
    /// Every field has a control in the group
    Complete,
    /// Alternative row shapes: exactly one row holds every field on its own
    Narrowed { keep: NodeId, discard: Vec<NodeId> },
    /// Fields with no control anywhere in the group
    Missing(Vec<String>),
    /// Several rows each hold every field
    Ambiguous(usize),
}

fn first_level_tags(doc: &Document, row: NodeId) -> FxHashSet<String> {
    doc.first_level_descendants_and_self(row, SDT)
        .into_iter()
        .filter_map(|sdt| doc.placeholder_tag(sdt).map(str::to_owned))
        .collect()
}

/// Compare the prototype's controls against `field_names`.
///
/// Rows that carry field controls are the candidates. When more than one
/// candidate exists and some candidate holds every field by itself, the
/// rows are alternative shapes of one record and exactly one must match.
pub(super) fn check_coverage(
    doc: &Document,
    prototype: &[NodeId],
    field_names: &[&str],
) -> Coverage {
    let all_tags: FxHashSet<String> = prototype
        .iter()
        .flat_map(|&row| doc.descendants(row, SDT))
        .filter_map(|sdt| doc.placeholder_tag(sdt).map(str::to_owned))
        .collect();

    let missing: Vec<String> = field_names
        .iter()
        .filter(|name| !all_tags.contains(**name))
        .map(|name| name.to_string())
        .collect();

    let row_tags: Vec<(NodeId, FxHashSet<String>)> = prototype
        .iter()
        .map(|&row| (row, first_level_tags(doc, row)))
        .collect();

    let candidates: Vec<NodeId> = row_tags
        .iter()
        .filter(|(_, tags)| field_names.iter().any(|name| tags.contains(*name)))
        .map(|(row, _)| *row)
        .collect();

    let complete: Vec<NodeId> = row_tags
        .iter()
        .filter(|(row, tags)| {
            candidates.contains(row) && field_names.iter().all(|name| tags.contains(*name))
        })
        .map(|(row, _)| *row)
        .collect();

    if !missing.is_empty() {
        return Coverage::Missing(missing);
    }
    if candidates.len() <= 1 || complete.is_empty() {
        return Coverage::Complete;
    }
    match complete.as_slice() {
        [keep] => Coverage::Narrowed {
            keep: *keep,
            discard: candidates.into_iter().filter(|row| row != keep).collect(),
        },
        _ => Coverage::Ambiguous(complete.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::table_rows;

    fn cell(tag: &str) -> String {
        format!(
            r#"<w:tc><w:sdt><w:sdtPr><w:tag w:val="{}"/></w:sdtPr><w:sdtContent><w:p/></w:sdtContent></w:sdt></w:tc>"#,
            tag
        )
    }

    fn merged_cell(v_merge: &str) -> String {
        format!(r#"<w:tc><w:tcPr>{}</w:tcPr><w:p/></w:tc>"#, v_merge)
    }

    fn parse_rows(rows: &[String]) -> (Document, Vec<NodeId>) {
        let xml = format!("<w:tbl>{}</w:tbl>", rows.concat());
        let doc = Document::parse(&xml).unwrap();
        let tbl = doc.root_element().unwrap();
        let rows = table_rows(&doc, tbl);
        (doc, rows)
    }

    fn row(cells: &[String]) -> String {
        format!("<w:tr>{}</w:tr>", cells.concat())
    }

    #[test]
    fn test_single_row_prototype() {
        let (doc, rows) = parse_rows(&[
            row(&[merged_cell(""), "<w:tc><w:p/></w:tc>".to_string()]),
            row(&[cell("A"), cell("B")]),
            row(&["<w:tc><w:p/></w:tc>".to_string()]),
        ]);
        let proto = select_prototype(&doc, &rows, &["A", "B"]).unwrap();
        assert_eq!(proto, vec![rows[1]]);
    }

    #[test]
    fn test_rows_between_first_and_last_are_included() {
        let (doc, rows) = parse_rows(&[
            row(&[cell("A")]),
            row(&["<w:tc><w:p/></w:tc>".to_string()]),
            row(&[cell("B")]),
        ]);
        let proto = select_prototype(&doc, &rows, &["A", "B"]).unwrap();
        assert_eq!(proto, rows);
    }

    #[test]
    fn test_merge_continuation_extends_group() {
        let (doc, rows) = parse_rows(&[
            row(&[
                merged_cell(r#"<w:vMerge w:val="restart"/>"#),
                cell("A"),
            ]),
            row(&[merged_cell("<w:vMerge/>"), cell("B")]),
            row(&[
                merged_cell(r#"<w:vMerge w:val="continue"/>"#),
                "<w:tc><w:p/></w:tc>".to_string(),
            ]),
            row(&[merged_cell(r#"<w:vMerge w:val="restart"/>"#), cell("X")]),
        ]);
        let proto = select_prototype(&doc, &rows, &["A"]).unwrap();
        // restart at row 0 seeds column 0, rows 1 and 2 continue it, row 3 restarts
        assert_eq!(proto, rows[..3].to_vec());
    }

    #[test]
    fn test_empty_field_names_match_any_control() {
        let (doc, rows) = parse_rows(&[
            row(&["<w:tc><w:p/></w:tc>".to_string()]),
            row(&[cell("Anything")]),
        ]);
        let proto = select_prototype(&doc, &rows, &[]).unwrap();
        assert_eq!(proto, vec![rows[1]]);
    }

    #[test]
    fn test_no_matching_rows() {
        let (doc, rows) = parse_rows(&[row(&[cell("Other")])]);
        assert!(select_prototype(&doc, &rows, &["A"]).is_none());
    }

    #[test]
    fn test_coverage_split_fields_is_complete() {
        let (doc, rows) = parse_rows(&[row(&[cell("A")]), row(&[cell("B")])]);
        assert_eq!(check_coverage(&doc, &rows, &["A", "B"]), Coverage::Complete);
    }

    #[test]
    fn test_coverage_narrows_to_single_complete_row() {
        let (doc, rows) = parse_rows(&[
            row(&[cell("A"), cell("B")]),
            row(&[cell("A"), cell("B"), cell("C")]),
        ]);
        assert_eq!(
            check_coverage(&doc, &rows, &["A", "B", "C"]),
            Coverage::Narrowed {
                keep: rows[1],
                discard: vec![rows[0]],
            }
        );
    }

    #[test]
    fn test_coverage_missing_fields() {
        let (doc, rows) = parse_rows(&[row(&[cell("A")])]);
        assert_eq!(
            check_coverage(&doc, &rows, &["A", "Z"]),
            Coverage::Missing(vec!["Z".to_string()])
        );
    }

    #[test]
    fn test_coverage_ambiguous() {
        let (doc, rows) = parse_rows(&[
            row(&[cell("A"), cell("B")]),
            row(&[cell("B"), cell("A")]),
        ]);
        assert_eq!(
            check_coverage(&doc, &rows, &["A", "B"]),
            Coverage::Ambiguous(2)
        );
    }
}
