//! Cell merge reconstruction on the generated grid

use super::{row_cells, table_rows};
use crate::content::MergeRegion;
use crate::core::result::ProcessResult;
use crate::data::names::{tc_pr_position, GRID_SPAN, MERGE_RESTART, TABLE_CELL_PR, VAL, V_MERGE};
use crate::dom::{Document, NodeId};
use crate::utils::error::ProcessError;

/// Apply `regions` to `tbl`.
///
/// Regions index the table as it is after replication. Invalid regions are
/// recorded on `result` and skipped; the rest are applied in input order,
/// all vertical merges first.
pub fn apply_merges(
    doc: &mut Document,
    tbl: NodeId,
    regions: &[MergeRegion],
    table_name: &str,
    result: &mut ProcessResult,
) {
    let grid: Vec<Vec<NodeId>> = table_rows(doc, tbl)
        .into_iter()
        .map(|row| row_cells(doc, row))
        .collect();

    let mut valid = Vec::with_capacity(regions.len());
    for region in regions {
        match validate(&grid, region) {
            Ok(()) => valid.push(*region),
            Err(reason) => result.add_error(ProcessError::malformed(table_name, "Table", reason)),
        }
    }

    for region in valid.iter().filter(|r| r.is_vertical()) {
        for column in region.start_column..=region.end_column {
            for row in region.start_row..=region.end_row {
                let cell = grid[row][column];
                if doc.parent(cell).is_none() {
                    continue;
                }
                let value = (row == region.start_row).then_some(MERGE_RESTART);
                set_cell_marker(doc, cell, V_MERGE, value);
            }
        }
    }

    for region in valid.iter().filter(|r| r.is_horizontal()) {
        let span = region.column_span().to_string();
        for row in region.start_row..=region.end_row {
            let cells = &grid[row];
            let consumed = (region.start_column..=region.end_column)
                .any(|column| doc.parent(cells[column]).is_none());
            if consumed {
                result.add_error(ProcessError::malformed(
                    table_name,
                    "Table",
                    format!(
                        "merge region (row {}, columns {}..{}) overlaps an earlier merge",
                        row, region.start_column, region.end_column
                    ),
                ));
                continue;
            }
            set_cell_marker(doc, cells[region.start_column], GRID_SPAN, Some(&span));
            for column in (region.start_column + 1..=region.end_column).rev() {
                doc.detach(cells[column]);
            }
        }
    }

    log::debug!(
        "table '{}': {} of {} merge region(s) applied",
        table_name,
        valid.len(),
        regions.len()
    );
}

fn validate(grid: &[Vec<NodeId>], region: &MergeRegion) -> Result<(), String> {
    if !region.is_well_formed() {
        return Err(format!(
            "has a reversed merge region (rows {}..{}, columns {}..{})",
            region.start_row, region.end_row, region.start_column, region.end_column
        ));
    }
    if region.end_row >= grid.len() {
        return Err(format!(
            "merge region ends at row {} but the table has {} row(s)",
            region.end_row,
            grid.len()
        ));
    }
    if let Some((row, cells)) = grid[region.start_row..=region.end_row]
        .iter()
        .enumerate()
        .find(|(_, cells)| region.end_column >= cells.len())
    {
        return Err(format!(
            "merge region ends at column {} but row {} has {} cell(s)",
            region.end_column,
            region.start_row + row,
            cells.len()
        ));
    }
    Ok(())
}

/// Set a `w:tcPr` marker such as `w:vMerge` or `w:gridSpan` on a cell.
///
/// The properties container and the marker are created when missing, the
/// marker at its schema position. `None` clears the value attribute but
/// keeps the marker.
pub fn set_cell_marker(doc: &mut Document, cell: NodeId, marker: &str, value: Option<&str>) {
    let pr = match doc.child(cell, TABLE_CELL_PR) {
        Some(pr) => pr,
        None => {
            let pr = doc.create_element(TABLE_CELL_PR);
            doc.insert_child(cell, 0, pr);
            pr
        }
    };

    let node = match doc.child(pr, marker) {
        Some(node) => node,
        None => {
            let node = doc.create_element(marker);
            let position = tc_pr_position(marker);
            let next = doc
                .child_elements(pr)
                .into_iter()
                .find(|&sibling| doc.name(sibling).map_or(false, |n| tc_pr_position(n) > position));
            match next {
                Some(next) => doc.insert_before(next, node),
                None => doc.append_child(pr, node),
            }
            node
        }
    };

    match value {
        Some(value) => doc.set_attr(node, VAL, value),
        None => {
            doc.remove_attr(node, VAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_marker_creates_properties() {
        let mut doc = Document::parse("<w:tc><w:p/></w:tc>").unwrap();
        let tc = doc.root_element().unwrap();
        set_cell_marker(&mut doc, tc, V_MERGE, Some("restart"));
        assert_eq!(
            doc.to_xml().unwrap(),
            r#"<w:tc><w:tcPr><w:vMerge w:val="restart"/></w:tcPr><w:p/></w:tc>"#
        );
    }

    #[test]
    fn test_marker_schema_position() {
        let mut doc = Document::parse(
            r#"<w:tc><w:tcPr><w:tcW w:w="100"/><w:vAlign w:val="center"/></w:tcPr></w:tc>"#,
        )
        .unwrap();
        let tc = doc.root_element().unwrap();
        set_cell_marker(&mut doc, tc, V_MERGE, None);
        set_cell_marker(&mut doc, tc, GRID_SPAN, Some("2"));
        assert_eq!(
            doc.to_xml().unwrap(),
            r#"<w:tc><w:tcPr><w:tcW w:w="100"/><w:gridSpan w:val="2"/><w:vMerge/><w:vAlign w:val="center"/></w:tcPr></w:tc>"#
        );
    }

    #[test]
    fn test_clearing_keeps_marker() {
        let mut doc =
            Document::parse(r#"<w:tc><w:tcPr><w:vMerge w:val="restart"/></w:tcPr></w:tc>"#).unwrap();
        let tc = doc.root_element().unwrap();
        set_cell_marker(&mut doc, tc, V_MERGE, None);
        assert_eq!(doc.to_xml().unwrap(), "<w:tc><w:tcPr><w:vMerge/></w:tcPr></w:tc>");
    }

    #[test]
    fn test_validate_bounds() {
        let mut doc = Document::new();
        let mut cell = || doc.create_element("w:tc");
        let grid = vec![vec![cell(), cell()], vec![cell()]];
        assert!(validate(&grid, &MergeRegion::new(0, 1, 0, 0)).is_ok());
        assert!(validate(&grid, &MergeRegion::new(0, 2, 0, 0)).is_err());
        assert!(validate(&grid, &MergeRegion::new(0, 1, 0, 1)).is_err());
        assert!(validate(&grid, &MergeRegion::new(1, 0, 0, 0)).is_err());
    }
}
