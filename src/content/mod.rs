//! Content model
//!
//! Typed values the caller merges into a template. Every item carries a
//! name (the content control tag it targets) and a hidden flag.
//!
//! ## Example
//!
//! ```rust
//! use docx_template::content::{ContentItem, FieldContent, MergeRegion, RowData, TableContent};
//!
//! let table = TableContent::new("Team")
//!     .with_row(RowData::new(vec![
//!         FieldContent::new("Name", "Eric").into(),
//!         FieldContent::new("Role", "Developer").into(),
//!     ]))
//!     .with_row(RowData::new(vec![FieldContent::new("Name", "Bob").into()]))
//!     .with_merge(MergeRegion::new(0, 1, 1, 1));
//!
//! assert_eq!(table.field_names(), vec!["Name", "Role"]);
//! let item: ContentItem = table.into();
//! assert_eq!(item.name(), "Team");
//! ```

#[cfg(feature = "data-loading")]
pub mod loading;

use indexmap::IndexSet;

#[cfg(feature = "data-loading")]
use serde::{Deserialize, Serialize};

/// A value to merge into the content control named [`ContentItem::name`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "data-loading",
    derive(Serialize, Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum ContentItem {
    /// Repeating table rows
    Table(TableContent),
    /// Legacy form checkbox
    CheckBox(CheckBoxContent),
    /// Plain text
    Field(FieldContent),
}

impl ContentItem {
    pub fn name(&self) -> &str {
        match self {
            ContentItem::Table(t) => &t.name,
            ContentItem::CheckBox(c) => &c.name,
            ContentItem::Field(f) => &f.name,
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            ContentItem::Table(t) => t.is_hidden,
            ContentItem::CheckBox(c) => c.is_hidden,
            ContentItem::Field(f) => f.is_hidden,
        }
    }

    /// Human readable kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentItem::Table(_) => "Table",
            ContentItem::CheckBox(_) => "CheckBox",
            ContentItem::Field(_) => "Field",
        }
    }
}

impl From<TableContent> for ContentItem {
    fn from(table: TableContent) -> Self {
        ContentItem::Table(table)
    }
}

impl From<CheckBoxContent> for ContentItem {
    fn from(check_box: CheckBoxContent) -> Self {
        ContentItem::CheckBox(check_box)
    }
}

impl From<FieldContent> for ContentItem {
    fn from(field: FieldContent) -> Self {
        ContentItem::Field(field)
    }
}

// ============================================================================
// Table
// ============================================================================

/// Data for a repeating table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "data-loading", derive(Serialize, Deserialize))]
pub struct TableContent {
    pub name: String,
    /// One entry per generated row group
    #[cfg_attr(feature = "data-loading", serde(default))]
    pub rows: Vec<RowData>,
    #[cfg_attr(feature = "data-loading", serde(default))]
    pub is_hidden: bool,
    /// Cell merges applied to the generated table, in order
    #[cfg_attr(feature = "data-loading", serde(default))]
    pub merges: Vec<MergeRegion>,
}

impl TableContent {
    pub fn new(name: impl Into<String>) -> Self {
        TableContent {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_row(mut self, row: RowData) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = RowData>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn with_merge(mut self, region: MergeRegion) -> Self {
        self.merges.push(region);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    /// Field names referenced by any row, in first-seen order
    pub fn field_names(&self) -> Vec<&str> {
        let names: IndexSet<&str> = self
            .rows
            .iter()
            .flat_map(|row| row.field_names())
            .collect();
        names.into_iter().collect()
    }
}

/// The items for one generated row group, looked up by field name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "data-loading",
    derive(Serialize, Deserialize),
    serde(transparent)
)]
pub struct RowData {
    pub items: Vec<ContentItem>,
}

impl RowData {
    pub fn new(items: Vec<ContentItem>) -> Self {
        RowData { items }
    }

    /// The first item named `field_name`
    pub fn get_content_item(&self, field_name: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.name() == field_name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(ContentItem::name)
    }
}

/// A rectangular merge on the generated table, 0-based and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "data-loading", derive(Serialize, Deserialize))]
pub struct MergeRegion {
    pub start_row: usize,
    pub end_row: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl MergeRegion {
    pub fn new(start_row: usize, end_row: usize, start_column: usize, end_column: usize) -> Self {
        MergeRegion {
            start_row,
            end_row,
            start_column,
            end_column,
        }
    }

    /// Spans more than one row
    pub fn is_vertical(&self) -> bool {
        self.start_row < self.end_row
    }

    /// Spans more than one column
    pub fn is_horizontal(&self) -> bool {
        self.start_column < self.end_column
    }

    /// Number of grid columns the merged cell covers
    pub fn column_span(&self) -> usize {
        self.end_column.saturating_sub(self.start_column) + 1
    }

    /// Whether the bounds are ordered on both axes
    pub fn is_well_formed(&self) -> bool {
        self.start_row <= self.end_row && self.start_column <= self.end_column
    }
}

// ============================================================================
// Checkbox and text
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "data-loading", derive(Serialize, Deserialize))]
pub struct CheckBoxContent {
    pub name: String,
    #[cfg_attr(feature = "data-loading", serde(default))]
    pub checked: bool,
    #[cfg_attr(feature = "data-loading", serde(default))]
    pub is_hidden: bool,
}

impl CheckBoxContent {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        CheckBoxContent {
            name: name.into(),
            checked,
            is_hidden: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "data-loading", derive(Serialize, Deserialize))]
pub struct FieldContent {
    pub name: String,
    #[cfg_attr(feature = "data-loading", serde(default))]
    pub value: String,
    #[cfg_attr(feature = "data-loading", serde(default))]
    pub is_hidden: bool,
}

impl FieldContent {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        FieldContent {
            name: name.into(),
            value: value.into(),
            is_hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }
}
