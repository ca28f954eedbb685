//! WordprocessingML element and attribute names
//!
//! Names are stored qualified with the conventional `w:` prefix, exactly as
//! they appear in `word/document.xml`.

use fxhash::FxHashMap;
use lazy_static::lazy_static;

// ============================================================================
// Content controls
// ============================================================================

/// Structured document tag (content control) wrapper
pub const SDT: &str = "w:sdt";
/// Content control properties
pub const SDT_PR: &str = "w:sdtPr";
/// Content control body
pub const SDT_CONTENT: &str = "w:sdtContent";
/// Content control tag, the merge key
pub const TAG: &str = "w:tag";
/// Marks a control that still shows its prompt text
pub const SHOWING_PLACEHOLDER: &str = "w:showingPlcHdr";

// ============================================================================
// Tables
// ============================================================================

pub const TABLE: &str = "w:tbl";
pub const TABLE_ROW: &str = "w:tr";
pub const TABLE_CELL: &str = "w:tc";
/// Table cell properties
pub const TABLE_CELL_PR: &str = "w:tcPr";
/// Vertical merge marker
pub const V_MERGE: &str = "w:vMerge";
/// Horizontal span count
pub const GRID_SPAN: &str = "w:gridSpan";

/// `w:vMerge` value that starts a vertical span
pub const MERGE_RESTART: &str = "restart";
/// `w:vMerge` value that continues a vertical span (same as no value)
pub const MERGE_CONTINUE: &str = "continue";

// ============================================================================
// Legacy form checkbox
// ============================================================================

pub const CHECK_BOX: &str = "w:checkBox";
pub const CHECKED: &str = "w:checked";
pub const DEFAULT: &str = "w:default";

// ============================================================================
// Text
// ============================================================================

pub const PARAGRAPH: &str = "w:p";
pub const RUN: &str = "w:r";
pub const RUN_PR: &str = "w:rPr";
pub const TEXT: &str = "w:t";

/// The value attribute shared by most property elements
pub const VAL: &str = "w:val";
/// Whitespace handling attribute on `w:t`
pub const XML_SPACE: &str = "xml:space";

lazy_static! {
    /// Schema position of each `w:tcPr` child (CT_TcPr sequence).
    ///
    /// Word rejects cell properties whose children are out of order, so
    /// markers created by the merge pass are inserted at their slot.
    pub static ref TC_PR_ORDER: FxHashMap<&'static str, usize> = {
        let order = [
            "w:cnfStyle",
            "w:tcW",
            "w:gridSpan",
            "w:hMerge",
            "w:vMerge",
            "w:tcBorders",
            "w:shd",
            "w:noWrap",
            "w:tcMar",
            "w:textDirection",
            "w:tcFitText",
            "w:vAlign",
            "w:hideMark",
            "w:headers",
            "w:cellIns",
            "w:cellDel",
            "w:cellMerge",
            "w:tcPrChange",
        ];
        order.iter().enumerate().map(|(i, name)| (*name, i)).collect()
    };
}

/// Schema slot of a `w:tcPr` child, unknown names sort last
pub fn tc_pr_position(name: &str) -> usize {
    TC_PR_ORDER.get(name).copied().unwrap_or(usize::MAX)
}
