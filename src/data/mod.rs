//! Data layer - Static names and constants
//!
//! This module contains the WordprocessingML vocabulary the engine reads
//! and writes:
//! - Content control, table, checkbox and text element names
//! - Schema ordering of table cell properties

pub mod names;

// Re-export commonly used items
pub use names::{tc_pr_position, TC_PR_ORDER};
