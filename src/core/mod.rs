//! Fill engine
//!
//! This module contains the processors that write content into a template:
//! - `template`: top-level pass, finds each item's content controls by tag
//! - `dispatch`: the [`Processor`] contract and the per-kind dispatcher
//! - `table`: repeating tables with merge reconstruction
//! - `checkbox`, `field`: the leaf kinds
//!
//! ```text
//! TemplateProcessor -> ContentProcessor -> TableProcessor ──┐
//!                                       -> CheckBoxProcessor │ cell content
//!                                       -> FieldProcessor    │
//!                          ContentProcessor <────────────────┘
//! ```

pub mod checkbox;
pub mod context;
pub mod dispatch;
pub mod field;
pub mod result;
pub mod table;
pub mod template;

pub use checkbox::CheckBoxProcessor;
pub use context::FillOptions;
pub use dispatch::{ContentProcessor, Processor};
pub use field::FieldProcessor;
pub use result::ProcessResult;
pub use table::{TableProcessor, VerticalMerge};
pub use template::{find_placeholders, TemplateProcessor};
