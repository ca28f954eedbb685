//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Diagnostics and template lint

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{
    check_template, format_diagnostics, report, CheckResult, Diagnostic, DiagnosticLevel,
};
pub use error::{ProcessError, TemplateError, TemplateResult};
