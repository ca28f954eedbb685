//! Fill configuration

/// Options shared by every processor of one fill pass.
///
/// Processors copy the value at construction and never change it, so the
/// same options flow unchanged into nested table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillOptions {
    /// Replace each successfully filled content control with its content
    /// Default: false
    pub remove_wrapper_on_success: bool,
}

impl FillOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Options producing a document without leftover content controls
    pub fn clean() -> Self {
        Self {
            remove_wrapper_on_success: true,
        }
    }

    pub fn with_remove_wrapper(self, remove: bool) -> Self {
        Self {
            remove_wrapper_on_success: remove,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(!FillOptions::new().remove_wrapper_on_success);
        assert!(FillOptions::clean().remove_wrapper_on_success);
        assert_eq!(
            FillOptions::new().with_remove_wrapper(true),
            FillOptions::clean()
        );
    }
}
