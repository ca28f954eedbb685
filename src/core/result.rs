//! Outcome of a fill pass

use indexmap::IndexSet;

use crate::content::ContentItem;
use crate::utils::error::ProcessError;

/// Accumulates what a fill pass handled and what went wrong.
///
/// Three states matter to callers:
/// - nothing handled and no errors: no processor claimed the item
///   ([`ProcessResult::is_not_handled`])
/// - handled with no errors: [`ProcessResult::success`]
/// - errors recorded: partially applied, the tree is not rolled back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    success: bool,
    handled: IndexSet<ContentItem>,
    errors: Vec<ProcessError>,
}

impl Default for ProcessResult {
    fn default() -> Self {
        Self::not_handled()
    }
}

impl ProcessResult {
    /// The starting value of a fold over items
    pub fn not_handled() -> Self {
        ProcessResult {
            success: true,
            handled: IndexSet::new(),
            errors: Vec::new(),
        }
    }

    pub fn handled(item: &ContentItem) -> Self {
        let mut result = Self::not_handled();
        result.add_handled(item);
        result
    }

    pub fn error(error: ProcessError) -> Self {
        let mut result = Self::not_handled();
        result.add_error(error);
        result
    }

    pub fn add_handled(&mut self, item: &ContentItem) {
        self.handled.insert(item.clone());
    }

    pub fn add_error(&mut self, error: ProcessError) {
        log::warn!("{}", error);
        self.success = false;
        self.errors.push(error);
    }

    /// Fold another result into this one: AND of success, union of handled
    /// items, errors appended in encounter order
    pub fn merge(&mut self, other: ProcessResult) {
        self.success &= other.success;
        self.handled.extend(other.handled);
        self.errors.extend(other.errors);
    }

    pub fn merged(mut self, other: ProcessResult) -> Self {
        self.merge(other);
        self
    }

    /// No error was recorded
    pub fn success(&self) -> bool {
        self.success
    }

    /// At least one item was handled
    pub fn is_handled(&self) -> bool {
        !self.handled.is_empty()
    }

    /// No processor claimed anything and nothing failed
    pub fn is_not_handled(&self) -> bool {
        self.handled.is_empty() && self.errors.is_empty()
    }

    pub fn is_item_handled(&self, item: &ContentItem) -> bool {
        self.handled.contains(item)
    }

    /// Handled items in the order they were first handled
    pub fn handled_items(&self) -> impl Iterator<Item = &ContentItem> {
        self.handled.iter()
    }

    pub fn errors(&self) -> &[ProcessError] {
        &self.errors
    }
}

impl FromIterator<ProcessResult> for ProcessResult {
    fn from_iter<I: IntoIterator<Item = ProcessResult>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ProcessResult::not_handled(), ProcessResult::merged)
    }
}
