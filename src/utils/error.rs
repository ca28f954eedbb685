//! Error handling for template fills
//!
//! Two families of errors live here:
//!
//! - [`TemplateError`]: fatal conditions outside the fill engine (malformed
//!   XML, IO, unreadable content files). These are returned through `Result`.
//! - [`ProcessError`]: per-item problems recorded while filling. These are
//!   collected into a [`ProcessResult`](crate::core::ProcessResult) and never
//!   abort the pass.

use std::fmt;

/// Fatal template error type
#[derive(Debug, Clone)]
pub enum TemplateError {
    /// The document XML could not be parsed
    XmlError {
        message: String,
        position: Option<usize>,
    },
    /// The document tree could not be written back out
    WriteError { message: String },
    /// Content definitions could not be read
    InvalidContent { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::XmlError { message, position } => {
                if let Some(pos) = position {
                    write!(f, "XML error at byte {}: {}", pos, message)
                } else {
                    write!(f, "XML error: {}", message)
                }
            }
            TemplateError::WriteError { message } => {
                write!(f, "Write error: {}", message)
            }
            TemplateError::InvalidContent { message } => {
                write!(f, "Invalid content: {}", message)
            }
            TemplateError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<std::io::Error> for TemplateError {
    fn from(err: std::io::Error) -> Self {
        TemplateError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for TemplateError {
    fn from(err: quick_xml::Error) -> Self {
        TemplateError::xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for TemplateError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        TemplateError::xml(err.to_string())
    }
}

#[cfg(feature = "data-loading")]
impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::InvalidContent {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "data-loading")]
impl From<serde_yaml::Error> for TemplateError {
    fn from(err: serde_yaml::Error) -> Self {
        TemplateError::InvalidContent {
            message: err.to_string(),
        }
    }
}

/// Result type for fatal template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

// Convenience constructors for errors
impl TemplateError {
    pub fn xml(message: impl Into<String>) -> Self {
        TemplateError::XmlError {
            message: message.into(),
            position: None,
        }
    }

    pub fn xml_at(message: impl Into<String>, position: usize) -> Self {
        TemplateError::XmlError {
            message: message.into(),
            position: Some(position),
        }
    }

    pub fn write(message: impl Into<String>) -> Self {
        TemplateError::WriteError {
            message: message.into(),
        }
    }

    pub fn invalid_content(message: impl Into<String>) -> Self {
        TemplateError::InvalidContent {
            message: message.into(),
        }
    }
}

/// A problem recorded against one content item during a fill pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// No placeholder with the item's name exists where it was expected
    PlaceholderNotFound { item: String, kind: &'static str },
    /// The placeholder exists but its structure does not fit the item
    MalformedContentItem {
        item: String,
        kind: &'static str,
        reason: String,
    },
}

impl ProcessError {
    pub fn placeholder_not_found(item: impl Into<String>, kind: &'static str) -> Self {
        ProcessError::PlaceholderNotFound {
            item: item.into(),
            kind,
        }
    }

    pub fn malformed(
        item: impl Into<String>,
        kind: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        ProcessError::MalformedContentItem {
            item: item.into(),
            kind,
            reason: reason.into(),
        }
    }

    /// Name of the content item the error was recorded against
    pub fn item_name(&self) -> &str {
        match self {
            ProcessError::PlaceholderNotFound { item, .. } => item,
            ProcessError::MalformedContentItem { item, .. } => item,
        }
    }

    pub fn is_placeholder_not_found(&self) -> bool {
        matches!(self, ProcessError::PlaceholderNotFound { .. })
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::PlaceholderNotFound { item, kind } => {
                write!(f, "{} content control '{}' not found", kind, item)
            }
            ProcessError::MalformedContentItem { item, kind, reason } => {
                write!(f, "{} '{}' {}", kind, item, reason)
            }
        }
    }
}

impl std::error::Error for ProcessError {}
