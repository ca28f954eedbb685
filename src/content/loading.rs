//! Loading content items from JSON or YAML
//!
//! Items are tagged with a `kind` field:
//!
//! ```json
//! [
//!   { "kind": "field", "name": "Title", "value": "Quarterly report" },
//!   { "kind": "checkbox", "name": "Approved", "checked": true },
//!   { "kind": "table", "name": "Team",
//!     "rows": [[{ "kind": "field", "name": "Name", "value": "Eric" }]],
//!     "merges": [{ "start_row": 0, "end_row": 1, "start_column": 0, "end_column": 0 }] }
//! ]
//! ```

use std::path::Path;

use super::ContentItem;
use crate::utils::error::{TemplateError, TemplateResult};

/// Parse a JSON array of content items
pub fn load_json(input: &str) -> TemplateResult<Vec<ContentItem>> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a YAML sequence of content items
pub fn load_yaml(input: &str) -> TemplateResult<Vec<ContentItem>> {
    Ok(serde_yaml::from_str(input)?)
}

/// Read a content file, choosing the format from its extension
pub fn load_content_file(path: impl AsRef<Path>) -> TemplateResult<Vec<ContentItem>> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(&input),
        "yaml" | "yml" => load_yaml(&input),
        other => Err(TemplateError::invalid_content(format!(
            "unsupported content file extension '{}' (expected json, yaml or yml)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MergeRegion;

    #[test]
    fn test_load_json_table() {
        let items = load_json(
            r#"[
                { "kind": "table", "name": "Team",
                  "rows": [
                    [{ "kind": "field", "name": "Name", "value": "Eric" }],
                    [{ "kind": "field", "name": "Name", "value": "Bob" },
                     { "kind": "checkbox", "name": "Lead", "checked": true }]
                  ],
                  "merges": [{ "start_row": 0, "end_row": 1, "start_column": 0, "end_column": 0 }]
                }
            ]"#,
        )
        .unwrap();

        let ContentItem::Table(table) = &items[0] else {
            panic!("expected a table");
        };
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.field_names(), vec!["Name", "Lead"]);
        assert_eq!(table.merges, vec![MergeRegion::new(0, 1, 0, 0)]);
        assert!(!table.is_hidden);
    }

    #[test]
    fn test_load_yaml_checkbox() {
        let items = load_yaml("- kind: checkbox\n  name: Approved\n  checked: true\n").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "Approved");
        assert_eq!(items[0].kind_name(), "CheckBox");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = load_json(r#"[{ "kind": "image", "name": "Logo" }]"#).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidContent { .. }));
    }
}
