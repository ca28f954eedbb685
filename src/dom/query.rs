//! Tree queries and content control helpers
//!
//! All queries return nodes in document order.

use super::{Document, NodeId};
use crate::data::names::{SDT_CONTENT, SDT_PR, TAG, VAL};

impl Document {
    /// Pre-order walk below `id`, `descend` decides whether to enter a node's children
    fn walk<F, D>(&self, id: NodeId, include_self: bool, mut visit: F, mut descend: D)
    where
        F: FnMut(NodeId),
        D: FnMut(NodeId) -> bool,
    {
        let mut stack: Vec<NodeId> = Vec::new();
        if include_self {
            stack.push(id);
        } else {
            stack.extend(self.children(id).iter().rev());
        }
        while let Some(node) = stack.pop() {
            visit(node);
            if descend(node) {
                stack.extend(self.children(node).iter().rev());
            }
        }
    }

    /// Descendant elements named `tag`, excluding `id` itself
    pub fn descendants(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(
            id,
            false,
            |node| {
                if self.is(node, tag) {
                    out.push(node)
                }
            },
            |_| true,
        );
        out
    }

    /// Like [`Document::descendants`] but `id` is a candidate too
    pub fn descendants_and_self(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(
            id,
            true,
            |node| {
                if self.is(node, tag) {
                    out.push(node)
                }
            },
            |_| true,
        );
        out
    }

    /// Matching elements on the chain from `id` up to the document, nearest first
    pub fn ancestors_and_self(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            if self.is(node, tag) {
                out.push(node);
            }
            current = self.parent(node);
        }
        out
    }

    /// Outermost elements named `tag` at or below `id`.
    ///
    /// Once a match is found its subtree is not searched, so content
    /// controls nested inside another control are not returned.
    pub fn first_level_descendants_and_self(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            if self.is(node, tag) {
                out.push(node);
                continue;
            }
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// Descendants named `tag` that do not sit inside a nested `boundary` element.
    ///
    /// Used to read the rows of one table (or cells of one row) without
    /// picking up the rows of tables nested in its cells.
    pub fn scoped_descendants(&self, id: NodeId, tag: &str, boundary: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(
            id,
            false,
            |node| {
                if self.is(node, tag) {
                    out.push(node)
                }
            },
            |node| !self.is(node, boundary),
        );
        out
    }

    // ------------------------------------------------------------------
    // Content controls
    // ------------------------------------------------------------------

    /// The merge key of a content control (`w:sdtPr/w:tag/@w:val`)
    pub fn placeholder_tag(&self, sdt: NodeId) -> Option<&str> {
        let pr = self.child(sdt, SDT_PR)?;
        let tag = self.child(pr, TAG)?;
        self.attr(tag, VAL)
    }

    /// Replace a content control with the children of its `w:sdtContent`.
    ///
    /// A control without a content body is simply removed.
    pub fn unwrap_placeholder(&mut self, sdt: NodeId) {
        match self.child(sdt, SDT_CONTENT) {
            Some(content) => {
                for child in self.children(content).to_vec() {
                    self.insert_before(sdt, child);
                }
                self.detach(sdt);
            }
            None => self.detach(sdt),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::Document;

    const NESTED: &str = r#"<w:body><w:sdt><w:sdtPr><w:tag w:val="Outer"/></w:sdtPr><w:sdtContent><w:tbl><w:tr><w:tc><w:sdt><w:sdtPr><w:tag w:val="Inner"/></w:sdtPr><w:sdtContent><w:tbl><w:tr><w:tc/></w:tr></w:tbl></w:sdtContent></w:sdt></w:tc></w:tr></w:tbl></w:sdtContent></w:sdt></w:body>"#;

    #[test]
    fn test_descendants_in_document_order() {
        let doc = Document::parse(NESTED).unwrap();
        let body = doc.root_element().unwrap();
        let tags: Vec<_> = doc
            .descendants(body, "w:sdt")
            .into_iter()
            .map(|sdt| doc.placeholder_tag(sdt).unwrap().to_string())
            .collect();
        assert_eq!(tags, vec!["Outer", "Inner"]);
    }

    #[test]
    fn test_first_level_stops_at_match() {
        let doc = Document::parse(NESTED).unwrap();
        let body = doc.root_element().unwrap();
        let outer = doc.first_level_descendants_and_self(body, "w:sdt");
        assert_eq!(outer.len(), 1);
        assert_eq!(doc.placeholder_tag(outer[0]), Some("Outer"));
    }

    #[test]
    fn test_scoped_rows_skip_nested_tables() {
        let doc = Document::parse(NESTED).unwrap();
        let body = doc.root_element().unwrap();
        let tbl = doc.descendants(body, "w:tbl")[0];
        assert_eq!(doc.descendants(tbl, "w:tr").len(), 2);
        assert_eq!(doc.scoped_descendants(tbl, "w:tr", "w:tbl").len(), 1);
    }

    #[test]
    fn test_ancestors_and_self() {
        let doc = Document::parse(NESTED).unwrap();
        let body = doc.root_element().unwrap();
        let inner_cell = *doc.descendants(body, "w:tc").last().unwrap();
        let sdts = doc.ancestors_and_self(inner_cell, "w:sdt");
        assert_eq!(sdts.len(), 2);
        assert_eq!(doc.placeholder_tag(sdts[0]), Some("Inner"));
    }

    #[test]
    fn test_unwrap_placeholder() {
        let mut doc = Document::parse(
            r#"<w:p><w:sdt><w:sdtPr><w:tag w:val="x"/></w:sdtPr><w:sdtContent><w:r/><w:r/></w:sdtContent></w:sdt></w:p>"#,
        )
        .unwrap();
        let p = doc.root_element().unwrap();
        let sdt = doc.child(p, "w:sdt").unwrap();
        doc.unwrap_placeholder(sdt);
        assert_eq!(doc.to_xml().unwrap(), "<w:p><w:r/><w:r/></w:p>");
    }
}
