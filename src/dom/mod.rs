//! Markup tree layer
//!
//! An arena-backed XML tree for WordprocessingML parts. Nodes are addressed
//! by a copyable [`NodeId`]; detached nodes stay in the arena until the
//! document is dropped, so ids held by callers never dangle.
//!
//! ```text
//! document.xml -> Document::parse -> queries / tree surgery -> Document::to_xml
//! ```

mod query;
mod xml;

use indexmap::IndexMap;

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An element: qualified name plus ordered attributes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified tag name, e.g. `w:tbl`
    pub name: String,
    /// Attributes in document order
    pub attrs: IndexMap<String, String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attrs: IndexMap::new(),
        }
    }
}

/// What a node holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document container (holds the root element and prolog nodes)
    Document,
    Element(Element),
    /// Unescaped character data
    Text(String),
    CData(String),
    /// Raw comment body
    Comment(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The `<?xml ...?>` declaration of a part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDecl {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// An XML document held as an arena of nodes
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    decl: Option<XmlDecl>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document (just the container node)
    pub fn new() -> Self {
        Document {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            decl: None,
        }
    }

    /// The document container node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The single top-level element, if any
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .iter()
            .copied()
            .find(|&id| self.element(id).is_some())
    }

    pub fn decl(&self) -> Option<&XmlDecl> {
        self.decl.as_ref()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeKind::Element(Element::new(name)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    pub(crate) fn create_node(&mut self, kind: NodeKind) -> NodeId {
        self.push(kind)
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Tag name of an element node
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.name.as_str())
    }

    /// Whether `id` is an element named `tag`
    pub fn is(&self, id: NodeId, tag: &str) -> bool {
        self.name(id) == Some(tag)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// First child element named `tag`
    pub fn child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id).iter().copied().find(|&c| self.is(c, tag))
    }

    /// Child elements of `id`, skipping text and comments
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.element(c).is_some())
            .collect()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|el| el.attrs.get(name))
            .map(String::as_str)
    }

    /// Set an attribute; a no-op on non-element nodes
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.attrs.insert(name.to_string(), value.into());
        }
    }

    /// Remove an attribute, keeping the order of the others
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id)
            .and_then(|el| el.attrs.shift_remove(name))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(t) | NodeKind::CData(t) => out.push_str(t),
            NodeKind::Comment(_) => {}
            NodeKind::Document | NodeKind::Element(_) => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Replace the content of a node with `text`.
    ///
    /// Text nodes are rewritten; elements lose their children and get a
    /// single text child.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        let text = text.into();
        match &mut self.nodes[id.0].kind {
            NodeKind::Text(t) | NodeKind::CData(t) => {
                *t = text;
                return;
            }
            NodeKind::Comment(_) => return,
            NodeKind::Document | NodeKind::Element(_) => {}
        }
        for child in self.children(id).to_vec() {
            self.detach(child);
        }
        let node = self.create_text(text);
        self.append_child(id, node);
    }

    /// Whether the node is reachable from the document container
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current == self.root()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Unlink a node from its parent. Detaching a detached node does nothing.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` at `index` among the children of `parent`
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Insert `node` as the next sibling of `anchor`.
    ///
    /// Does nothing when `anchor` has no parent.
    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
        self.detach(node);
        if let Some(parent) = self.parent(anchor) {
            let index = self.index_in_parent(anchor).map_or(0, |i| i + 1);
            self.insert_child(parent, index, node);
        }
    }

    /// Insert `node` as the previous sibling of `anchor`
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) {
        self.detach(node);
        if let Some(parent) = self.parent(anchor) {
            let index = self.index_in_parent(anchor).unwrap_or(0);
            self.insert_child(parent, index, node);
        }
    }

    fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Copy a subtree. The copy is detached and shares no ids with the source.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let kind = self.nodes[id.0].kind.clone();
        let copy = self.push(kind);
        for child in self.children(id).to_vec() {
            let child_copy = self.deep_clone(child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }
}
