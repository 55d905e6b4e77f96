//! Headless document model.
//!
//! A small element arena with a `<head>` and a `<body>`, stable element ids
//! and inline `display` styles. The dialog renders into it and the egui layer
//! projects it onto the screen, so the dialog logic can be exercised without
//! a browser or a window.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to an element in a [`Document`].
///
/// Handles remember which document created them; other documents treat them
/// as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    doc: u64,
    index: usize,
}

/// Element kinds the dialog markup uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Head,
    Body,
    Div,
    Button,
    H1,
    P,
    B,
    Link,
    Svg,
    Path,
    /// Bare text node; its content lives in [`Element::text`].
    Text,
}

/// Inline `display` style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// No inline style set; the element is shown.
    #[default]
    Unset,
    Flex,
    None,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: Tag,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub display: Display,
    pub text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            display: Display::Unset,
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// The page the dialog is injected into.
#[derive(Debug, Clone)]
pub struct Document {
    id: u64,
    nodes: Vec<Element>,
    head: NodeId,
    body: NodeId,
}

impl Document {
    /// Create an empty page with just `<head>` and `<body>`.
    pub fn new() -> Self {
        let id = NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed);
        let nodes = vec![Element::new(Tag::Head), Element::new(Tag::Body)];
        Self {
            id,
            nodes,
            head: NodeId { doc: id, index: 0 },
            body: NodeId { doc: id, index: 1 },
        }
    }

    /// Whether `node` was created by this document.
    pub fn contains(&self, node: NodeId) -> bool {
        node.doc == self.id && node.index < self.nodes.len()
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        if self.contains(node) {
            self.nodes.get(node.index)
        } else {
            None
        }
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: Tag) -> NodeId {
        self.nodes.push(Element::new(tag));
        NodeId {
            doc: self.id,
            index: self.nodes.len() - 1,
        }
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        let id = self.create_element(Tag::Text);
        self.nodes[id.index].text = Some(text.to_string());
        id
    }

    /// # Panics
    ///
    /// If `node` belongs to another document. Check with [`contains`](Self::contains).
    pub fn element(&self, node: NodeId) -> &Element {
        assert!(self.contains(node), "node {:?} belongs to another document", node);
        &self.nodes[node.index]
    }

    /// # Panics
    ///
    /// If `node` belongs to another document.
    pub fn element_mut(&mut self, node: NodeId) -> &mut Element {
        assert!(self.contains(node), "node {:?} belongs to another document", node);
        &mut self.nodes[node.index]
    }

    /// Append `child` as the last child of `parent`, detaching it first if needed.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.index].parent.take() {
            self.nodes[old_parent.index].children.retain(|c| *c != child);
        }
        self.nodes[child.index].parent = Some(parent);
        self.nodes[parent.index].children.push(child);
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.index].id = Some(id.to_string());
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let element = &mut self.nodes[node.index];
        if !element.has_class(class) {
            element.classes.push(class.to_string());
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.index]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// No-op for nodes of another document.
    pub fn set_display(&mut self, node: NodeId, display: Display) {
        if self.contains(node) {
            self.nodes[node.index].display = display;
        }
    }

    /// Inline display of `node`; nodes of another document read as `None`.
    pub fn display(&self, node: NodeId) -> Display {
        self.get(node).map_or(Display::None, |e| e.display)
    }

    /// Whether a node is attached to the page and neither it nor any ancestor
    /// is `display: none`.
    pub fn is_displayed(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(element) = self.get(id) else {
                return false;
            };
            if element.display == Display::None {
                return false;
            }
            if id == self.head || id == self.body {
                return true;
            }
            current = element.parent;
        }
        false
    }

    /// Find an element by id anywhere in the page.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        [self.head, self.body]
            .into_iter()
            .find_map(|root| self.query_id(root, id))
    }

    /// Find an element by id inside the subtree rooted at `within`
    /// (the root itself excluded). Depth-first, document order.
    /// `None` when `within` belongs to another document.
    pub fn query_id(&self, within: NodeId, id: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.get(within)?.children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            let element = &self.nodes[node.index];
            if element.id.as_deref() == Some(id) {
                return Some(node);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        None
    }

    /// Concatenated text of every text node under `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.get(node) else {
            return;
        };
        if let Some(text) = &element.text {
            out.push_str(text);
        }
        for child in &element.children {
            self.collect_text(*child, out);
        }
    }

    /// Every `<link>` element currently in `<head>`.
    pub fn links_in_head(&self) -> Vec<NodeId> {
        self.nodes[self.head.index]
            .children
            .iter()
            .copied()
            .filter(|c| self.nodes[c.index].tag == Tag::Link)
            .collect()
    }

    pub fn body_children(&self) -> &[NodeId] {
        &self.nodes[self.body.index].children
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
