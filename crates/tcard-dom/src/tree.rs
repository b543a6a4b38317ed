#![forbid(unsafe_code)]

//! Arena-backed content tree.
//!
//! One [`ContentTree`] holds the semantic content of a single slide. Nodes
//! live in a flat arena and reference each other by [`NodeId`], so moving a
//! node (the decorator wraps code blocks into containers) is a link update,
//! never a copy. The tree is built once by the upstream converter, then
//! annotated in place by the layout pass: category classes on the root,
//! decoration classes and synthesized containers around code blocks, and
//! the committed font-scale percentage.
//!
//! A tree may legitimately have no root container (an empty slide). Every
//! consumer treats that as a clean no-op, not an error.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Handle to a node inside one [`ContentTree`].
///
/// Ids are indices into the owning tree's arena and are only meaningful for
/// the tree that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena slot of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Semantic kind of a content node.
///
/// `Root` through `Text` are produced by the upstream converter;
/// `Container` and `Header` are synthesized by the code-block decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The slide's content root container.
    Root,
    /// A heading of any level.
    Heading,
    /// A prose paragraph.
    Paragraph,
    /// A block quotation; its visible text lives in child paragraphs.
    Blockquote,
    /// One list item (ordered or unordered).
    ListItem,
    /// A figure wrapping an image, optionally with caption text.
    Figure,
    /// An image element.
    Image,
    /// A code block: a container holding exactly one [`NodeKind::CodeText`].
    CodeBlock,
    /// The raw source text run inside a code block.
    CodeText,
    /// A plain text run.
    Text,
    /// A generic wrapping container (synthesized or converter-produced).
    Container,
    /// A code-block header carrying the language label.
    Header,
}

impl NodeKind {
    /// Whether nodes of this kind carry visible text directly.
    #[must_use]
    pub const fn is_text_run(self) -> bool {
        matches!(self, Self::Text | Self::CodeText)
    }
}

/// One node of a [`ContentTree`].
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    classes: SmallVec<[String; 2]>,
    text: String,
    intrinsic_px: Option<(f64, f64)>,
    children: SmallVec<[NodeId; 4]>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            classes: SmallVec::new(),
            text: String::new(),
            intrinsic_px: None,
            children: SmallVec::new(),
            parent,
        }
    }

    /// Semantic kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Class annotations, in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Direct text of this node (non-empty only for text runs).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Intrinsic pixel size, if known (images and figures).
    #[must_use]
    pub fn intrinsic_px(&self) -> Option<(f64, f64)> {
        self.intrinsic_px
    }

    /// Child ids in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent id, `None` for the root (or a detached node).
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// The semantic content tree of one slide.
///
/// Structural membership belongs to the upstream converter; the layout pass
/// only annotates nodes and performs the decorator's container wrap. The
/// committed font scale is recorded on the tree itself, mirroring a
/// `font-size` style on the document root.
#[derive(Debug, Clone, Default)]
pub struct ContentTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    scale_percent: Option<u32>,
}

impl ContentTree {
    /// Create an empty tree with no content root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree with a fresh root container.
    #[must_use]
    pub fn with_root() -> Self {
        let mut tree = Self::new();
        let root = tree.push(Node::new(NodeKind::Root, None));
        tree.root = Some(root);
        tree
    }

    /// The content root, if the slide has one.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Append a new element under `parent`.
    pub fn add_element(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.push(Node::new(kind, Some(parent)));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Append a plain text run under `parent`.
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.add_element(parent, NodeKind::Text);
        self.nodes[id.index()].text = text.to_string();
        id
    }

    /// Set the direct text of a node (used for code text runs and labels).
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.index()].text = text.to_string();
    }

    /// Record the intrinsic pixel size of an image or figure.
    pub fn set_intrinsic_px(&mut self, id: NodeId, width: f64, height: f64) {
        self.nodes[id.index()].intrinsic_px = Some((width, height));
    }

    /// Add a class annotation; duplicates are ignored.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let node = &mut self.nodes[id.index()];
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    /// Whether a node carries the given class.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    /// Whether any ancestor of `id` (excluding `id` itself) has `kind`.
    #[must_use]
    pub fn has_ancestor(&self, id: NodeId, kind: NodeKind) -> bool {
        let mut cursor = self.node(id).parent;
        while let Some(up) = cursor {
            if self.node(up).kind() == kind {
                return true;
            }
            cursor = self.node(up).parent;
        }
        false
    }

    /// Whether a node is a text run containing only whitespace.
    #[must_use]
    pub fn is_blank_text(&self, id: NodeId) -> bool {
        let node = self.node(id);
        node.kind() == NodeKind::Text && node.text().trim().is_empty()
    }

    /// Concatenated text of `id` and all its text-run descendants,
    /// in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node_id in self.descendants(id) {
            let node = self.node(node_id);
            if node.kind().is_text_run() {
                out.push_str(node.text());
            }
        }
        out
    }

    /// All nodes of the given kind under the root, in document order.
    #[must_use]
    pub fn by_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        match self.root {
            Some(root) => self
                .descendants(root)
                .filter(|id| self.node(*id).kind() == kind)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Preorder walk of `id` and everything below it.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Wrap `id` in a freshly created `kind` node occupying `id`'s old slot.
    ///
    /// Returns the new wrapper, or `None` when `id` has no parent (the root
    /// cannot be wrapped).
    pub fn wrap_node(&mut self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        let wrapper = self.push(Node::new(kind, Some(parent)));
        let slot = self.nodes[parent.index()]
            .children
            .iter()
            .position(|c| *c == id)?;
        self.nodes[parent.index()].children[slot] = wrapper;
        self.nodes[wrapper.index()].children.push(id);
        self.nodes[id.index()].parent = Some(wrapper);
        Some(wrapper)
    }

    /// Insert a new element as the **first** child of `parent`.
    pub fn insert_first(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.push(Node::new(kind, Some(parent)));
        self.nodes[parent.index()].children.insert(0, id);
        id
    }

    /// Commit the final font-scale percentage for the slide.
    pub fn set_scale_percent(&mut self, percent: u32) {
        self.scale_percent = Some(percent);
    }

    /// The committed font-scale percentage, if a pass has run.
    #[must_use]
    pub fn scale_percent(&self) -> Option<u32> {
        self.scale_percent
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}

/// Preorder iterator over a subtree. Yields the starting node first.
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a ContentTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children = self.tree.node(id).children();
        // Reverse push keeps document order on the pop side.
        self.stack.extend(children.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (ContentTree, NodeId) {
        let mut tree = ContentTree::with_root();
        let root = tree.root().unwrap();
        (tree, root)
    }

    #[test]
    fn empty_tree_has_no_root() {
        let tree = ContentTree::new();
        assert!(tree.root().is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn with_root_creates_root_container() {
        let (tree, root) = sample_tree();
        assert_eq!(tree.node(root).kind(), NodeKind::Root);
        assert!(tree.node(root).parent().is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn add_element_links_parent_and_child() {
        let (mut tree, root) = sample_tree();
        let heading = tree.add_element(root, NodeKind::Heading);
        assert_eq!(tree.node(heading).parent(), Some(root));
        assert_eq!(tree.node(root).children(), &[heading]);
    }

    #[test]
    fn text_content_concatenates_in_document_order() {
        let (mut tree, root) = sample_tree();
        let para = tree.add_element(root, NodeKind::Paragraph);
        tree.add_text(para, "hello ");
        let em = tree.add_element(para, NodeKind::Text);
        tree.set_text(em, "world");
        assert_eq!(tree.text_content(root), "hello world");
    }

    #[test]
    fn add_class_deduplicates() {
        let (mut tree, root) = sample_tree();
        tree.add_class(root, "dense");
        tree.add_class(root, "dense");
        assert_eq!(tree.node(root).classes(), &["dense".to_string()]);
        assert!(tree.has_class(root, "dense"));
        assert!(!tree.has_class(root, "title"));
    }

    #[test]
    fn has_ancestor_walks_the_chain() {
        let (mut tree, root) = sample_tree();
        let quote = tree.add_element(root, NodeKind::Blockquote);
        let para = tree.add_element(quote, NodeKind::Paragraph);
        let text = tree.add_text(para, "quoted");
        assert!(tree.has_ancestor(text, NodeKind::Blockquote));
        assert!(tree.has_ancestor(para, NodeKind::Blockquote));
        assert!(!tree.has_ancestor(quote, NodeKind::Blockquote));
        assert!(!tree.has_ancestor(para, NodeKind::Figure));
    }

    #[test]
    fn wrap_node_replaces_the_slot() {
        let (mut tree, root) = sample_tree();
        let before = tree.add_element(root, NodeKind::Paragraph);
        let code = tree.add_element(root, NodeKind::CodeBlock);
        let after = tree.add_element(root, NodeKind::Paragraph);

        let wrapper = tree.wrap_node(code, NodeKind::Container).unwrap();
        assert_eq!(tree.node(root).children(), &[before, wrapper, after]);
        assert_eq!(tree.node(wrapper).children(), &[code]);
        assert_eq!(tree.node(code).parent(), Some(wrapper));
        assert_eq!(tree.node(wrapper).parent(), Some(root));
    }

    #[test]
    fn wrap_node_refuses_the_root() {
        let (mut tree, root) = sample_tree();
        assert!(tree.wrap_node(root, NodeKind::Container).is_none());
    }

    #[test]
    fn insert_first_prepends() {
        let (mut tree, root) = sample_tree();
        let container = tree.add_element(root, NodeKind::Container);
        let code = tree.add_element(container, NodeKind::CodeBlock);
        let header = tree.insert_first(container, NodeKind::Header);
        assert_eq!(tree.node(container).children(), &[header, code]);
    }

    #[test]
    fn descendants_is_preorder() {
        let (mut tree, root) = sample_tree();
        let quote = tree.add_element(root, NodeKind::Blockquote);
        let p1 = tree.add_element(quote, NodeKind::Paragraph);
        let t1 = tree.add_text(p1, "a");
        let p2 = tree.add_element(quote, NodeKind::Paragraph);

        let order: Vec<NodeId> = tree.descendants(root).collect();
        assert_eq!(order, vec![root, quote, p1, t1, p2]);
    }

    #[test]
    fn by_kind_collects_in_document_order() {
        let (mut tree, root) = sample_tree();
        let h1 = tree.add_element(root, NodeKind::Heading);
        tree.add_element(root, NodeKind::Paragraph);
        let h2 = tree.add_element(root, NodeKind::Heading);
        assert_eq!(tree.by_kind(NodeKind::Heading), vec![h1, h2]);
    }

    #[test]
    fn by_kind_on_rootless_tree_is_empty() {
        let tree = ContentTree::new();
        assert!(tree.by_kind(NodeKind::Heading).is_empty());
    }

    #[test]
    fn blank_text_detection() {
        let (mut tree, root) = sample_tree();
        let para = tree.add_element(root, NodeKind::Paragraph);
        let blank = tree.add_text(para, "  \n\t ");
        let word = tree.add_text(para, "x");
        assert!(tree.is_blank_text(blank));
        assert!(!tree.is_blank_text(word));
        assert!(!tree.is_blank_text(para));
    }

    #[test]
    fn scale_percent_round_trips() {
        let (mut tree, _) = sample_tree();
        assert!(tree.scale_percent().is_none());
        tree.set_scale_percent(120);
        assert_eq!(tree.scale_percent(), Some(120));
    }
}
