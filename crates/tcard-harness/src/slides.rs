#![forbid(unsafe_code)]

//! Slide fixtures for classification and pass tests.

use tcard_dom::{ContentTree, NodeId, NodeKind};

/// Fluent builder for slide content trees.
///
/// Each method appends one content block under the root, in call order,
/// mirroring the shapes the upstream converter emits.
#[derive(Debug, Clone)]
pub struct SlideBuilder {
    tree: ContentTree,
}

impl SlideBuilder {
    /// A slide with an empty content root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: ContentTree::with_root(),
        }
    }

    /// A tree with no content root at all (the no-op case).
    #[must_use]
    pub fn empty() -> ContentTree {
        ContentTree::new()
    }

    fn root(&self) -> NodeId {
        self.tree.root().expect("builder tree always has a root")
    }

    /// Append a heading.
    #[must_use]
    pub fn heading(mut self, text: &str) -> Self {
        let root = self.root();
        let heading = self.tree.add_element(root, NodeKind::Heading);
        self.tree.add_text(heading, text);
        self
    }

    /// Append a prose paragraph.
    #[must_use]
    pub fn paragraph(mut self, text: &str) -> Self {
        let root = self.root();
        let para = self.tree.add_element(root, NodeKind::Paragraph);
        self.tree.add_text(para, text);
        self
    }

    /// Append one list item.
    #[must_use]
    pub fn list_item(mut self, text: &str) -> Self {
        let root = self.root();
        let item = self.tree.add_element(root, NodeKind::ListItem);
        self.tree.add_text(item, text);
        self
    }

    /// Append a blockquote holding one paragraph per entry.
    #[must_use]
    pub fn quote(mut self, paragraphs: &[&str]) -> Self {
        let root = self.root();
        let quote = self.tree.add_element(root, NodeKind::Blockquote);
        for text in paragraphs {
            let para = self.tree.add_element(quote, NodeKind::Paragraph);
            self.tree.add_text(para, text);
        }
        self
    }

    /// Append an unclassed code block.
    #[must_use]
    pub fn code(self, source: &str) -> Self {
        self.code_classed(source, &[], &[])
    }

    /// Append a code block with classes on the block and its text run.
    #[must_use]
    pub fn code_classed(
        mut self,
        source: &str,
        block_classes: &[&str],
        text_classes: &[&str],
    ) -> Self {
        let root = self.root();
        let block = self.tree.add_element(root, NodeKind::CodeBlock);
        let text = self.tree.add_element(block, NodeKind::CodeText);
        self.tree.set_text(text, source);
        for class in block_classes {
            self.tree.add_class(block, class);
        }
        for class in text_classes {
            self.tree.add_class(text, class);
        }
        self
    }

    /// Append a figure wrapping an image of unknown size.
    #[must_use]
    pub fn figure(mut self) -> Self {
        let root = self.root();
        let figure = self.tree.add_element(root, NodeKind::Figure);
        self.tree.add_element(figure, NodeKind::Image);
        self
    }

    /// Append a figure with a known intrinsic pixel size.
    #[must_use]
    pub fn figure_sized(mut self, width_px: f64, height_px: f64) -> Self {
        let root = self.root();
        let figure = self.tree.add_element(root, NodeKind::Figure);
        self.tree.set_intrinsic_px(figure, width_px, height_px);
        self
    }

    /// Append an image directly under the root.
    #[must_use]
    pub fn bare_image(mut self) -> Self {
        let root = self.root();
        self.tree.add_element(root, NodeKind::Image);
        self
    }

    /// Append a paragraph whose only significant child is an image,
    /// flanked by whitespace runs the way converters emit them.
    #[must_use]
    pub fn image_in_paragraph(mut self) -> Self {
        let root = self.root();
        let para = self.tree.add_element(root, NodeKind::Paragraph);
        self.tree.add_text(para, "\n  ");
        self.tree.add_element(para, NodeKind::Image);
        self.tree.add_text(para, "  ");
        self
    }

    /// Finish and hand over the tree.
    #[must_use]
    pub fn build(self) -> ContentTree {
        self.tree
    }
}

impl Default for SlideBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcard_fit::{LayoutCategory, classify};

    #[test]
    fn empty_has_no_root() {
        assert!(SlideBuilder::empty().root().is_none());
        assert!(classify(&SlideBuilder::empty()).is_none());
    }

    #[test]
    fn heading_fixture_is_a_title_slide() {
        let tree = SlideBuilder::new().heading("Launch").build();
        assert_eq!(classify(&tree).unwrap().category, LayoutCategory::Title);
    }

    #[test]
    fn quote_fixture_is_a_quote_slide() {
        let tree = SlideBuilder::new().quote(&["to be", "or not"]).build();
        assert_eq!(classify(&tree).unwrap().category, LayoutCategory::Quote);
        assert_eq!(tree.by_kind(NodeKind::Paragraph).len(), 2);
    }

    #[test]
    fn image_in_paragraph_fixture_is_an_image_slide() {
        let tree = SlideBuilder::new().image_in_paragraph().build();
        assert_eq!(classify(&tree).unwrap().category, LayoutCategory::Image);
    }

    #[test]
    fn code_classed_attaches_classes_to_both_nodes() {
        let tree = SlideBuilder::new()
            .code_classed("x <- 1", &["sourceCode", "r"], &["r"])
            .build();
        let block = tree.by_kind(NodeKind::CodeBlock)[0];
        let text = tree.by_kind(NodeKind::CodeText)[0];
        assert!(tree.has_class(block, "sourceCode"));
        assert!(tree.has_class(block, "r"));
        assert!(tree.has_class(text, "r"));
    }

    #[test]
    fn blocks_append_in_call_order() {
        let tree = SlideBuilder::new()
            .heading("H")
            .paragraph("p")
            .code("c()")
            .build();
        let root = tree.root().unwrap();
        let kinds: Vec<NodeKind> = tree
            .node(root)
            .children()
            .iter()
            .map(|id| tree.node(*id).kind())
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Heading, NodeKind::Paragraph, NodeKind::CodeBlock]
        );
    }
}
