#![forbid(unsafe_code)]

//! One-shot census of a content tree.
//!
//! The classifier consumes [`ElementCounts`] instead of re-walking the tree
//! per rule: one preorder pass tallies every content kind plus the derived
//! counts the rule cascade needs. Visible text length is counted in
//! grapheme clusters, not bytes, so accented text and emoji weigh the same
//! as their rendered footprint.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::tree::{ContentTree, NodeKind};

/// Per-kind totals over one slide's content tree.
///
/// All counts are zero for a tree without a content root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementCounts {
    /// Headings of any level.
    pub headings: usize,
    /// All paragraphs, wherever they sit.
    pub paragraphs: usize,
    /// Code blocks.
    pub code_blocks: usize,
    /// List items.
    pub list_items: usize,
    /// Block quotations.
    pub blockquotes: usize,
    /// Figures.
    pub figures: usize,
    /// All images, including those inside figures.
    pub images: usize,
    /// Images **not** wrapped in a figure.
    pub bare_images: usize,
    /// Paragraphs **not** nested inside a blockquote.
    pub paragraphs_outside_blockquote: usize,
    /// Total visible text length in grapheme clusters.
    pub text_len: usize,
}

impl ElementCounts {
    /// Tally the tree in one preorder pass.
    #[must_use]
    pub fn tally(tree: &ContentTree) -> Self {
        let mut counts = Self::default();
        let Some(root) = tree.root() else {
            return counts;
        };

        for id in tree.descendants(root) {
            let node = tree.node(id);
            match node.kind() {
                NodeKind::Heading => counts.headings += 1,
                NodeKind::Paragraph => {
                    counts.paragraphs += 1;
                    if !tree.has_ancestor(id, NodeKind::Blockquote) {
                        counts.paragraphs_outside_blockquote += 1;
                    }
                }
                NodeKind::CodeBlock => counts.code_blocks += 1,
                NodeKind::ListItem => counts.list_items += 1,
                NodeKind::Blockquote => counts.blockquotes += 1,
                NodeKind::Figure => counts.figures += 1,
                NodeKind::Image => {
                    counts.images += 1;
                    if !tree.has_ancestor(id, NodeKind::Figure) {
                        counts.bare_images += 1;
                    }
                }
                NodeKind::Text | NodeKind::CodeText => {
                    counts.text_len += grapheme_len(node.text());
                }
                NodeKind::Root | NodeKind::Container | NodeKind::Header => {}
            }
        }
        counts
    }

    /// Whether the slide carries at least one code block.
    #[must_use]
    pub const fn has_code(&self) -> bool {
        self.code_blocks > 0
    }
}

/// Length of a string in extended grapheme clusters.
#[must_use]
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ContentTree, NodeKind};

    #[test]
    fn rootless_tree_tallies_to_zero() {
        let tree = ContentTree::new();
        assert_eq!(ElementCounts::tally(&tree), ElementCounts::default());
    }

    #[test]
    fn tallies_each_kind() {
        let mut tree = ContentTree::with_root();
        let root = tree.root().unwrap();
        let h = tree.add_element(root, NodeKind::Heading);
        tree.add_text(h, "Title");
        let p = tree.add_element(root, NodeKind::Paragraph);
        tree.add_text(p, "body");
        let code = tree.add_element(root, NodeKind::CodeBlock);
        let src = tree.add_element(code, NodeKind::CodeText);
        tree.set_text(src, "fn x() {}");
        tree.add_element(root, NodeKind::ListItem);

        let counts = ElementCounts::tally(&tree);
        assert_eq!(counts.headings, 1);
        assert_eq!(counts.paragraphs, 1);
        assert_eq!(counts.code_blocks, 1);
        assert_eq!(counts.list_items, 1);
        assert_eq!(counts.text_len, "Title".len() + "body".len() + "fn x() {}".len());
        assert!(counts.has_code());
    }

    #[test]
    fn paragraphs_inside_blockquote_are_not_outside() {
        let mut tree = ContentTree::with_root();
        let root = tree.root().unwrap();
        let quote = tree.add_element(root, NodeKind::Blockquote);
        let quoted = tree.add_element(quote, NodeKind::Paragraph);
        tree.add_text(quoted, "a line");
        let free = tree.add_element(root, NodeKind::Paragraph);
        tree.add_text(free, "free");

        let counts = ElementCounts::tally(&tree);
        assert_eq!(counts.paragraphs, 2);
        assert_eq!(counts.paragraphs_outside_blockquote, 1);
        assert_eq!(counts.blockquotes, 1);
    }

    #[test]
    fn images_inside_figures_are_not_bare() {
        let mut tree = ContentTree::with_root();
        let root = tree.root().unwrap();
        let figure = tree.add_element(root, NodeKind::Figure);
        tree.add_element(figure, NodeKind::Image);
        let para = tree.add_element(root, NodeKind::Paragraph);
        tree.add_element(para, NodeKind::Image);

        let counts = ElementCounts::tally(&tree);
        assert_eq!(counts.images, 2);
        assert_eq!(counts.bare_images, 1);
        assert_eq!(counts.figures, 1);
    }

    #[test]
    fn text_len_counts_graphemes_not_bytes() {
        let mut tree = ContentTree::with_root();
        let root = tree.root().unwrap();
        let para = tree.add_element(root, NodeKind::Paragraph);
        // "é" is two bytes, one grapheme; the flag is eight bytes, one grapheme.
        tree.add_text(para, "é🇦🇺");

        let counts = ElementCounts::tally(&tree);
        assert_eq!(counts.text_len, 2);
    }

    #[test]
    fn grapheme_len_handles_combining_marks() {
        assert_eq!(grapheme_len("e\u{0301}"), 1);
        assert_eq!(grapheme_len("abc"), 3);
        assert_eq!(grapheme_len(""), 0);
    }
}
