#![forbid(unsafe_code)]

//! Content-shape classification.
//!
//! One slide gets exactly one primary [`LayoutCategory`], chosen by an
//! ordered rule cascade over the tree census: the first rule whose
//! predicate holds wins, later rules are never consulted, and a slide
//! matching nothing is [`LayoutCategory::Default`]. The cascade order *is*
//! the priority order (a lone heading is both a title and a hero; it
//! becomes a title because that rule runs first).
//!
//! Orthogonal to the cascade, a slide can be flagged [`dense`] when it
//! carries enough text (or code plus text) to warrant tighter styling.
//! Density combines with any category, including `Title` — a single very
//! long heading legitimately triggers both.
//!
//! [`dense`]: Classification::dense

use std::fmt;

use serde::{Deserialize, Serialize};

use tcard_dom::{ContentTree, ElementCounts, NodeKind};

use crate::classes;

/// Grapheme length above which any slide is dense.
const DENSE_TEXT_LEN: usize = 500;
/// Grapheme length above which a slide with code is dense.
const DENSE_TEXT_LEN_WITH_CODE: usize = 300;
/// Heroes must stay below this much visible text.
const HERO_TEXT_LIMIT: usize = 200;

/// Primary layout category of one slide. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutCategory {
    /// Nothing but block quotations.
    Quote,
    /// A single figure or a single lone image.
    Image,
    /// A single heading and nothing else.
    Title,
    /// Heading-led slide with almost no body text.
    Hero,
    /// Everything else.
    Default,
}

impl LayoutCategory {
    /// The root class committed for this category.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Quote => classes::QUOTE,
            Self::Image => classes::IMAGE,
            Self::Title => classes::TITLE,
            Self::Hero => classes::HERO,
            Self::Default => classes::DEFAULT,
        }
    }
}

impl fmt::Display for LayoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Everything a rule predicate may inspect.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// The slide's content tree.
    pub tree: &'a ContentTree,
    /// Census of the tree.
    pub counts: &'a ElementCounts,
}

/// One entry of the cascade: a named predicate and the category it awards.
pub struct Rule {
    /// Stable name, for diagnostics and tests.
    pub name: &'static str,
    /// Category awarded when the predicate holds.
    pub category: LayoutCategory,
    /// The predicate.
    pub applies: fn(&RuleInput<'_>) -> bool,
}

/// The cascade, in priority order. First match wins; `Default` is the
/// implicit fallthrough and has no entry.
pub const RULES: &[Rule] = &[
    Rule {
        name: "quote",
        category: LayoutCategory::Quote,
        applies: is_quote_slide,
    },
    Rule {
        name: "image",
        category: LayoutCategory::Image,
        applies: is_image_slide,
    },
    Rule {
        name: "title",
        category: LayoutCategory::Title,
        applies: is_title_slide,
    },
    Rule {
        name: "hero",
        category: LayoutCategory::Hero,
        applies: is_hero_slide,
    },
];

/// Blockquotes only: every paragraph nested in a quote, nothing else present.
fn is_quote_slide(input: &RuleInput<'_>) -> bool {
    let c = input.counts;
    c.blockquotes > 0
        && c.paragraphs_outside_blockquote == 0
        && c.headings == 0
        && c.code_blocks == 0
        && c.list_items == 0
        && c.figures == 0
        && c.bare_images == 0
}

/// Exactly one figure, or exactly one image wrapped in image-only paragraphs.
fn is_image_slide(input: &RuleInput<'_>) -> bool {
    let c = input.counts;
    let single_figure = c.figures == 1
        && c.headings == 0
        && c.paragraphs_outside_blockquote == 0
        && c.code_blocks == 0
        && c.blockquotes == 0
        && c.list_items == 0;
    if single_figure {
        return true;
    }

    let single_bare_image = c.bare_images == 1
        && c.figures == 0
        && c.headings == 0
        && c.code_blocks == 0
        && c.blockquotes == 0
        && c.list_items == 0;
    single_bare_image && paragraphs_only_wrap_images(input.tree)
}

/// Exactly one heading and no body content of any kind.
fn is_title_slide(input: &RuleInput<'_>) -> bool {
    let c = input.counts;
    c.headings == 1
        && c.paragraphs == 0
        && c.code_blocks == 0
        && c.list_items == 0
        && c.blockquotes == 0
        && c.bare_images == 0
}

/// Heading-led, at most one paragraph, under the hero text limit.
fn is_hero_slide(input: &RuleInput<'_>) -> bool {
    let c = input.counts;
    c.code_blocks == 0
        && c.list_items == 0
        && c.blockquotes == 0
        && c.paragraphs <= 1
        && c.headings > 0
        && c.text_len < HERO_TEXT_LIMIT
}

/// Every paragraph holds exactly one non-whitespace child, and it is an image.
fn paragraphs_only_wrap_images(tree: &ContentTree) -> bool {
    tree.by_kind(NodeKind::Paragraph).iter().all(|para| {
        let mut significant = tree
            .node(*para)
            .children()
            .iter()
            .filter(|child| !tree.is_blank_text(**child));
        matches!(
            (significant.next(), significant.next()),
            (Some(only), None) if tree.node(*only).kind() == NodeKind::Image
        )
    })
}

/// Result of classifying one slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// The resolved primary category.
    pub category: LayoutCategory,
    /// Orthogonal density flag.
    pub dense: bool,
    /// The census the rules were evaluated against.
    pub counts: ElementCounts,
}

impl Classification {
    /// Commit the category (and density) classes onto the tree root.
    pub fn annotate(&self, tree: &mut ContentTree) {
        let Some(root) = tree.root() else {
            return;
        };
        tree.add_class(root, self.category.class_name());
        if self.dense {
            tree.add_class(root, classes::DENSE);
        }
    }
}

/// Classify one slide. Returns `None` when the tree has no content root;
/// the whole layout pass is a no-op in that case.
#[must_use]
pub fn classify(tree: &ContentTree) -> Option<Classification> {
    tree.root()?;
    let counts = ElementCounts::tally(tree);
    let input = RuleInput {
        tree,
        counts: &counts,
    };

    let category = RULES
        .iter()
        .find(|rule| (rule.applies)(&input))
        .map_or(LayoutCategory::Default, |rule| rule.category);
    let dense = is_dense(&counts);

    tracing::debug!(
        category = %category,
        dense,
        text_len = counts.text_len,
        code_blocks = counts.code_blocks,
        "slide classified"
    );

    Some(Classification {
        category,
        dense,
        counts,
    })
}

/// Density is independent of the cascade and may pair with any category.
fn is_dense(counts: &ElementCounts) -> bool {
    counts.text_len > DENSE_TEXT_LEN
        || (counts.has_code() && counts.text_len > DENSE_TEXT_LEN_WITH_CODE)
}
