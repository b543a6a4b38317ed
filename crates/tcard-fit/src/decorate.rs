#![forbid(unsafe_code)]

//! Code-block decoration: container wrap, language header, padding density.
//!
//! Runs after the scale search has committed, since line-width measurement
//! is scale-dependent. Decoration is idempotent: a block whose parent is
//! already a recognized container is not re-wrapped, and an existing
//! header is left in place, so re-running the pass never duplicates
//! structure.

use std::fmt;

use serde::{Deserialize, Serialize};

use tcard_dom::{ContentTree, NodeId, NodeKind, counts::grapheme_len};

use crate::classes;
use crate::probe::LayoutProbe;

/// Widest-line ratio past which compact padding applies.
const COMPACT_RATIO: f64 = 0.75;
/// Widest-line ratio past which compact-extra padding also applies.
const COMPACT_EXTRA_RATIO: f64 = 0.90;

/// Padding density of one decorated code block.
///
/// Cumulative: `CompactExtra` always carries the `compact` class too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaddingDensity {
    /// Widest line leaves comfortable room.
    Normal,
    /// Widest line exceeds 75% of the container width.
    Compact,
    /// Widest line exceeds 90% of the container width.
    CompactExtra,
}

impl PaddingDensity {
    fn from_ratio(ratio: f64) -> Self {
        if ratio > COMPACT_EXTRA_RATIO {
            Self::CompactExtra
        } else if ratio > COMPACT_RATIO {
            Self::Compact
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for PaddingDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Compact => "compact",
            Self::CompactExtra => "compact-extra",
        })
    }
}

/// What the decorator did to one code block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlockDecoration {
    /// The decorated code block.
    pub block: NodeId,
    /// Resolved language label, `"CODE"` when none was found.
    pub label: String,
    /// Padding density committed on the container.
    pub padding: PaddingDensity,
}

/// Decorate every code block in the tree. Returns one record per block,
/// in document order.
pub fn decorate_code_blocks<P: LayoutProbe>(
    tree: &mut ContentTree,
    probe: &P,
) -> Vec<CodeBlockDecoration> {
    let blocks = tree.by_kind(NodeKind::CodeBlock);
    let mut decorations = Vec::with_capacity(blocks.len());
    for block in blocks {
        let Some(container) = ensure_container(tree, block) else {
            continue;
        };
        let label = language_label(tree, block);
        ensure_header(tree, container, &label);
        let padding = padding_density(tree, probe, block, container);
        apply_padding_classes(tree, container, padding);
        decorations.push(CodeBlockDecoration {
            block,
            label,
            padding,
        });
    }
    if !decorations.is_empty() {
        tracing::debug!(blocks = decorations.len(), "code blocks decorated");
    }
    decorations
}

/// The labeled container holding `block`, wrapping it in a fresh one if
/// its parent is not already recognized. `None` only for a detached block.
fn ensure_container(tree: &mut ContentTree, block: NodeId) -> Option<NodeId> {
    if let Some(parent) = tree.node(block).parent() {
        if tree.has_class(parent, classes::CODE_WRAP) {
            return Some(parent);
        }
    }
    let container = tree.wrap_node(block, NodeKind::Container)?;
    tree.add_class(container, classes::CODE_WRAP);
    Some(container)
}

/// Scan block classes, then inner code-text classes, for the first class
/// that names a language. Markers and single-character classes are not
/// languages.
fn language_label(tree: &ContentTree, block: NodeId) -> String {
    let node = tree.node(block);
    let inner = node
        .children()
        .iter()
        .filter(|child| tree.node(**child).kind() == NodeKind::CodeText)
        .flat_map(|child| tree.node(*child).classes().iter());
    node.classes()
        .iter()
        .chain(inner)
        .find(|class| is_language_class(class.as_str()))
        .map_or_else(|| classes::FALLBACK_LABEL.to_string(), |c| c.to_uppercase())
}

fn is_language_class(class: &str) -> bool {
    !classes::NON_LANGUAGE_MARKERS.contains(&class) && grapheme_len(class) > 1
}

/// Give the container a header carrying the label, unless one exists.
fn ensure_header(tree: &mut ContentTree, container: NodeId, label: &str) {
    let present = tree
        .node(container)
        .children()
        .iter()
        .any(|child| tree.node(*child).kind() == NodeKind::Header);
    if present {
        return;
    }
    let header = tree.insert_first(container, NodeKind::Header);
    tree.add_class(header, classes::CODE_HEADER);
    tree.set_text(header, label);
}

/// Ratio of the widest code line to the container width. The widest line
/// is picked by character count before the single rendered measurement.
fn padding_density<P: LayoutProbe>(
    tree: &ContentTree,
    probe: &P,
    block: NodeId,
    container: NodeId,
) -> PaddingDensity {
    let container_w = probe.container_width(tree, container);
    if container_w <= 0.0 {
        return PaddingDensity::Normal;
    }
    let text = tree.text_content(block);
    let Some(widest) = text.lines().max_by_key(|line| grapheme_len(line)) else {
        return PaddingDensity::Normal;
    };
    let ratio = probe.measure_line_width(tree, block, widest) / container_w;
    PaddingDensity::from_ratio(ratio)
}

fn apply_padding_classes(tree: &mut ContentTree, container: NodeId, padding: PaddingDensity) {
    match padding {
        PaddingDensity::Normal => {}
        PaddingDensity::Compact => tree.add_class(container, classes::COMPACT),
        PaddingDensity::CompactExtra => {
            tree.add_class(container, classes::COMPACT);
            tree.add_class(container, classes::COMPACT_EXTRA);
        }
    }
}
