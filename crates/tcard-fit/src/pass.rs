#![forbid(unsafe_code)]

//! The single layout pass run on "content ready".
//!
//! Fixed order: classify, scale, decorate. Classification picks the scale
//! bounds, the search commits the final percentage to the tree, and only
//! then are code blocks decorated, because their line-width measurements
//! depend on the settled scale. The pass runs exactly once per slide and
//! is a silent no-op for a tree with no content root.

use serde::{Deserialize, Serialize};

use tcard_dom::{ContentTree, ElementCounts};

use crate::classify::{LayoutCategory, classify};
use crate::decorate::{CodeBlockDecoration, decorate_code_blocks};
use crate::probe::LayoutProbe;
use crate::scale::{ScaleBounds, ScaleOutcome, run_scale_search};

/// Everything one pass decided, for logging and inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    /// Primary category committed to the root.
    pub category: LayoutCategory,
    /// Whether the dense class was committed.
    pub dense: bool,
    /// Census the classification was derived from.
    pub counts: ElementCounts,
    /// Settled scale search result.
    pub scale: ScaleOutcome,
    /// Decoration record per code block, in document order.
    pub decorations: Vec<CodeBlockDecoration>,
}

/// Run the full pass against a probe. Returns `None` without touching
/// anything when the tree has no content root.
pub fn run_pass<P: LayoutProbe>(tree: &mut ContentTree, probe: &mut P) -> Option<PassReport> {
    let Some(classification) = classify(tree) else {
        tracing::debug!("no content root, layout pass skipped");
        return None;
    };
    classification.annotate(tree);

    let bounds = ScaleBounds::for_slide(classification.category, classification.counts.has_code());
    let scale = run_scale_search(tree, probe, bounds);
    tree.set_scale_percent(scale.state.current);

    let decorations = decorate_code_blocks(tree, probe);

    tracing::debug!(
        category = %classification.category,
        dense = classification.dense,
        scale = scale.state.current,
        verdict = %scale.verdict,
        blocks = decorations.len(),
        "layout pass committed"
    );

    Some(PassReport {
        category: classification.category,
        dense: classification.dense,
        counts: classification.counts,
        scale,
        decorations,
    })
}
