#![forbid(unsafe_code)]

//! Measurement capability consumed by the scale search and the decorator.
//!
//! The fitting algorithms never measure anything themselves. They talk to a
//! [`LayoutProbe`], which owns the applied scale and answers questions about
//! the tree *as currently scaled*. Production backs this with
//! [`TextMetricsProbe`](crate::TextMetricsProbe); tests back it with scripted
//! answer tables, so the search logic runs deterministically without a
//! rendering surface.
//!
//! The contract is apply-then-measure: every measuring method reflects the
//! most recent [`apply_scale`](LayoutProbe::apply_scale) call. Callers must
//! re-apply before re-measuring after any scale change.

use tcard_dom::{ContentTree, NodeId};

/// Scale application plus the three measurements the pass needs.
pub trait LayoutProbe {
    /// Commit a font-scale percentage. Subsequent measurements see it.
    fn apply_scale(&mut self, percent: u32);

    /// Whether the tree's rendered extent exceeds the available viewport
    /// area on either axis at the applied scale.
    #[must_use]
    fn is_overflowing(&self, tree: &ContentTree) -> bool;

    /// Whether any heading word is wide enough to wrap onto its own line
    /// at the applied scale.
    #[must_use]
    fn is_word_breaking(&self, tree: &ContentTree) -> bool;

    /// Rendered width in pixels of one line of `block`'s text, using the
    /// block's own font metrics at the applied scale.
    #[must_use]
    fn measure_line_width(&self, tree: &ContentTree, block: NodeId, line: &str) -> f64;

    /// Rendered width in pixels of the container holding `block`.
    #[must_use]
    fn container_width(&self, tree: &ContentTree, block: NodeId) -> f64;
}
