#![forbid(unsafe_code)]

//! Scripted probe: layout answers from a table instead of measurement.

use rustc_hash::FxHashMap;

use tcard_dom::{ContentTree, NodeId};
use tcard_fit::LayoutProbe;

/// Deterministic [`LayoutProbe`] driven by a script.
///
/// Thresholds turn an answer on for every scale at or above the given
/// percentage; [`force_at`](Self::force_at) pins both answers for one
/// exact scale and wins over the thresholds. Every applied scale is
/// logged so tests can assert the exact apply-then-measure sequence the
/// search performed.
///
/// Line measurements are intentionally scale-independent: decorator tests
/// set the per-character width and container width directly and reason
/// about ratios.
#[derive(Debug, Clone)]
pub struct ScriptedProbe {
    scale: u32,
    overflow_at: Option<u32>,
    word_break_at: Option<u32>,
    forced: FxHashMap<u32, (bool, bool)>,
    line_px_per_char: f64,
    container_px: f64,
    applied: Vec<u32>,
}

impl ScriptedProbe {
    /// Probe that never overflows and never word-breaks, at 100%.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scale: 100,
            overflow_at: None,
            word_break_at: None,
            forced: FxHashMap::default(),
            line_px_per_char: 8.0,
            container_px: 640.0,
            applied: Vec::new(),
        }
    }

    /// Overflow at `percent` and every scale above it.
    #[must_use]
    pub fn overflow_at(mut self, percent: u32) -> Self {
        self.overflow_at = Some(percent);
        self
    }

    /// Word-break at `percent` and every scale above it.
    #[must_use]
    pub fn word_break_at(mut self, percent: u32) -> Self {
        self.word_break_at = Some(percent);
        self
    }

    /// Pin both answers for one exact scale, overriding the thresholds.
    #[must_use]
    pub fn force_at(mut self, percent: u32, overflowing: bool, word_breaking: bool) -> Self {
        self.forced.insert(percent, (overflowing, word_breaking));
        self
    }

    /// Fixed rendered width per character for line measurements.
    #[must_use]
    pub fn line_px_per_char(mut self, px: f64) -> Self {
        self.line_px_per_char = px;
        self
    }

    /// Fixed container width reported for every block.
    #[must_use]
    pub fn container_px(mut self, px: f64) -> Self {
        self.container_px = px;
        self
    }

    /// The scale currently applied.
    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Every scale applied so far, in order.
    #[must_use]
    pub fn applied(&self) -> &[u32] {
        &self.applied
    }
}

impl Default for ScriptedProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutProbe for ScriptedProbe {
    fn apply_scale(&mut self, percent: u32) {
        self.scale = percent;
        self.applied.push(percent);
        tracing::trace!(percent, "scripted scale applied");
    }

    fn is_overflowing(&self, _tree: &ContentTree) -> bool {
        if let Some(&(overflowing, _)) = self.forced.get(&self.scale) {
            return overflowing;
        }
        self.overflow_at.is_some_and(|t| self.scale >= t)
    }

    fn is_word_breaking(&self, _tree: &ContentTree) -> bool {
        if let Some(&(_, word_breaking)) = self.forced.get(&self.scale) {
            return word_breaking;
        }
        self.word_break_at.is_some_and(|t| self.scale >= t)
    }

    fn measure_line_width(&self, _tree: &ContentTree, _block: NodeId, line: &str) -> f64 {
        line.chars().count() as f64 * self.line_px_per_char
    }

    fn container_width(&self, _tree: &ContentTree, _block: NodeId) -> f64 {
        self.container_px
    }
}
