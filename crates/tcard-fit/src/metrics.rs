#![forbid(unsafe_code)]

//! Deterministic text-metrics backing for [`LayoutProbe`].
//!
//! [`TextMetricsProbe`] simulates the rendered extent of a slide from font
//! geometry alone: per-cell advances scaled by the applied percentage,
//! greedy word wrap against the viewport content box, and fixed pixel
//! costs for margins, code padding, and images. The same inputs always
//! produce the same answers, so search results are reproducible across
//! runs and platforms.
//!
//! Horizontal extent counts only unwrappable runs: raw code lines, single
//! prose words, and image intrinsic widths. Wrapped prose reflows inside
//! the content box and can only push height. Images never scale with the
//! font, which is why a wide image can pin a slide at floor overflow.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use unicode_width::UnicodeWidthStr;

use tcard_dom::{ContentTree, NodeId, NodeKind, counts::grapheme_len};

use crate::probe::LayoutProbe;

/// Safety margin subtracted from each available axis when code is present.
const OVERFLOW_BUFFER_CODE: f64 = 10.0;
/// Safety margin for prose-only slides.
const OVERFLOW_BUFFER_PROSE: f64 = 40.0;
/// A heading word wider than this share of the heading box is breaking.
const WORD_BREAK_RATIO: f64 = 0.8;
/// Assumed edge length for images with no recorded intrinsic size.
const IMAGE_FALLBACK_PX: f64 = 320.0;
/// Vertical padding rendered around one code block.
const CODE_BLOCK_PADDING_PX: f64 = 24.0;
/// Horizontal indent rendered before quoted and list content.
const INDENT_PX: f64 = 24.0;

/// Safety margin for one axis. Code slides get a tighter one; their
/// content is already pre-compacted by the code baseline and step.
fn overflow_buffer(has_code: bool) -> f64 {
    if has_code {
        OVERFLOW_BUFFER_CODE
    } else {
        OVERFLOW_BUFFER_PROSE
    }
}

/// The fixed box a slide renders into.
///
/// `padding_x`/`padding_y` are the total padding consumed on that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Full viewport width in pixels.
    pub width_px: f64,
    /// Full viewport height in pixels.
    pub height_px: f64,
    /// Total horizontal padding in pixels.
    pub padding_x: f64,
    /// Total vertical padding in pixels.
    pub padding_y: f64,
}

impl Viewport {
    /// Validated constructor. Rejects non-finite values, non-positive
    /// dimensions, and padding that meets or exceeds its dimension.
    #[must_use]
    pub fn new(width_px: f64, height_px: f64, padding_x: f64, padding_y: f64) -> Option<Self> {
        let all_finite = width_px.is_finite()
            && height_px.is_finite()
            && padding_x.is_finite()
            && padding_y.is_finite();
        if !all_finite {
            return None;
        }
        if width_px <= 0.0 || height_px <= 0.0 || padding_x < 0.0 || padding_y < 0.0 {
            return None;
        }
        if padding_x >= width_px || padding_y >= height_px {
            return None;
        }
        Some(Self {
            width_px,
            height_px,
            padding_x,
            padding_y,
        })
    }

    /// Width of the content box (viewport minus horizontal padding).
    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.width_px - self.padding_x
    }

    /// Height of the content box (viewport minus vertical padding).
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.height_px - self.padding_y
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_px: 1280.0,
            height_px: 720.0,
            padding_x: 96.0,
            padding_y: 72.0,
        }
    }
}

/// Font geometry the simulation renders with, all at 100% scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Base font size in pixels.
    pub em_px: f64,
    /// Average prose glyph advance, as a fraction of one em.
    pub advance_em: f64,
    /// Monospace glyph advance, as a fraction of one em.
    pub mono_advance_em: f64,
    /// Line height multiplier.
    pub line_height: f64,
    /// Heading size, in ems of the base size.
    pub heading_em: f64,
    /// Code size, in ems of the base size.
    pub code_em: f64,
    /// Vertical margin between blocks, in pixels. Does not scale.
    pub block_margin_px: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            em_px: 16.0,
            advance_em: 0.52,
            mono_advance_em: 0.60,
            line_height: 1.5,
            heading_em: 2.0,
            code_em: 0.9,
            block_margin_px: 12.0,
        }
    }
}

/// Production probe: font-geometry simulation of the rendered slide.
#[derive(Debug)]
pub struct TextMetricsProbe {
    viewport: Viewport,
    font: FontMetrics,
    scale_percent: u32,
    cell_cache: RefCell<FxHashMap<String, usize>>,
}

impl TextMetricsProbe {
    /// Probe for the given viewport with default font geometry, at 100%.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            font: FontMetrics::default(),
            scale_percent: 100,
            cell_cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Replace the font geometry.
    #[must_use]
    pub fn with_font(mut self, font: FontMetrics) -> Self {
        self.font = font;
        self
    }

    /// The scale the probe currently measures at.
    #[must_use]
    pub fn scale_percent(&self) -> u32 {
        self.scale_percent
    }

    fn factor(&self) -> f64 {
        f64::from(self.scale_percent) / 100.0
    }

    fn prose_advance(&self) -> f64 {
        self.font.em_px * self.font.advance_em * self.factor()
    }

    fn heading_advance(&self) -> f64 {
        self.font.em_px * self.font.heading_em * self.font.advance_em * self.factor()
    }

    fn mono_advance(&self) -> f64 {
        self.font.em_px * self.font.code_em * self.font.mono_advance_em * self.factor()
    }

    fn prose_line_height(&self) -> f64 {
        self.font.em_px * self.font.line_height * self.factor()
    }

    fn heading_line_height(&self) -> f64 {
        self.font.em_px * self.font.heading_em * self.font.line_height * self.factor()
    }

    fn code_line_height(&self) -> f64 {
        self.font.em_px * self.font.code_em * self.font.line_height * self.factor()
    }

    /// Display cells of `text`, memoized. Repeated words and code lines are
    /// re-measured on every search iteration, so this is the hot path.
    fn cells(&self, text: &str) -> usize {
        if let Some(&cached) = self.cell_cache.borrow().get(text) {
            return cached;
        }
        let width = UnicodeWidthStr::width(text);
        self.cell_cache.borrow_mut().insert(text.to_owned(), width);
        width
    }

    /// Greedy word wrap: number of rendered lines for `text` in `budget_px`.
    /// A word wider than the budget still occupies one line; its protrusion
    /// is accounted as horizontal extent, not extra lines.
    fn wrapped_line_count(&self, text: &str, budget_px: f64, advance_px: f64) -> usize {
        let mut lines = 0usize;
        let mut used = 0.0f64;
        for word in text.split_whitespace() {
            let word_px = self.cells(word) as f64 * advance_px;
            if lines == 0 {
                lines = 1;
                used = word_px;
            } else if used + advance_px + word_px <= budget_px {
                used += advance_px + word_px;
            } else {
                lines += 1;
                used = word_px;
            }
        }
        lines
    }

    fn widest_word_px(&self, text: &str, advance_px: f64) -> f64 {
        text.split_whitespace()
            .map(|word| self.cells(word) as f64)
            .fold(0.0, f64::max)
            * advance_px
    }

    /// Simulated rendered extent of the whole slide: (horizontal, vertical).
    fn content_extent(&self, tree: &ContentTree) -> (f64, f64) {
        let Some(root) = tree.root() else {
            return (0.0, 0.0);
        };
        let mut height = 0.0;
        let mut scroll = 0.0;
        for child in tree.node(root).children() {
            self.measure_node(tree, *child, 0.0, &mut height, &mut scroll);
        }
        (scroll, height)
    }

    fn measure_node(
        &self,
        tree: &ContentTree,
        id: NodeId,
        indent: f64,
        height: &mut f64,
        scroll: &mut f64,
    ) {
        let node = tree.node(id);
        let budget = self.viewport.content_width() - indent;
        match node.kind() {
            NodeKind::Root | NodeKind::Container => {
                for child in node.children() {
                    self.measure_node(tree, *child, indent, height, scroll);
                }
            }
            NodeKind::Blockquote => {
                for child in node.children() {
                    self.measure_node(tree, *child, indent + INDENT_PX, height, scroll);
                }
            }
            NodeKind::Heading => {
                let text = tree.text_content(id);
                let lines = self.wrapped_line_count(&text, budget, self.heading_advance());
                if lines > 0 {
                    *height += lines as f64 * self.heading_line_height() + self.font.block_margin_px;
                }
                *scroll = scroll.max(indent + self.widest_word_px(&text, self.heading_advance()));
            }
            NodeKind::Paragraph | NodeKind::ListItem => {
                let own_indent = if node.kind() == NodeKind::ListItem {
                    indent + INDENT_PX
                } else {
                    indent
                };
                let text = tree.text_content(id);
                let budget = self.viewport.content_width() - own_indent;
                let lines = self.wrapped_line_count(&text, budget, self.prose_advance());
                if lines > 0 {
                    *height += lines as f64 * self.prose_line_height() + self.font.block_margin_px;
                }
                *scroll = scroll.max(own_indent + self.widest_word_px(&text, self.prose_advance()));
                for child in node.children() {
                    if matches!(tree.node(*child).kind(), NodeKind::Image | NodeKind::Figure) {
                        self.measure_node(tree, *child, own_indent, height, scroll);
                    }
                }
            }
            NodeKind::CodeBlock => {
                let text = tree.text_content(id);
                let line_count = text.lines().count().max(1);
                *height += line_count as f64 * self.code_line_height()
                    + CODE_BLOCK_PADDING_PX
                    + self.font.block_margin_px;
                let widest = text
                    .lines()
                    .map(|line| self.cells(line) as f64)
                    .fold(0.0, f64::max)
                    * self.mono_advance();
                *scroll = scroll.max(indent + widest);
            }
            NodeKind::Figure => {
                if let Some((w, h)) = node.intrinsic_px() {
                    *height += h + self.font.block_margin_px;
                    *scroll = scroll.max(indent + w);
                } else {
                    for child in node.children() {
                        self.measure_node(tree, *child, indent, height, scroll);
                    }
                }
            }
            NodeKind::Image => {
                let (w, h) = node.intrinsic_px().unwrap_or((IMAGE_FALLBACK_PX, IMAGE_FALLBACK_PX));
                *height += h + self.font.block_margin_px;
                *scroll = scroll.max(indent + w);
            }
            NodeKind::Header => {
                *height += self.prose_line_height();
            }
            NodeKind::Text => {
                if !tree.is_blank_text(id) {
                    let text = node.text();
                    let lines = self.wrapped_line_count(text, budget, self.prose_advance());
                    *height += lines as f64 * self.prose_line_height();
                    *scroll = scroll.max(indent + self.widest_word_px(text, self.prose_advance()));
                }
            }
            NodeKind::CodeText => {}
        }
    }
}

impl LayoutProbe for TextMetricsProbe {
    fn apply_scale(&mut self, percent: u32) {
        self.scale_percent = percent;
    }

    fn is_overflowing(&self, tree: &ContentTree) -> bool {
        if tree.root().is_none() {
            return false;
        }
        let has_code = !tree.by_kind(NodeKind::CodeBlock).is_empty();
        let buffer = overflow_buffer(has_code);
        let available_w = self.viewport.width_px - self.viewport.padding_x - buffer;
        let available_h = self.viewport.height_px - self.viewport.padding_y - buffer;
        let (extent_w, extent_h) = self.content_extent(tree);
        extent_w > available_w || extent_h > available_h
    }

    fn is_word_breaking(&self, tree: &ContentTree) -> bool {
        let heading_box = self.viewport.content_width();
        if heading_box <= 0.0 {
            return false;
        }
        for heading in tree.by_kind(NodeKind::Heading) {
            let text = tree.text_content(heading);
            for word in text.split_whitespace() {
                if grapheme_len(word) <= 1 {
                    continue;
                }
                let word_px = self.cells(word) as f64 * self.heading_advance();
                if word_px > WORD_BREAK_RATIO * heading_box {
                    return true;
                }
            }
        }
        false
    }

    fn measure_line_width(&self, tree: &ContentTree, block: NodeId, line: &str) -> f64 {
        let advance = match tree.node(block).kind() {
            NodeKind::CodeBlock | NodeKind::CodeText => self.mono_advance(),
            NodeKind::Heading => self.heading_advance(),
            _ => self.prose_advance(),
        };
        self.cells(line) as f64 * advance
    }

    fn container_width(&self, _tree: &ContentTree, _block: NodeId) -> f64 {
        self.viewport.content_width().max(0.0)
    }
}
