#![forbid(unsafe_code)]

//! Class names committed to the content tree.
//!
//! These are the stable contract between the layout pass and the slide
//! stylesheet. One primary-category class plus optionally [`DENSE`] land on
//! the root; the code-block decorator owns the rest.

/// Root class for quote-only slides.
pub const QUOTE: &str = "quote";
/// Root class for image-only slides.
pub const IMAGE: &str = "image";
/// Root class for single-heading slides.
pub const TITLE: &str = "title";
/// Root class for short heading-led slides.
pub const HERO: &str = "hero";
/// Root class for everything else.
pub const DEFAULT: &str = "default";
/// Orthogonal root class for text- or code-heavy slides.
pub const DENSE: &str = "dense";

/// Class marking a recognized code-block container.
pub const CODE_WRAP: &str = "code-wrap";
/// Class of the synthesized code-block header.
pub const CODE_HEADER: &str = "code-header";
/// Tightened code-block padding.
pub const COMPACT: &str = "compact";
/// Further tightened padding; always accompanies [`COMPACT`].
pub const COMPACT_EXTRA: &str = "compact-extra";

/// Converter marker classes that never name a language.
pub const NON_LANGUAGE_MARKERS: [&str; 2] = ["sourceCode", "highlight"];
/// Label used when no language class survives filtering.
pub const FALLBACK_LABEL: &str = "CODE";
