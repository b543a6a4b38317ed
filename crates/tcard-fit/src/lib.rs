#![forbid(unsafe_code)]

//! Automatic fitting for one generated title-card slide.
//!
//! # Role
//!
//! This crate is the algorithmic core of the workspace. Given the semantic
//! content tree of a slide ([`tcard_dom::ContentTree`]) it runs one
//! synchronous pass that
//!
//! 1. classifies the content shape into a primary [`LayoutCategory`] plus
//!    an orthogonal dense flag,
//! 2. searches for the largest font-scale percentage that neither
//!    overflows the viewport nor breaks a heading word, bounded per
//!    category, and
//! 3. decorates code blocks with a labeled container and padding-density
//!    classes derived from measured line widths.
//!
//! All measurement flows through the [`LayoutProbe`] capability, so the
//! search logic is independent of any real rendering surface.
//! [`TextMetricsProbe`] is the deterministic production backing; scripted
//! probes live in the test harness crate.
//!
//! ```
//! use tcard_dom::{ContentTree, NodeKind};
//! use tcard_fit::{TextMetricsProbe, Viewport, run_pass};
//!
//! let mut tree = ContentTree::with_root();
//! let root = tree.root().unwrap();
//! let heading = tree.add_element(root, NodeKind::Heading);
//! tree.add_text(heading, "Hello");
//!
//! let viewport = Viewport::new(1280.0, 720.0, 96.0, 72.0).unwrap();
//! let mut probe = TextMetricsProbe::new(viewport);
//!
//! let report = run_pass(&mut tree, &mut probe).unwrap();
//! assert_eq!(report.category.class_name(), "title");
//! assert_eq!(tree.scale_percent(), Some(report.scale.state.current));
//! ```

pub mod classes;
pub mod classify;
pub mod decorate;
pub mod metrics;
pub mod pass;
pub mod probe;
pub mod scale;

pub use classify::{Classification, LayoutCategory, RULES, Rule, RuleInput, classify};
pub use decorate::{CodeBlockDecoration, PaddingDensity, decorate_code_blocks};
pub use metrics::{FontMetrics, TextMetricsProbe, Viewport};
pub use pass::{PassReport, run_pass};
pub use probe::LayoutProbe;
pub use scale::{ScaleBounds, ScaleOutcome, ScaleState, ScaleVerdict, run_scale_search};
