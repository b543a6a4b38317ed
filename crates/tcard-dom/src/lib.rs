#![forbid(unsafe_code)]

//! Semantic content tree for one generated title-card slide.
//!
//! # Role in titlecard
//! `tcard-dom` is the shared vocabulary for slide content. The upstream
//! converter builds a [`ContentTree`] out of semantic nodes (headings,
//! paragraphs, code blocks, quotes, figures); `tcard-fit` reads it to
//! classify the slide and annotates it with layout classes and the
//! committed font scale.
//!
//! # This crate provides
//! - [`ContentTree`] and [`NodeId`]: an arena-backed tree with class-list
//!   annotation and reparenting support.
//! - [`NodeKind`]: the semantic node kinds the converter emits plus the
//!   kinds the decorator synthesizes.
//! - [`ElementCounts`]: a one-shot census of the tree, including the
//!   derived counts the classifier rules consume.

/// Census of content kinds over a tree.
pub mod counts;
/// Arena tree, node kinds, and annotation operations.
pub mod tree;

pub use counts::ElementCounts;
pub use tree::{ContentTree, Node, NodeId, NodeKind};
