#![forbid(unsafe_code)]

//! Test harness for the titlecard workspace.
//!
//! # Role
//!
//! Deterministic stand-ins for everything the layout pass normally gets
//! from a live rendering surface: [`ScriptedProbe`] answers overflow and
//! word-break questions from a fixed table and logs every applied scale,
//! and [`SlideBuilder`] assembles the content-tree shapes the upstream
//! converter emits. Integration tests drive the real pass against these
//! so every run is reproducible.

pub mod probe;
pub mod slides;

pub use probe::ScriptedProbe;
pub use slides::SlideBuilder;
