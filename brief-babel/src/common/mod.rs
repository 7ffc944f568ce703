//! Format-agnostic conversion steps shared by every output format.
//!
//! Source text flows through these in order: [`headings`] rewrites ambiguous
//! heading lines, [`segmenter`] turns lines into blocks (using [`links`] for
//! inline spans), and [`assembler`] stitches per-article blocks into one
//! [`Document`](crate::ir::nodes::Document).

pub mod assembler;
pub mod headings;
pub mod links;
pub mod section_rules;
pub mod segmenter;
