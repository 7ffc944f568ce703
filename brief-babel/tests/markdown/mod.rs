//! Markdown format tests
//!
//! Import of multi-article reports and export back to report text.

mod export;
mod import;
