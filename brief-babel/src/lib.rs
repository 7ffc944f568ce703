//! Conversion core for daily news digests
//!
//!     This crate turns the Markdown-flavoured articles produced by the digest pipeline into a
//!     structured document and renders that document into the publishing formats (HTML, PDF,
//!     JSON, Markdown).
//!
//!     The input dialect is small and sloppy: headings come with any number of `#` markers or
//!     none at all, section names such as `摘要` or `學習路徑` may appear as bare lines, and
//!     a learning-path section is just a numbered list under a particular heading. The work of
//!     this crate is to make that regular before any format sees it.
//!
//! Architecture
//!
//!     The conversion is a straight line, with every step living in ./common:
//!
//!         source text ── headings ──> normalized lines ── segmenter ──> blocks ── assembler ──> Document
//!
//!     - headings.rs: rewrites ambiguous heading lines (first line to `#`, section names to `##`).
//!     - segmenter.rs: a line state machine with paragraph, bullet and learning-path accumulators.
//!     - links.rs: turns `[label](url)` spans into structured links for text-bearing blocks.
//!     - assembler.rs: appends each article's blocks plus a separator, atomically, and carries
//!       the cover and page furniture.
//!
//!     This is a pure lib, that is, it powers the brief-cli but is shell agnostic: no code
//!     should suppose a shell environment, be it std print, env vars etc. The only exception is
//!     the PDF format, which has to locate a browser binary.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── publish.rs              # One-call serialize + write
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Parser implementation (markdown only)
//!     │   │   ├── serializer.rs   # Serializer implementation
//!     │   │   └── mod.rs
//!     ├── lib.rs
//!     ├── ir                      # Intermediate Representation
//!     ├── common                  # Normalizer, segmenter, link converter, assembler
//!
//! Testing
//!     tests
//!     └── <format>
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait. Formats have a
//!     parse() and/or serialize() method, a name and file extensions. See the trait def [./format.rs]
//!
//!     - markdown: in and out. Parsing splits a report on its dash rules and assembles the articles.
//!     - html: the publishing target, styled from an explicit Theme.
//!     - pdf: html printed by a headless Chrome.
//!     - json / treeviz: inspection of the IR.
//!
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod publish;
pub mod registry;

pub use common::assembler::{assemble, split_articles, Assembler};
pub use common::section_rules::SectionRules;
pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use ir::nodes::{Block, Cover, Document, Inline, PageFurniture};
pub use registry::FormatRegistry;

/// Parses a multi-article Markdown report into a [`Document`] without cover or furniture.
pub fn parse_report(source: &str, rules: &SectionRules) -> Document {
    let articles = split_articles(source);
    assemble(&articles, rules, None)
}
