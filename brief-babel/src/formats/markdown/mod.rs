//! Markdown format implementation
//!
//! This is the digest's native dialect, so it is the only format that parses as well as
//! serializes. A report file holds several articles separated by dash rules; see
//! [`crate::common`] for how each article is turned into blocks.
//!
//! # Element Mapping Table
//!
//! | Block          | Markdown                      | Import notes                                      |
//! |----------------|-------------------------------|---------------------------------------------------|
//! | Heading        | `#`, `##`, `###`              | Bare section names are promoted to `##`           |
//! | Paragraph      | Plain lines                   | Consecutive lines are joined with one space       |
//! | BulletList     | `- item`                      | Only `- ` markers                                 |
//! | LearningPath   | `1. item` under `## 學習路徑` | Numbers are renumbered from 1 on export           |
//! | Quote          | `> text`                      | One quote block per line                          |
//! | Separator      | `---`                         | Any line of three or more `-` splits articles     |
//! | Inline Link    | `[label](url)`                | Not nested; headings keep the raw text            |
//!
//! # Lossy Conversions
//!
//! - The cover and page furniture are not part of the report text and are dropped on export.
//! - A learning-path section is exported without blank lines between its heading and items;
//!   text interleaved with the items is exported on its own and may merge on re-import.

pub mod parser;
pub mod serializer;

use crate::common::section_rules::SectionRules;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for digest Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    rules: SectionRules,
}

impl MarkdownFormat {
    pub fn new(rules: SectionRules) -> Self {
        Self { rules }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Digest Markdown report"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_markdown(source, &self.rules)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }
}
