//! Markdown parsing (report → Document)
//!
//! Pipeline: report text → articles (dash rules) → per-article normalize + segment → Document

use crate::common::assembler::{split_articles, Assembler};
use crate::common::section_rules::SectionRules;
use crate::error::FormatError;
use crate::ir::nodes::Document;

/// Parse a report into a document without cover or furniture.
pub fn parse_from_markdown(source: &str, rules: &SectionRules) -> Result<Document, FormatError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut assembler = Assembler::new(rules.clone());
    for article in split_articles(source) {
        assembler.push_source(&article);
    }
    Ok(assembler.finish())
}

/// Parse raw report bytes, rejecting invalid UTF-8.
pub fn parse_bytes(bytes: &[u8], rules: &SectionRules) -> Result<Document, FormatError> {
    let source = std::str::from_utf8(bytes)
        .map_err(|e| FormatError::ParseError(format!("report is not valid UTF-8: {e}")))?;
    parse_from_markdown(source, rules)
}
