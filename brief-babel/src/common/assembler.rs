//! Document assembly.
//!
//! The assembler owns the growing [`Document`] for one pipeline run. Each
//! source text is normalized and segmented into a private block buffer first
//! and only then appended, followed by a [`Block::Separator`], so a failing
//! source never leaves a partial article behind.

use crate::common::headings::normalize_headings;
use crate::common::section_rules::SectionRules;
use crate::common::segmenter::segment;
use crate::error::FormatError;
use crate::ir::nodes::{Block, Cover, Document, PageFurniture};

/// Normalize and segment one source text.
pub fn source_to_blocks(source: &str, rules: &SectionRules) -> Vec<Block> {
    let lines: Vec<&str> = source.lines().collect();
    let normalized = normalize_headings(&lines, rules);
    segment(&normalized, rules)
}

/// Builds a [`Document`] from per-article source texts.
#[derive(Debug, Clone)]
pub struct Assembler {
    rules: SectionRules,
    document: Document,
}

impl Assembler {
    pub fn new(rules: SectionRules) -> Self {
        Self {
            rules,
            document: Document::default(),
        }
    }

    /// Prepend synthetic cover content before the first article.
    pub fn with_cover(mut self, cover: Cover) -> Self {
        self.document.cover = Some(cover);
        self
    }

    /// Attach running header and page-number metadata.
    pub fn with_furniture(mut self, furniture: PageFurniture) -> Self {
        self.document.furniture = Some(furniture);
        self
    }

    pub fn rules(&self) -> &SectionRules {
        &self.rules
    }

    /// Append the blocks of one source text followed by a separator.
    pub fn push_source(&mut self, source: &str) {
        let mut blocks = source_to_blocks(source, &self.rules);
        blocks.push(Block::Separator);
        self.document.blocks.extend(blocks);
    }

    /// Like [`Assembler::push_source`] for raw bytes, which must be UTF-8.
    ///
    /// On error the document is left exactly as it was.
    pub fn push_source_bytes(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        let source = std::str::from_utf8(bytes).map_err(|e| {
            FormatError::ParseError(format!(
                "source text {} is not valid UTF-8: {e}",
                self.document.article_count() + 1
            ))
        })?;
        self.push_source(source);
        Ok(())
    }

    /// Blocks assembled so far.
    pub fn blocks(&self) -> &[Block] {
        &self.document.blocks
    }

    pub fn finish(self) -> Document {
        self.document
    }
}

/// Assemble a document from source texts in one call.
pub fn assemble<S: AsRef<str>>(
    sources: &[S],
    rules: &SectionRules,
    cover: Option<Cover>,
) -> Document {
    let mut assembler = Assembler::new(rules.clone());
    if let Some(cover) = cover {
        assembler = assembler.with_cover(cover);
    }
    for source in sources {
        assembler.push_source(source.as_ref());
    }
    assembler.finish()
}

/// Split a multi-article report on rule lines made only of three or more `-`.
///
/// Empty articles are dropped.
pub fn split_articles(report: &str) -> Vec<String> {
    let mut articles = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in report.lines() {
        if is_article_rule(line) {
            push_article(&mut articles, &current);
            current.clear();
        } else {
            current.push(line);
        }
    }
    push_article(&mut articles, &current);
    articles
}

fn push_article(articles: &mut Vec<String>, lines: &[&str]) {
    let text = lines.join("\n");
    let text = text.trim();
    if !text.is_empty() {
        articles.push(text.to_string());
    }
}

fn is_article_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_each_source_ends_with_separator() {
        let doc = assemble(&["# A\nbody", "# B"], &SectionRules::default(), None);
        assert_eq!(doc.article_count(), 2);
        assert_eq!(doc.blocks.last(), Some(&Block::Separator));
        assert_eq!(doc.blocks[0], Block::heading(1, "A"));
        assert_eq!(doc.blocks[3], Block::heading(1, "B"));
    }

    #[test]
    fn test_empty_source_yields_only_separator() {
        let doc = assemble(&[""], &SectionRules::default(), None);
        assert_eq!(doc.blocks, vec![Block::Separator]);
    }

    #[test]
    fn test_buffers_reset_between_sources() {
        let doc = assemble(
            &["# T\n## 學習路徑\n1. A", "1. not an item"],
            &SectionRules::default(),
            None,
        );
        assert!(matches!(doc.blocks[2], Block::LearningPath { .. }));
        assert_eq!(doc.blocks[3], Block::Separator);
        assert!(matches!(doc.blocks[4], Block::Paragraph { .. }));
    }

    #[test]
    fn test_cover_is_kept_separately() {
        let cover = Cover {
            title: "Report".to_string(),
            subtitle: "Sub".to_string(),
            generated: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            logo: None,
        };
        let doc = assemble(&["# A"], &SectionRules::default(), Some(cover.clone()));
        assert_eq!(doc.cover, Some(cover));
        assert_eq!(doc.blocks[0], Block::heading(1, "A"));
    }

    #[test]
    fn test_invalid_utf8_leaves_document_untouched() {
        let mut assembler = Assembler::new(SectionRules::default());
        assembler.push_source("# First");
        let before = assembler.blocks().to_vec();

        let err = assembler.push_source_bytes(&[0x23, 0x20, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, FormatError::ParseError(_)));
        assert_eq!(assembler.blocks(), before.as_slice());

        assembler.push_source_bytes("# Second".as_bytes()).unwrap();
        assert_eq!(assembler.finish().article_count(), 2);
    }

    #[test]
    fn test_split_articles_on_rules() {
        let report = format!("# A\nx\n\n{}\n\n# B\n---\n\n---\n", "-".repeat(90));
        assert_eq!(split_articles(&report), vec!["# A\nx", "# B"]);
    }

    #[test]
    fn test_two_dashes_are_not_a_rule() {
        assert_eq!(split_articles("a\n--\nb"), vec!["a\n--\nb"]);
    }
}
