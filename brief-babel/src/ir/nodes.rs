//! Core data structures for the digest document model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A span of inline text inside a text-bearing block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    /// A hyperlink produced from `[label](url)` source syntax.
    Link { label: String, url: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Inline::Link {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Inline content of a paragraph, quote or list item.
pub type InlineText = Vec<Inline>;

/// One semantic unit of a parsed digest.
///
/// Blocks are created once per triggering line group and never mutated after
/// they have been appended to a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Heading of level 1 to 3. Heading text is never link-converted.
    Heading { level: u8, text: String },
    Paragraph { content: InlineText },
    BulletList { items: Vec<InlineText> },
    /// Ordered knowledge-progression list collected under the learning-path heading.
    LearningPath { items: Vec<InlineText> },
    Quote { content: InlineText },
    /// Boundary between two source texts.
    Separator,
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    /// Name of the variant, used by diagnostic formats.
    pub fn node_type(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "Heading",
            Block::Paragraph { .. } => "Paragraph",
            Block::BulletList { .. } => "BulletList",
            Block::LearningPath { .. } => "LearningPath",
            Block::Quote { .. } => "Quote",
            Block::Separator => "Separator",
        }
    }
}

/// Synthetic cover content supplied by the caller, never derived from source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cover {
    pub title: String,
    pub subtitle: String,
    pub generated: NaiveDate,
    /// Optional path or URL of a logo image shown above the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Running header and page-number label applied to every rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFurniture {
    pub header: String,
    /// Label for the page counter; `{page}` is replaced by the page number.
    pub page_label: String,
}

impl Default for PageFurniture {
    fn default() -> Self {
        Self {
            header: "每日生醫新聞解讀".to_string(),
            page_label: "第 {page} 頁".to_string(),
        }
    }
}

/// The full ordered block sequence handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Cover>,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furniture: Option<PageFurniture>,
}

impl Document {
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            cover: None,
            blocks,
            furniture: None,
        }
    }

    /// Text of the first level-1 heading, if any.
    pub fn first_title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading { level: 1, text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of source texts assembled into this document.
    pub fn article_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, Block::Separator))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_title_skips_lower_levels() {
        let doc = Document::with_blocks(vec![
            Block::heading(2, "摘要"),
            Block::heading(1, "Title"),
            Block::Separator,
        ]);
        assert_eq!(doc.first_title(), Some("Title"));
        assert_eq!(doc.article_count(), 1);
    }

    #[test]
    fn blocks_serialize_with_type_tag() {
        let block = Block::Quote {
            content: vec![Inline::text("a "), Inline::link("b", "https://b.test")],
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "quote");
        assert_eq!(json["content"][1]["kind"], "link");
        assert_eq!(json["content"][1]["url"], "https://b.test");
    }
}
