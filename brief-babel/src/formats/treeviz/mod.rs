//! Treeviz formatter for digest documents
//!
//! A compact tree view of the IR, used by `brief inspect` to check how a report was
//! segmented. One line per node, children indented under box-drawing connectors:
//!
//! <prefix><connector> <icon> <label> (labels truncated to 30 characters)
//!
//! ```text
//! ⧉ Document (1 articles, 5 blocks)
//! ├─ § h1 Title
//! ├─ § h2 摘要
//! ├─ ¶ Line one line two
//! ├─ ☰ 2 items
//! │ ├─ • pointA
//! │ └─ • pointB
//! └─ ⎯ ---
//! ```
//!
//! With the `inline-full` parameter the inline spans of every text-bearing node are listed
//! too (`◦` for text, `⊕` for links).

use super::icons::get_icon;
use crate::common::links::visible_text;
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::nodes::{Block, Document, Inline, InlineText};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

fn truncate(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        return label.to_string();
    }
    let mut short: String = label.chars().take(LABEL_WIDTH - 1).collect();
    short.push('…');
    short
}

struct TreeWriter {
    output: String,
    include_inlines: bool,
}

impl TreeWriter {
    fn line(&mut self, prefix: &str, is_last: bool, icon: &str, label: &str) -> String {
        let connector = if is_last { "└─" } else { "├─" };
        self.output
            .push_str(&format!("{prefix}{connector} {icon} {}\n", truncate(label)));
        format!("{prefix}{}", if is_last { "  " } else { "│ " })
    }

    fn block(&mut self, block: &Block, prefix: &str, is_last: bool) {
        let icon = get_icon(block.node_type());
        match block {
            Block::Heading { level, text } => {
                self.line(prefix, is_last, icon, &format!("h{level} {text}"));
            }
            Block::Paragraph { content } | Block::Quote { content } => {
                let child_prefix = self.line(prefix, is_last, icon, &visible_text(content));
                self.inlines(content, &child_prefix);
            }
            Block::BulletList { items } | Block::LearningPath { items } => {
                let child_prefix =
                    self.line(prefix, is_last, icon, &format!("{} items", items.len()));
                self.items(items, &child_prefix);
            }
            Block::Separator => {
                self.line(prefix, is_last, icon, "---");
            }
        }
    }

    fn items(&mut self, items: &[InlineText], prefix: &str) {
        for (i, item) in items.iter().enumerate() {
            let is_last = i + 1 == items.len();
            let child_prefix = self.line(prefix, is_last, get_icon("ListItem"), &visible_text(item));
            self.inlines(item, &child_prefix);
        }
    }

    fn inlines(&mut self, spans: &[Inline], prefix: &str) {
        if !self.include_inlines {
            return;
        }
        for (i, span) in spans.iter().enumerate() {
            let is_last = i + 1 == spans.len();
            match span {
                Inline::Text { text } => {
                    self.line(prefix, is_last, get_icon("Text"), text);
                }
                Inline::Link { label, url } => {
                    self.line(prefix, is_last, get_icon("Link"), &format!("{label} → {url}"));
                }
            }
        }
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Render the tree. `inline-full=true` adds inline spans.
pub fn to_treeviz_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let include_inlines = params
        .get("inline-full")
        .map(|v| v.is_empty() || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let mut writer = TreeWriter {
        output: format!(
            "{} Document ({} articles, {} blocks)\n",
            get_icon("Document"),
            doc.article_count(),
            doc.blocks.len()
        ),
        include_inlines,
    };

    let mut nodes = doc.blocks.len();
    nodes += usize::from(doc.cover.is_some()) + usize::from(doc.furniture.is_some());
    let mut index = 0;

    if let Some(cover) = &doc.cover {
        index += 1;
        let label = format!("{} ({})", cover.title, cover.generated.format("%Y-%m-%d"));
        writer.line("", index == nodes, get_icon("Cover"), &label);
    }
    for block in &doc.blocks {
        index += 1;
        writer.block(block, "", index == nodes);
    }
    if let Some(furniture) = &doc.furniture {
        writer.line("", true, get_icon("Furniture"), &furniture.header);
    }
    writer.output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree of the parsed blocks with Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        Ok(SerializedDocument::Text(to_treeviz_str_with_params(
            doc, options,
        )))
    }
}
