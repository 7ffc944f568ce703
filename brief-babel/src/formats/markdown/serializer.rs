//! Markdown serialization (Document → report)

use crate::common::links::render_plain;
use crate::ir::nodes::{Block, Document, InlineText};

/// Serialize the blocks of a document back into report Markdown.
pub fn serialize_to_markdown(doc: &Document) -> String {
    let mut out = String::new();
    for block in &doc.blocks {
        if !out.is_empty() {
            // Learning-path items must follow the previous line directly, a blank
            // line would close the section on re-import.
            if matches!(block, Block::LearningPath { .. }) {
                out.push('\n');
            } else {
                out.push_str("\n\n");
            }
        }
        write_block(&mut out, block);
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, text } => {
            out.push_str(&"#".repeat(usize::from(*level).clamp(1, 3)));
            out.push(' ');
            out.push_str(text);
        }
        Block::Paragraph { content } => out.push_str(&render_plain(content)),
        Block::BulletList { items } => write_items(out, items, |_| "- ".to_string()),
        Block::LearningPath { items } => write_items(out, items, |i| format!("{}. ", i + 1)),
        Block::Quote { content } => {
            out.push_str("> ");
            out.push_str(&render_plain(content));
        }
        Block::Separator => out.push_str("---"),
    }
}

fn write_items(out: &mut String, items: &[InlineText], marker: impl Fn(usize) -> String) {
    let lines: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}{}", marker(i), render_plain(item)))
        .collect();
    out.push_str(&lines.join("\n"));
}
