//! Line-oriented block segmentation.
//!
//! The segmenter consumes normalized lines one at a time and keeps three
//! accumulators open: paragraph fragments, bullet items and learning-path
//! items. Accumulated content becomes exactly one [`Block`] when it is flushed,
//! which happens on a blank line, when a line of a different kind arrives, or
//! at the end of input.
//!
//! Transitions, first match wins (lines are trimmed first):
//!
//! | line                                   | action                                                    |
//! |----------------------------------------|-----------------------------------------------------------|
//! | blank                                  | learning mode: flush learning, leave mode; else flush paragraph, bullets |
//! | `## <learning label>`                  | flush everything, emit `Heading(2, label)`, (re)enter learning mode |
//! | `<digits>. ` while in learning mode    | strip ordinal, collect as learning-path item              |
//! | `### ` / `## ` / `# `                  | flush everything, emit heading                            |
//! | `> `                                   | flush everything, emit quote                              |
//! | `- `                                   | flush paragraph/learning, collect bullet                  |
//! | anything else                          | flush bullets/learning, collect paragraph fragment        |
//!
//! Learning mode is only left on a blank line; lines that are not ordinal
//! items while it is active are handled by the remaining rows as usual. The
//! segmenter is total: every input produces a (possibly empty) block list.

use crate::common::links::parse_inline;
use crate::common::section_rules::SectionRules;
use crate::ir::nodes::{Block, InlineText};
use once_cell::sync::Lazy;
use regex::Regex;

static ORDINAL_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+").expect("ordinal pattern is valid"));

/// Shape of a single trimmed line, before segmenter state is considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    LearningPathHeading,
    OrdinalItem(&'a str),
    Heading(u8, &'a str),
    Quote(&'a str),
    Bullet(&'a str),
    Text(&'a str),
}

/// Classify a trimmed line. Ordinal items are reported for every `N. ` line;
/// the segmenter only treats them as learning-path items in learning mode.
pub fn classify<'a>(line: &'a str, rules: &SectionRules) -> LineKind<'a> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if rules.is_learning_path_heading(line) {
        return LineKind::LearningPathHeading;
    }
    if let Some(found) = ORDINAL_ITEM.find(line) {
        return LineKind::OrdinalItem(line[found.end()..].trim());
    }
    classify_marked(line)
}

fn classify_marked(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix("### ") {
        LineKind::Heading(3, rest)
    } else if let Some(rest) = line.strip_prefix("## ") {
        LineKind::Heading(2, rest)
    } else if let Some(rest) = line.strip_prefix("# ") {
        LineKind::Heading(1, rest)
    } else if let Some(rest) = line.strip_prefix("> ") {
        LineKind::Quote(rest)
    } else if let Some(rest) = line.strip_prefix("- ") {
        LineKind::Bullet(rest)
    } else {
        LineKind::Text(line)
    }
}

/// Owned segmentation state for one source text.
#[derive(Debug)]
pub struct Segmenter<'r> {
    rules: &'r SectionRules,
    paragraph: Vec<String>,
    bullets: Vec<InlineText>,
    learning_mode: bool,
    learning: Vec<InlineText>,
    blocks: Vec<Block>,
}

impl<'r> Segmenter<'r> {
    pub fn new(rules: &'r SectionRules) -> Self {
        Self {
            rules,
            paragraph: Vec::new(),
            bullets: Vec::new(),
            learning_mode: false,
            learning: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Whether a learning-path section is currently open.
    pub fn in_learning_mode(&self) -> bool {
        self.learning_mode
    }

    /// Feed one line.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        match classify(line, self.rules) {
            LineKind::Blank => {
                if self.learning_mode {
                    self.flush_learning();
                    self.learning_mode = false;
                } else {
                    self.flush_paragraph();
                    self.flush_bullets();
                }
            }
            LineKind::LearningPathHeading => {
                self.flush_all();
                self.blocks
                    .push(Block::heading(2, self.rules.learning_path_label.clone()));
                self.learning_mode = true;
                self.learning.clear();
            }
            LineKind::OrdinalItem(item) if self.learning_mode => {
                self.flush_paragraph();
                self.flush_bullets();
                self.learning.push(parse_inline(item));
            }
            LineKind::OrdinalItem(_) => self.push_text(line),
            LineKind::Heading(level, text) => {
                self.flush_all();
                self.blocks.push(Block::heading(level, text.trim()));
            }
            LineKind::Quote(text) => {
                self.flush_all();
                self.blocks.push(Block::Quote {
                    content: parse_inline(text.trim()),
                });
            }
            LineKind::Bullet(text) => {
                self.flush_learning();
                self.flush_paragraph();
                self.bullets.push(parse_inline(text.trim()));
            }
            LineKind::Text(text) => self.push_text(text),
        }
    }

    fn push_text(&mut self, text: &str) {
        self.flush_learning();
        self.flush_bullets();
        self.paragraph.push(text.to_string());
    }

    /// Join buffered fragments into one paragraph.
    pub fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let joined = self.paragraph.join(" ");
        self.paragraph.clear();
        let text = joined.trim();
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph {
                content: parse_inline(text),
            });
        }
    }

    pub fn flush_bullets(&mut self) {
        if self.bullets.is_empty() {
            return;
        }
        let items = std::mem::take(&mut self.bullets);
        self.blocks.push(Block::BulletList { items });
    }

    pub fn flush_learning(&mut self) {
        if self.learning.is_empty() {
            return;
        }
        let items = std::mem::take(&mut self.learning);
        self.blocks.push(Block::LearningPath { items });
    }

    fn flush_all(&mut self) {
        self.flush_learning();
        self.flush_paragraph();
        self.flush_bullets();
    }

    /// Flush whatever is still open and return the blocks.
    pub fn finish(mut self) -> Vec<Block> {
        if self.learning_mode {
            self.flush_learning();
        }
        self.flush_paragraph();
        self.flush_bullets();
        self.blocks
    }
}

/// Segment a full sequence of normalized lines.
pub fn segment<S: AsRef<str>>(lines: &[S], rules: &SectionRules) -> Vec<Block> {
    let mut segmenter = Segmenter::new(rules);
    for line in lines {
        segmenter.push_line(line.as_ref());
    }
    segmenter.finish()
}
