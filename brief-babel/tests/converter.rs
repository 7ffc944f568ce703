//! End-to-end behaviour of the normalizer, segmenter, link converter and assembler.

use brief_babel::common::headings::normalize_headings;
use brief_babel::common::links::convert_links;
use brief_babel::common::segmenter::segment;
use brief_babel::ir::nodes::{Block, Inline};
use brief_babel::{assemble, Assembler, SectionRules};

fn text(s: &str) -> Vec<Inline> {
    vec![Inline::text(s)]
}

#[test]
fn link_conversion_is_idempotent() {
    let input = vec![Inline::text("a [b](c) d [e](f)[g](h) [broken](x")];
    let once = convert_links(&input);
    assert_eq!(convert_links(&once), once);
}

#[test]
fn segmentation_of_degenerate_input() {
    let rules = SectionRules::default();
    assert!(segment::<&str>(&[], &rules).is_empty());
    assert!(segment(&["", "", ""], &rules).is_empty());
    assert_eq!(
        segment(&["[[[(("], &rules),
        vec![Block::Paragraph {
            content: text("[[[((")
        }]
    );
}

#[test]
fn paragraph_flushes_before_bullets() {
    let blocks = segment(
        &["para line", "", "- item1", "- item2", ""],
        &SectionRules::default(),
    );
    assert_eq!(
        blocks,
        vec![
            Block::Paragraph {
                content: text("para line")
            },
            Block::BulletList {
                items: vec![text("item1"), text("item2")]
            },
        ]
    );
}

#[test]
fn learning_path_extraction() {
    let blocks = segment(&["## 學習路徑", "1. A", "2. B", ""], &SectionRules::default());
    assert_eq!(
        blocks,
        vec![
            Block::heading(2, "學習路徑"),
            Block::LearningPath {
                items: vec![text("A"), text("B")]
            },
        ]
    );
}

#[test]
fn first_line_rule_takes_precedence() {
    let lines = normalize_headings(&["摘要", "body"], &SectionRules::default());
    assert_eq!(lines, vec!["# 摘要", "body"]);
}

#[test]
fn hash_count_is_heading_level() {
    let rules = SectionRules::default();
    for level in 1..=3u8 {
        let line = format!("{} Plain heading", "#".repeat(level as usize));
        assert_eq!(
            segment(&[line], &rules),
            vec![Block::heading(level, "Plain heading")]
        );
    }
}

#[test]
fn end_to_end_article() {
    let source = "# Title\n\n## 摘要\nLine one line two\n\n- pointA\n- pointB\n\n## 學習路徑\n1. X\n2. Y\n\n> a quote\n";
    let doc = assemble(&[source], &SectionRules::default(), None);
    assert_eq!(
        doc.blocks,
        vec![
            Block::heading(1, "Title"),
            Block::heading(2, "摘要"),
            Block::Paragraph {
                content: text("Line one line two")
            },
            Block::BulletList {
                items: vec![text("pointA"), text("pointB")]
            },
            Block::heading(2, "學習路徑"),
            Block::LearningPath {
                items: vec![text("X"), text("Y")]
            },
            Block::Quote {
                content: text("a quote")
            },
            Block::Separator,
        ]
    );
}

#[test]
fn custom_rules_change_cues() {
    let rules = SectionRules::new(vec!["Summary".to_string(), "Roadmap".to_string()], "Roadmap");
    let doc = assemble(
        &["Headline\nSummary\nshort\n\nRoadmap\n1. first\n\n1. plain"],
        &rules,
        None,
    );
    assert_eq!(
        doc.blocks,
        vec![
            Block::Paragraph {
                content: text("Headline")
            },
            Block::heading(2, "Summary"),
            Block::Paragraph {
                content: text("short")
            },
            Block::heading(2, "Roadmap"),
            Block::LearningPath {
                items: vec![text("first")]
            },
            Block::Paragraph {
                content: text("1. plain")
            },
            Block::Separator,
        ]
    );
}

#[test]
fn failing_source_does_not_disturb_later_ones() {
    let mut assembler = Assembler::new(SectionRules::default());
    assembler.push_source("# One");
    assert!(assembler.push_source_bytes(b"# Two \xF0\x28").is_err());
    assembler.push_source("# Three");
    let doc = assembler.finish();
    assert_eq!(
        doc.blocks,
        vec![
            Block::heading(1, "One"),
            Block::Separator,
            Block::heading(1, "Three"),
            Block::Separator,
        ]
    );
}
