//! Report → Document

use crate::common::{daily_report, fixture};
use brief_babel::format::Format;
use brief_babel::formats::MarkdownFormat;
use brief_babel::ir::nodes::{Block, Inline};
use brief_babel::{FormatRegistry, SectionRules};

#[test]
fn fixture_has_two_articles() {
    let doc = daily_report();
    assert_eq!(doc.article_count(), 2);
    assert_eq!(doc.blocks.len(), 16);
    assert_eq!(doc.first_title(), Some("高通量定序揭示腫瘤微環境新標記"));
}

#[test]
fn bare_section_names_become_headings() {
    let doc = daily_report();
    assert_eq!(doc.blocks[1], Block::heading(2, "摘要"));
    assert_eq!(doc.blocks[12], Block::heading(2, "導讀：新型鹼基編輯器降低脫靶率。"));
}

#[test]
fn paragraph_lines_are_joined() {
    let doc = daily_report();
    assert_eq!(
        doc.blocks[2],
        Block::Paragraph {
            content: vec![Inline::text("研究團隊利用單細胞定序， 找出三個與免疫逃脫相關的標記。")]
        }
    );
}

#[test]
fn links_are_structured() {
    let doc = daily_report();
    assert_eq!(
        doc.blocks[4],
        Block::BulletList {
            items: vec![
                vec![Inline::text("標記 A 與 T 細胞耗竭相關")],
                vec![
                    Inline::text("詳見 "),
                    Inline::link("原始論文", "https://doi.org/10.1000/xyz")
                ],
            ]
        }
    );
    assert_eq!(
        doc.blocks[9],
        Block::Paragraph {
            content: vec![Inline::link("點擊這裡閱讀原文", "https://news.example.com/a")]
        }
    );
}

#[test]
fn learning_path_is_collected() {
    let doc = daily_report();
    assert_eq!(doc.blocks[5], Block::heading(2, "學習路徑"));
    assert_eq!(
        doc.blocks[6],
        Block::LearningPath {
            items: vec![
                vec![Inline::text("單細胞定序基礎")],
                vec![Inline::text("腫瘤免疫學入門")],
            ]
        }
    );
}

#[test]
fn registry_parse_matches_direct_parse() {
    let source = fixture("daily_report.md");
    let via_registry = FormatRegistry::default().parse(&source, "markdown").unwrap();
    let direct = MarkdownFormat::new(SectionRules::default())
        .parse(&source)
        .unwrap();
    assert_eq!(via_registry, direct);
    assert_eq!(via_registry, daily_report());
}

#[test]
fn windows_line_endings_parse_the_same() {
    let source = fixture("daily_report.md").replace('\n', "\r\n");
    let doc = FormatRegistry::default().parse(&source, "markdown").unwrap();
    assert_eq!(doc, daily_report());
}
