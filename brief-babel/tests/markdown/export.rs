//! Document → report text and the treeviz view of a parsed report

use crate::common::{daily_report, published_report};
use brief_babel::formats::treeviz::to_treeviz_str;
use brief_babel::{parse_report, FormatRegistry, SectionRules};
use insta::assert_snapshot;

#[test]
fn export_then_import_is_stable() {
    let registry = FormatRegistry::default();
    let doc = daily_report();
    let text = registry.serialize(&doc, "markdown").unwrap();
    assert_eq!(parse_report(&text, &SectionRules::default()), doc);
}

#[test]
fn export_drops_cover_and_furniture() {
    let registry = FormatRegistry::default();
    let text = registry.serialize(&published_report(), "markdown").unwrap();
    assert!(text.starts_with("# 高通量定序揭示腫瘤微環境新標記\n"));
    assert!(!text.contains("每日生醫新聞報告"));
    assert!(text.contains("\n## 學習路徑\n1. 單細胞定序基礎\n2. 腫瘤免疫學入門\n"));
    assert!(text.ends_with("---\n"));
}

#[test]
fn daily_report_treeviz() {
    let tree = to_treeviz_str(&daily_report());
    assert_snapshot!("daily_report_treeviz", tree.trim_end());
}
