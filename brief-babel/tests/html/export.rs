//! HTML export of a full report

use crate::common::{daily_report, published_report};
use brief_babel::formats::{HtmlFormat, Theme};
use brief_babel::format::Format;
use brief_babel::publish::{publish_with, PublishArtifact, PublishSpec};
use brief_babel::FormatRegistry;

fn render(doc: &brief_babel::Document) -> String {
    FormatRegistry::default().serialize(doc, "html").unwrap()
}

#[test]
fn every_block_kind_is_rendered() {
    let html = render(&daily_report());
    for needle in [
        "class=\"brief-title-box\"",
        "<h2 class=\"brief-heading-2\">摘要</h2>",
        "<h3 class=\"brief-heading-3\">重點</h3>",
        "<ul class=\"brief-list\">",
        "class=\"brief-learning-path\"",
        "<blockquote class=\"brief-quote\">",
        "<hr class=\"brief-separator\">",
        "<a href=\"https://news.example.com/b\">點擊這裡閱讀原文</a>",
    ] {
        assert!(html.contains(needle), "missing {needle}");
    }
    assert_eq!(html.matches("<hr class=\"brief-separator\">").count(), 2);
}

#[test]
fn cover_and_furniture_are_rendered() {
    let html = render(&published_report());
    assert!(html.contains("<section class=\"brief-cover\">"));
    assert!(html.contains("<p class=\"brief-cover-subtitle\">技術導讀與學習地圖</p>"));
    assert!(html.contains("產出日期：2024/05/01"));
    assert!(html.contains("@top-left { content: \"每日生醫新聞解讀\"; }"));
    let cover_at = html.find("<section class=\"brief-cover\">").unwrap();
    let first_heading_at = html.find("<div class=\"brief-title-box\">").unwrap();
    assert!(cover_at < first_heading_at);
}

#[test]
fn theme_values_reach_the_stylesheet() {
    let theme = Theme {
        primary_color: "#112233".to_string(),
        learning_caption: "Roadmap:".to_string(),
        ..Theme::default()
    };
    let html = HtmlFormat::new(theme).serialize(&daily_report()).unwrap();
    assert!(html.contains("--brief-primary: #112233;"));
    assert!(html.contains("<p class=\"brief-learning-caption\">Roadmap:</p>"));
    assert!(!html.contains("學習路徑：</p>"));
}

#[test]
fn configured_registry_is_used_by_publish() {
    let mut registry = FormatRegistry::default();
    registry.register(HtmlFormat::new(Theme {
        accent_color: "#ABCDEF".to_string(),
        ..Theme::default()
    }));
    let doc = daily_report();
    match publish_with(&registry, PublishSpec::new(&doc, "html")).unwrap() {
        PublishArtifact::InMemory(html) => assert!(html.contains("--brief-accent: #ABCDEF;")),
        PublishArtifact::File(_) => panic!("expected in-memory output"),
    }
}
