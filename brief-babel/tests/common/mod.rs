//! Shared helpers for the integration tests.

use brief_babel::ir::nodes::{Cover, Document, PageFurniture};
use brief_babel::{parse_report, SectionRules};
use chrono::NaiveDate;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {name}: {e}"))
}

/// The two-article report fixture, parsed with the default section rules.
pub fn daily_report() -> Document {
    parse_report(&fixture("daily_report.md"), &SectionRules::default())
}

pub fn sample_cover() -> Cover {
    Cover {
        title: "每日生醫新聞報告".to_string(),
        subtitle: "技術導讀與學習地圖".to_string(),
        generated: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        logo: None,
    }
}

/// The fixture report with cover and page furniture, as the pipeline renders it.
pub fn published_report() -> Document {
    let mut doc = daily_report();
    doc.cover = Some(sample_cover());
    doc.furniture = Some(PageFurniture::default());
    doc
}
