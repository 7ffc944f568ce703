//! The daily Markdown report: per-article entries separated by dash rules.

use crate::error::{PipelineError, Result};
use crate::feed::Article;
use brief_config::SectionsConfig;
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Width of the dash rule written between articles.
pub const ARTICLE_RULE_WIDTH: usize = 90;

pub fn report_file_name(date: NaiveDate) -> String {
    format!("news_report_{}.md", date.format("%Y%m%d"))
}

pub fn pdf_file_name(date: NaiveDate) -> String {
    format!("news_summary_{}.pdf", date.format("%Y%m%d"))
}

/// Heading and link label of the section that points back at the source article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSection {
    pub heading: String,
    pub text: String,
}

impl Default for LinkSection {
    fn default() -> Self {
        Self {
            heading: "原文連結".to_string(),
            text: "點擊這裡閱讀原文".to_string(),
        }
    }
}

impl From<&SectionsConfig> for LinkSection {
    fn from(config: &SectionsConfig) -> Self {
        Self {
            heading: config.link_section.clone(),
            text: config.link_text.clone(),
        }
    }
}

/// Trimmed narrative, with a link section appended when the model left it out.
pub fn format_report(article: &Article, narrative: &str, link: &LinkSection) -> String {
    let narrative = narrative.trim();
    let has_link_section = narrative.lines().any(|line| {
        line.trim_start()
            .strip_prefix("## ")
            .is_some_and(|rest| rest.trim_start().starts_with(link.heading.as_str()))
    });
    if has_link_section {
        narrative.to_string()
    } else {
        format!(
            "{narrative}\n\n## {}\n[{}]({})",
            link.heading,
            link.text,
            article.url()
        )
    }
}

/// Appends article entries to the report file.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove a report left over from an earlier run of the same day.
    pub fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PipelineError::io(&self.path, e)),
        }
    }

    pub fn append(&self, report: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PipelineError::io(&self.path, e))?;
        let entry = format!("{report}\n\n{}\n\n", "-".repeat(ARTICLE_RULE_WIDTH));
        file.write_all(entry.as_bytes())
            .map_err(|e| PipelineError::io(&self.path, e))
    }
}
