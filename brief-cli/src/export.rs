//! Format registry and document export driven by [`BriefConfig`].

use crate::error::{PipelineError, Result};
use brief_babel::formats::{HtmlFormat, JsonFormat, MarkdownFormat, PdfFormat, TreevizFormat};
use brief_babel::publish::{publish_with, PublishSpec};
use brief_babel::{Document, FormatRegistry};
use brief_config::BriefConfig;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Registry whose formats carry the configured section rules, theme, stylesheet and page size.
pub fn configured_registry(config: &BriefConfig) -> Result<FormatRegistry> {
    let html_options = match config.html_options() {
        Ok(options) => options,
        Err(e) => {
            let path = config.convert.html.custom_css.clone().unwrap_or_default();
            return Err(PipelineError::io(path, e));
        }
    };

    let mut registry = FormatRegistry::new();
    registry.register(MarkdownFormat::new(config.section_rules()));
    registry.register(HtmlFormat::with_options(html_options.clone()));
    registry.register(
        PdfFormat::with_html_options(html_options).with_default_profile(config.convert.pdf.size.into()),
    );
    registry.register(JsonFormat);
    registry.register(TreevizFormat);
    Ok(registry)
}

/// Parse a Markdown report and dress it with the configured cover and page furniture.
pub fn load_report(
    registry: &FormatRegistry,
    path: &Path,
    config: &BriefConfig,
    cover_date: Option<NaiveDate>,
) -> Result<Document> {
    let source = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    let mut doc = registry.parse(&source, "markdown")?;
    if let Some(date) = cover_date {
        doc.cover = Some(config.convert.cover.to_cover(date));
        doc.furniture = Some(config.furniture());
    }
    Ok(doc)
}

/// Convert the day's Markdown report to PDF.
pub fn export_pdf(
    config: &BriefConfig,
    report_path: &Path,
    pdf_path: &Path,
    date: NaiveDate,
) -> Result<()> {
    let registry = configured_registry(config)?;
    let doc = load_report(&registry, report_path, config, Some(date))?;
    publish_with(&registry, PublishSpec::new(&doc, "pdf").with_output_path(pdf_path))?;
    Ok(())
}
