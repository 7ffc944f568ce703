//! HTML format implementation
//!
//! Export only. The HTML page is the publishing target and also the input the PDF format
//! hands to the browser.
//!
//! # Library Choice
//!
//! We use `html5ever` + `markup5ever_rcdom` to build and serialize the DOM, so escaping of
//! text and attributes is never done by hand.
//!
//! # Element Mapping Table
//!
//! | Block          | HTML                                                              |
//! |----------------|-------------------------------------------------------------------|
//! | Cover          | `<section class="brief-cover">` with bar, logo, title, subtitle, date |
//! | Heading 1      | `<div class="brief-title-box"><h1 class="brief-heading-1">`       |
//! | Heading 2 / 3  | `<h2 class="brief-heading-2">` / `<h3 class="brief-heading-3">`   |
//! | Paragraph      | `<p class="brief-paragraph">`                                     |
//! | BulletList     | `<ul class="brief-list"><li>`                                     |
//! | LearningPath   | `<div class="brief-learning-path">` caption + `<ul class="brief-learning-items">` |
//! | Quote          | `<blockquote class="brief-quote"><p>`                             |
//! | Separator      | `<hr class="brief-separator">`                                    |
//! | Link           | `<a href="url">label</a>`                                         |
//! | PageFurniture  | `@page` margin boxes (`@top-left`, `@bottom-right`)               |
//!
//! # CSS and Theming
//!
//! The page embeds, in order: the [`Theme`] as `--brief-*` custom properties,
//! `css/baseline.css`, the page furniture rules, then any custom CSS.

mod serializer;
pub mod theme;

pub use serializer::{
    furniture_css, get_default_css, serialize_to_html, serialize_to_html_with_options, HtmlOptions,
};
pub use theme::Theme;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(theme: Theme) -> Self {
        Self {
            options: HtmlOptions::new(theme),
        }
    }

    pub fn with_options(options: HtmlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }
}

/// Apply the `css-path` option on top of `base`.
///
/// The file is read here, so a missing stylesheet is reported before anything is rendered.
pub(crate) fn resolve_options(
    base: &HtmlOptions,
    options: &HashMap<String, String>,
) -> Result<HtmlOptions, FormatError> {
    let mut resolved = base.clone();
    if let Some(path) = options.get("css-path") {
        let css = std::fs::read_to_string(path).map_err(|e| {
            FormatError::SerializationError(format!("failed to read CSS file '{path}': {e}"))
        })?;
        resolved.custom_css = Some(match resolved.custom_css.take() {
            Some(existing) => format!("{existing}\n{css}"),
            None => css,
        });
    }
    Ok(resolved)
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 page with embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html_with_options(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        if let Some(unknown) = options.keys().find(|key| key.as_str() != "css-path") {
            return Err(FormatError::NotSupported(format!(
                "html does not understand option '{unknown}'"
            )));
        }
        let resolved = resolve_options(&self.options, options)?;
        serialize_to_html_with_options(doc, &resolved).map(SerializedDocument::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn css_path_option_is_embedded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ".custom-rule {{ color: teal; }}").unwrap();
        let mut options = HashMap::new();
        options.insert(
            "css-path".to_string(),
            file.path().to_string_lossy().into_owned(),
        );
        let out = HtmlFormat::default()
            .serialize_with_options(&Document::default(), &options)
            .unwrap();
        match out {
            SerializedDocument::Text(html) => assert!(html.contains(".custom-rule")),
            SerializedDocument::Binary(_) => panic!("expected text"),
        }
    }

    #[test]
    fn missing_css_file_is_an_error() {
        let mut options = HashMap::new();
        options.insert("css-path".to_string(), "/nonexistent/brief.css".to_string());
        let result = HtmlFormat::default().serialize_with_options(&Document::default(), &options);
        assert!(matches!(result, Err(FormatError::SerializationError(_))));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut options = HashMap::new();
        options.insert("colour".to_string(), "red".to_string());
        let result = HtmlFormat::default().serialize_with_options(&Document::default(), &options);
        assert!(matches!(result, Err(FormatError::NotSupported(_))));
    }
}
