//! PDF export built on top of the HTML serializer + headless Chrome.
//!
//! The document is rendered with the HTML format, page geometry is appended to the
//! stylesheet, and a Chrome/Chromium binary in headless mode prints the page. The running
//! header and page counter come from the document's page furniture (`@page` margin boxes),
//! so Chrome's own header and footer are switched off.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::html::{resolve_options, serialize_to_html_with_options, HtmlOptions, Theme};
use crate::ir::nodes::Document;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;
use url::Url;
use which::which;

/// Environment variable that overrides browser detection.
pub const CHROME_ENV_VAR: &str = "BRIEF_CHROME_BIN";

const OPTION_KEYS: [&str; 3] = ["size-a4", "size-mobile", "css-path"];

/// Format implementation that shells out to Chrome/Chromium to generate PDFs.
#[derive(Debug, Clone, Default)]
pub struct PdfFormat {
    html: HtmlOptions,
    default_profile: PageProfile,
}

impl PdfFormat {
    pub fn new(theme: Theme) -> Self {
        Self {
            html: HtmlOptions::new(theme),
            default_profile: PageProfile::A4,
        }
    }

    pub fn with_html_options(html: HtmlOptions) -> Self {
        Self {
            html,
            default_profile: PageProfile::A4,
        }
    }

    /// Profile used when neither `size-a4` nor `size-mobile` is given.
    pub fn with_default_profile(mut self, profile: PageProfile) -> Self {
        self.default_profile = profile;
        self
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "HTML-based PDF export via headless Chrome"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn produces_binary(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "PDF serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        if let Some(unknown) = options.keys().find(|k| !OPTION_KEYS.contains(&k.as_str())) {
            return Err(FormatError::NotSupported(format!(
                "pdf does not understand option '{unknown}'"
            )));
        }
        let profile = PageProfile::from_options(options, self.default_profile)?;
        let html_options = resolve_options(&self.html, options)?
            .with_page_css(profile.print_css().to_string());
        let html = serialize_to_html_with_options(doc, &html_options)?;
        let pdf_bytes = render_html_to_pdf(&html, profile)?;
        Ok(SerializedDocument::Binary(pdf_bytes))
    }
}

/// Page geometry of the printed PDF.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageProfile {
    /// A4 portrait with the report margins.
    #[default]
    A4,
    /// Narrow phone-sized pages.
    Mobile,
}

impl PageProfile {
    fn from_options(
        options: &HashMap<String, String>,
        default: PageProfile,
    ) -> Result<Self, FormatError> {
        let a4 = parse_bool_flag(options, "size-a4")?;
        let mobile = parse_bool_flag(options, "size-mobile")?;

        match (a4, mobile) {
            (Some(true), Some(true)) => Err(FormatError::SerializationError(
                "Cannot enable both a4 and mobile PDF sizing at once".to_string(),
            )),
            (_, Some(true)) | (Some(false), None) => Ok(PageProfile::Mobile),
            (Some(true), _) | (_, Some(false)) => Ok(PageProfile::A4),
            (None, None) => Ok(default),
        }
    }

    pub fn print_css(&self) -> &'static str {
        match self {
            PageProfile::A4 => {
                "@page { size: 210mm 297mm; margin: 12.7mm 8.5mm; }\nbody { margin: 0; padding: 0; }\n"
            }
            PageProfile::Mobile => {
                "@page { size: 90mm 160mm; margin: 5mm; }\nbody { margin: 0; padding: 0; }\n.brief-document { max-width: calc(90mm - 10mm); }\n.brief-cover-logo { width: 40mm; height: 40mm; }\n"
            }
        }
    }

    fn viewport(&self) -> (u32, u32) {
        match self {
            PageProfile::A4 => (1280, 960),
            PageProfile::Mobile => (450, 900),
        }
    }
}

fn parse_bool_flag(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<bool>, FormatError> {
    let Some(value) = options.get(key) else {
        return Ok(None);
    };
    if value.is_empty() {
        return Ok(Some(true));
    }
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(Some(true)),
        "false" | "0" | "no" | "n" => Ok(Some(false)),
        other => Err(FormatError::SerializationError(format!(
            "Invalid boolean value '{other}' for --extra-{key}"
        ))),
    }
}

fn render_html_to_pdf(html: &str, profile: PageProfile) -> Result<Vec<u8>, FormatError> {
    let chrome = resolve_chrome_binary()?;
    let temp_dir =
        tempdir().map_err(|e| FormatError::SerializationError(format!("Temp dir error: {e}")))?;
    let html_path = temp_dir.path().join("brief-export.html");
    fs::write(&html_path, html).map_err(|e| FormatError::SerializationError(e.to_string()))?;

    let pdf_path = temp_dir.path().join("brief-export.pdf");
    let file_url = Url::from_file_path(&html_path).map_err(|_| {
        FormatError::SerializationError(
            "Failed to construct file:// URL for HTML input".to_string(),
        )
    })?;

    let (width, height) = profile.viewport();
    let output = Command::new(&chrome)
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--no-pdf-header-footer")
        .arg("--print-to-pdf-no-header")
        .arg(format!("--print-to-pdf={}", pdf_path.display()))
        .arg(format!("--window-size={width},{height}"))
        .arg(file_url.as_str())
        .output()
        .map_err(|e| {
            FormatError::SerializationError(format!(
                "Failed to launch Chrome ({}): {}",
                chrome.display(),
                e
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FormatError::SerializationError(format!(
            "Chrome exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    fs::read(&pdf_path).map_err(|e| {
        FormatError::SerializationError(format!(
            "Chrome did not produce {}: {e}",
            pdf_path.display()
        ))
    })
}

fn non_empty_env(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Locate a Chrome/Chromium binary: env overrides, then `PATH`, then platform install paths.
pub fn resolve_chrome_binary() -> Result<PathBuf, FormatError> {
    for var in [CHROME_ENV_VAR, "GOOGLE_CHROME_BIN", "CHROME_BIN"] {
        if let Some(path) = non_empty_env(var) {
            return Ok(path);
        }
    }

    for candidate in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
        "chrome",
        "msedge",
    ] {
        if let Ok(path) = which(candidate) {
            return Ok(path);
        }
    }

    platform_candidates()
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            FormatError::SerializationError(format!(
                "Unable to locate a Chrome/Chromium binary. Set {CHROME_ENV_VAR} to override the detection."
            ))
        })
}

fn platform_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &["/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"]
    } else if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium-browser",
            "/usr/bin/chromium",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn default_profile_is_a4() {
        let profile = PageProfile::from_options(&opts(&[]), PageProfile::A4).unwrap();
        assert_eq!(profile, PageProfile::A4);
    }

    #[test]
    fn bare_mobile_flag_selects_mobile() {
        let profile =
            PageProfile::from_options(&opts(&[("size-mobile", "")]), PageProfile::A4).unwrap();
        assert_eq!(profile, PageProfile::Mobile);
    }

    #[test]
    fn configured_default_can_be_turned_off() {
        let profile =
            PageProfile::from_options(&opts(&[("size-mobile", "no")]), PageProfile::Mobile)
                .unwrap();
        assert_eq!(profile, PageProfile::A4);
    }

    #[test]
    fn explicit_a4_beats_mobile_default() {
        let profile =
            PageProfile::from_options(&opts(&[("size-a4", "yes")]), PageProfile::Mobile).unwrap();
        assert_eq!(profile, PageProfile::A4);
    }

    #[test]
    fn both_profiles_conflict() {
        let result = PageProfile::from_options(
            &opts(&[("size-mobile", "true"), ("size-a4", "true")]),
            PageProfile::A4,
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_boolean_is_reported() {
        let err =
            PageProfile::from_options(&opts(&[("size-a4", "maybe")]), PageProfile::A4).unwrap_err();
        assert!(err.to_string().contains("--extra-size-a4"));
    }

    #[test]
    fn unknown_option_is_rejected_before_rendering() {
        let result = PdfFormat::default()
            .serialize_with_options(&Document::default(), &opts(&[("dpi", "300")]));
        assert!(matches!(result, Err(FormatError::NotSupported(_))));
    }

    #[test]
    fn page_css_mentions_geometry() {
        assert!(PageProfile::A4.print_css().contains("210mm 297mm"));
        assert!(PageProfile::Mobile.print_css().contains("90mm 160mm"));
    }
}
