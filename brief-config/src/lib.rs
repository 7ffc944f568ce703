//! Shared configuration loader for the brief toolchain.
//!
//! `defaults/brief.default.toml` is embedded into every binary so that the documented
//! defaults and the runtime behavior stay in sync. Applications layer user files and
//! command-line overrides on top of those defaults via [`Loader`] before deserializing
//! into [`BriefConfig`].

use brief_babel::formats::html::HtmlOptions;
use brief_babel::formats::{PageProfile, Theme};
use brief_babel::{Cover, PageFurniture, SectionRules};
use chrono::NaiveDate;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/brief.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "brief.toml";

/// Top-level configuration consumed by brief applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BriefConfig {
    pub convert: ConvertConfig,
    pub theme: ThemeConfig,
    pub feeds: FeedsConfig,
    pub filter: FilterConfig,
    pub narrative: NarrativeConfig,
    pub output: OutputConfig,
}

/// Markdown-to-document conversion and export knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub sections: SectionsConfig,
    pub cover: CoverConfig,
    pub furniture: FurnitureConfig,
    pub pdf: PdfConfig,
    #[serde(default)]
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionsConfig {
    pub level2: Vec<String>,
    pub learning_path_label: String,
    pub link_section: String,
    pub link_text: String,
}

impl From<&SectionsConfig> for SectionRules {
    fn from(config: &SectionsConfig) -> Self {
        SectionRules::new(config.level2.clone(), config.learning_path_label.clone())
    }
}

impl From<SectionsConfig> for SectionRules {
    fn from(config: SectionsConfig) -> Self {
        SectionRules::new(config.level2, config.learning_path_label)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverConfig {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub logo: Option<String>,
}

impl CoverConfig {
    /// Cover page dated `generated`.
    pub fn to_cover(&self, generated: NaiveDate) -> Cover {
        Cover {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            generated,
            logo: self.logo.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FurnitureConfig {
    pub header: String,
    pub page_label: String,
}

impl From<&FurnitureConfig> for PageFurniture {
    fn from(config: &FurnitureConfig) -> Self {
        PageFurniture {
            header: config.header.clone(),
            page_label: config.page_label.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub size: PdfPageSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PdfPageSize {
    #[serde(rename = "a4")]
    A4,
    #[serde(rename = "mobile")]
    Mobile,
}

impl From<PdfPageSize> for PageProfile {
    fn from(size: PdfPageSize) -> Self {
        match size {
            PdfPageSize::A4 => PageProfile::A4,
            PdfPageSize::Mobile => PageProfile::Mobile,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HtmlConfig {
    /// Stylesheet file appended after the theme.
    #[serde(default)]
    pub custom_css: Option<PathBuf>,
}

/// Mirrors the fields of [`Theme`].
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub highlight_color: String,
    pub accent_color: String,
    pub heading_box_background: String,
    pub heading_box_text: String,
    pub body_font: String,
    pub heading_font: String,
    pub body_size_pt: f32,
    pub title_size_pt: f32,
    pub learning_caption: String,
    pub date_label: String,
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        Theme {
            primary_color: config.primary_color.clone(),
            secondary_color: config.secondary_color.clone(),
            highlight_color: config.highlight_color.clone(),
            accent_color: config.accent_color.clone(),
            heading_box_background: config.heading_box_background.clone(),
            heading_box_text: config.heading_box_text.clone(),
            body_font: config.body_font.clone(),
            heading_font: config.heading_font.clone(),
            body_size_pt: config.body_size_pt,
            title_size_pt: config.title_size_pt,
            learning_caption: config.learning_caption.clone(),
            date_label: config.date_label.clone(),
        }
    }
}

/// RSS sources and the HTTP client used to fetch them.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedsConfig {
    pub urls_file: PathBuf,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub window_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    pub enabled: bool,
    pub mode: KeywordMode,
    #[serde(default)]
    pub keywords_file: Option<PathBuf>,
    pub keywords: Vec<String>,
    pub max_per_domain: usize,
    pub domains: Vec<DomainConfig>,
}

/// How keyword hits combine into an accept decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordMode {
    /// At least one keyword must match.
    Any,
    /// Every keyword must match.
    All,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Chat-completions endpoint used to write each article's digest entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeConfig {
    pub api_base: String,
    pub api_key_env: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub max_input_chars: usize,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl BriefConfig {
    pub fn section_rules(&self) -> SectionRules {
        (&self.convert.sections).into()
    }

    pub fn theme(&self) -> Theme {
        (&self.theme).into()
    }

    pub fn furniture(&self) -> PageFurniture {
        (&self.convert.furniture).into()
    }

    /// HTML options with the configured theme and custom stylesheet.
    ///
    /// The stylesheet is read here so a missing file is reported before any export starts.
    pub fn html_options(&self) -> std::io::Result<HtmlOptions> {
        let options = HtmlOptions::new(self.theme());
        match &self.convert.html.custom_css {
            Some(path) => Ok(options.with_custom_css(std::fs::read_to_string(path)?)),
            None => Ok(options),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (e.g. `theme.primary_color`).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BriefConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BriefConfig, ConfigError> {
    Loader::new().build()
}
