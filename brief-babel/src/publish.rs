//! Document publishing.
//!
//! One call that serializes a [`Document`] and either writes it to disk or hands back the text.
//! The pipeline uses it for the daily PDF and the CLI for `convert`.
//!
//! For more control over the conversion process, use [`FormatRegistry`] directly.

use crate::error::FormatError;
use crate::format::SerializedDocument;
use crate::ir::nodes::Document;
use crate::registry::FormatRegistry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Specifies how to publish a document.
///
/// ```ignore
/// let spec = PublishSpec::new(&document, "pdf")
///     .with_output_path("news_summary_20240501.pdf")
///     .with_option("size-mobile", "true");
/// ```
///
/// Text formats without an output path return in-memory content. Binary formats
/// (PDF) require an explicit output path.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    pub document: &'a Document,
    /// Target format name (e.g., "html", "markdown", "pdf").
    pub format: &'a str,
    pub output: Option<PathBuf>,
    /// Format-specific options (e.g., page size).
    pub options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(document: &'a Document, format: &'a str) -> Self {
        Self {
            document,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    InMemory(String),
    File(PathBuf),
}

/// Publishes with the default format registry.
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishArtifact, FormatError> {
    publish_with(&FormatRegistry::with_defaults(), spec)
}

/// Publishes with a caller-built registry, e.g. one whose HTML format carries a configured theme.
///
/// # Errors
///
/// Unknown format, serialization failure, file I/O failure, or a binary format
/// requested without an output path.
pub fn publish_with(
    registry: &FormatRegistry,
    spec: PublishSpec<'_>,
) -> Result<PublishArtifact, FormatError> {
    let serialized = registry.serialize_with_options(spec.document, spec.format, &spec.options)?;
    match (serialized, spec.output) {
        (serialized, Some(path)) => write_to_path(path, serialized.into_bytes()),
        (SerializedDocument::Text(text), None) => Ok(PublishArtifact::InMemory(text)),
        (SerializedDocument::Binary(_), None) => Err(FormatError::SerializationError(format!(
            "format '{}' produces binary output and requires an explicit output path",
            spec.format
        ))),
    }
}

fn write_to_path(path: PathBuf, bytes: Vec<u8>) -> Result<PublishArtifact, FormatError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            FormatError::SerializationError(format!("{}: {err}", parent.display()))
        })?;
    }
    fs::write(&path, bytes)
        .map_err(|err| FormatError::SerializationError(format!("{}: {err}", path.display())))?;
    Ok(PublishArtifact::File(path))
}
