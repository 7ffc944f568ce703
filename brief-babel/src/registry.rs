//! Format registry for format discovery and selection

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::nodes::Document;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

/// Registry of document formats, keyed by [`Format::name`].
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let doc = registry.parse(&report, "markdown")?;
/// let html = registry.serialize(&doc, "html")?;
/// ```
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Register a format, replacing any format with the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// All format names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// `(name, description)` pairs, sorted by name.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        self.formats
            .values()
            .map(|f| (f.name(), f.description()))
            .collect()
    }

    /// Detect a format from a filename's extension (ASCII case-insensitive).
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    /// Parse source text using the named format.
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Serialize to text. Binary formats are rejected.
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let empty = HashMap::new();
        match self.serialize_with_options(doc, format, &empty)? {
            SerializedDocument::Text(text) => Ok(text),
            SerializedDocument::Binary(_) => Err(FormatError::SerializationError(format!(
                "Format '{format}' produced binary output when text was expected"
            ))),
        }
    }

    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(doc, options)
    }

    /// Registry with the built-in formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::markdown::MarkdownFormat::default());
        registry.register(crate::formats::html::HtmlFormat::default());
        #[cfg(feature = "native-export")]
        registry.register(crate::formats::pdf::PdfFormat::default());
        registry.register(crate::formats::json::JsonFormat);
        registry.register(crate::formats::treeviz::TreevizFormat);

        registry
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::Block;

    struct CountFormat;
    impl Format for CountFormat {
        fn name(&self) -> &str {
            "count"
        }
        fn description(&self) -> &str {
            "Block counter"
        }
        fn file_extensions(&self) -> &[&str] {
            &["cnt"]
        }
        fn supports_serialization(&self) -> bool {
            true
        }
        fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
            Ok(doc.blocks.len().to_string())
        }
    }

    fn sample() -> Document {
        Document::with_blocks(vec![Block::heading(1, "Hello"), Block::Separator])
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = FormatRegistry::new();
        registry.register(CountFormat);

        assert!(registry.has("count"));
        assert_eq!(registry.get("count").unwrap().name(), "count");
        assert_eq!(registry.describe(), vec![("count", "Block counter")]);
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_parse_unsupported() {
        let mut registry = FormatRegistry::new();
        registry.register(CountFormat);

        let result = registry.parse("input", "count");
        assert!(matches!(result, Err(FormatError::NotSupported(_))));
    }

    #[test]
    fn test_registry_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(CountFormat);

        assert_eq!(registry.serialize(&sample(), "count").unwrap(), "2");
    }

    #[test]
    fn test_registry_serialize_rejects_unknown_options() {
        let mut registry = FormatRegistry::new();
        registry.register(CountFormat);

        let mut options = HashMap::new();
        options.insert("unused".to_string(), "true".to_string());
        let result = registry.serialize_with_options(&sample(), "count", &options);
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_debug_lists_names() {
        let mut registry = FormatRegistry::new();
        registry.register(CountFormat);

        assert_eq!(
            format!("{registry:?}"),
            r#"FormatRegistry { formats: ["count"] }"#
        );
    }

    #[test]
    fn test_registry_replace_format() {
        let mut registry = FormatRegistry::new();
        registry.register(CountFormat);
        registry.register(CountFormat);

        assert_eq!(registry.list_formats().len(), 1);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::default();
        for name in ["markdown", "html", "json", "treeviz"] {
            assert!(registry.has(name), "missing {name}");
        }
        #[cfg(feature = "native-export")]
        assert!(registry.has("pdf"));
    }

    #[test]
    fn test_markdown_is_the_only_parser() {
        let registry = FormatRegistry::default();
        let parsers: Vec<_> = registry
            .list_formats()
            .into_iter()
            .filter(|name| registry.get(name).unwrap().supports_parsing())
            .collect();
        assert_eq!(parsers, vec!["markdown"]);
    }

    #[test]
    fn test_detect_format_from_filename() {
        let registry = FormatRegistry::with_defaults();

        assert_eq!(
            registry.detect_format_from_filename("news_report_20240501.md"),
            Some("markdown".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("/tmp/out/REPORT.HTML"),
            Some("html".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("dump.json"),
            Some("json".to_string())
        );
        assert_eq!(registry.detect_format_from_filename("doc.unknown"), None);
        assert_eq!(registry.detect_format_from_filename("doc"), None);
    }
}
