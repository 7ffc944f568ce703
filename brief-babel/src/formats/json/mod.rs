//! JSON dump of the IR
//!
//! Pretty-printed `serde_json` serialization of the [`Document`], the format behind
//! `brief inspect <file> json`. Blocks are tagged with `"type"`, inline spans with `"kind"`.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Parsed document as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(format!("JSON encoding failed: {e}")))
    }
}
