//! Format implementations
//!
//! Every format turns the digest IR into one output representation. Only markdown parses.

pub mod html;
pub mod icons;
pub mod json;
pub mod markdown;
#[cfg(feature = "native-export")]
pub mod pdf;
pub mod treeviz;

pub use html::{get_default_css, HtmlFormat, HtmlOptions, Theme};
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
#[cfg(feature = "native-export")]
pub use pdf::{PageProfile, PdfFormat};
pub use treeviz::TreevizFormat;
