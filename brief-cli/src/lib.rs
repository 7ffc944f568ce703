//! Daily news-digest pipeline behind the `brief` binary.
//!
//! The conversion itself lives in `brief-babel`; this crate supplies the collaborators
//! around it:
//!
//! ```text
//! urls.txt ─► feed ─► filter ─► narrative ─► report (.md) ─► export (.pdf)
//! ```
//!
//! - [`feed`]: RSS fetching, item extraction and the publication window ([`dates`]).
//! - [`filter`]: keyword filter, domain classifier and per-domain quota.
//! - [`narrative`]: chat-completions client that writes one entry per article.
//! - [`report`]: the Markdown report file.
//! - [`export`]: configured format registry and PDF export.
//! - [`pipeline`]: orchestration and run statistics.

pub mod dates;
pub mod error;
pub mod export;
pub mod feed;
pub mod filter;
pub mod logging;
pub mod narrative;
pub mod pipeline;
pub mod report;

pub use error::{PipelineError, Result};
