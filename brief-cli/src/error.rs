//! Error type shared by the pipeline collaborators.

use crate::dates::DateError;
use brief_babel::FormatError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid feed XML: {0}")]
    Feed(#[from] roxmltree::Error),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid keyword pattern: {0}")]
    Keyword(#[from] regex::Error),

    #[error("environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("chat completion request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("chat completion returned no content")]
    EmptyResponse,

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
