//! Report error types.

use std::path::PathBuf;

use stockroom_core::FieldErrors;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Draft rejected: {0}")]
    InvalidDraft(FieldErrors),
}

pub type ReportResult<T> = Result<T, ReportError>;
