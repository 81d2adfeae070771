//! Cloud provider error types

use std::path::PathBuf;
use thiserror::Error;

/// Run-level errors. Section-level problems are [`crate::ValidationError`]s.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Unsupported cloud provider: {0}")]
    UnsupportedProvider(String),

    #[error("Failed to write documentation file {}: {source}", .path.display())]
    Documentation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] vmflow_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CloudError>;
