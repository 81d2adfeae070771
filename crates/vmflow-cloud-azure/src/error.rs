//! Azure provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AzureError {
    #[error("az command failed: {0}")]
    CommandFailed(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<AzureError> for vmflow_cloud::ValidationError {
    fn from(e: AzureError) -> Self {
        vmflow_cloud::ValidationError::QueryFailed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AzureError>;
