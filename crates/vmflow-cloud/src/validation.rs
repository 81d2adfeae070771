//! Section-level validation failures
//!
//! These never abort a run. The orchestrator records them as the outcome of
//! the section and moves on to the next one.

use crate::provider::ProviderKind;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("Missing required arguments for {provider} VM creation: {}", .missing.join(", "))]
    MissingArguments {
        provider: ProviderKind,
        missing: Vec<String>,
    },

    #[error("The name: '{name}' does not meet {provider} naming standards. {rule}")]
    InvalidName {
        provider: ProviderKind,
        name: String,
        rule: &'static str,
    },

    #[error("Unsupported os '{0}'. Expected 'linux' or 'windows'")]
    UnsupportedOs(String),

    #[error(
        "Resource group '{0}' does not exist. Please create it by using the following command: \
         az group create --name <ResourceGroupName> --location <Location>"
    )]
    ResourceGroupNotFound(String),

    #[error("Image '{image}' does not exist in {location}")]
    ImageNotFound { image: String, location: String },

    #[error("Precondition query failed: {0}")]
    QueryFailed(String),
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Collect the names of required keys that are absent from `section`.
pub fn missing_keys(section: &vmflow_config::Section, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|key| !section.contains(key))
        .map(|key| key.to_string())
        .collect()
}

/// Fail with [`ValidationError::MissingArguments`] unless every key is present.
pub fn require_keys(
    provider: ProviderKind,
    section: &vmflow_config::Section,
    required: &[&str],
) -> ValidationResult<()> {
    let missing = missing_keys(section, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingArguments { provider, missing })
    }
}
