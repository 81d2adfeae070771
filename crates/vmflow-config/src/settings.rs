//! Application settings
//!
//! Resolved in this order (later wins):
//! 1. built-in defaults
//! 2. `vmflow.{toml,yaml,json}` in the current directory, or an explicit file
//! 3. `VMFLOW_*` environment variables (e.g. `VMFLOW_DOCS_DIR`)

use crate::error::Result;
use crate::section::ValueCase;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SETTINGS_BASENAME: &str = "vmflow";
const ENV_PREFIX: &str = "VMFLOW";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Azure provider file
    pub azure_config: PathBuf,

    /// GCP provider file
    pub gcp_config: PathBuf,

    /// Where documentation records are written
    pub docs_dir: PathBuf,

    /// Azure CLI binary
    pub az_binary: String,

    /// Google Cloud CLI binary
    pub gcloud_binary: String,

    /// Copy the provider files with a timestamp suffix after the run
    pub archive: bool,

    /// Keep original value case in command arguments
    pub preserve_value_case: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            azure_config: PathBuf::from("azure.conf"),
            gcp_config: PathBuf::from("gcp.conf"),
            docs_dir: PathBuf::from("."),
            az_binary: "az".to_string(),
            gcloud_binary: "gcloud".to_string(),
            archive: true,
            preserve_value_case: false,
        }
    }
}

impl Settings {
    /// Load settings. `settings_file`, when given, must exist.
    pub fn load(settings_file: Option<&Path>) -> Result<Self> {
        let file = match settings_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(SETTINGS_BASENAME).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        tracing::debug!(?settings, "Resolved settings");
        Ok(settings)
    }

    pub fn value_case(&self) -> ValueCase {
        ValueCase::from_preserve(self.preserve_value_case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial]
    fn test_defaults_from_empty_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let empty = temp_dir.path().join("empty.toml");
        fs::write(&empty, "").unwrap();

        let settings = Settings::load(Some(&empty)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.value_case(), ValueCase::Lower);
    }

    #[test]
    #[serial]
    fn test_settings_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("vmflow.toml");
        fs::write(
            &path,
            "docs_dir = \"records\"\naz_binary = \"/opt/az/bin/az\"\narchive = false\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.docs_dir, PathBuf::from("records"));
        assert_eq!(settings.az_binary, "/opt/az/bin/az");
        assert!(!settings.archive);
        assert_eq!(settings.gcloud_binary, "gcloud");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("vmflow.toml");
        fs::write(&path, "gcp_config = \"from-file.conf\"\n").unwrap();

        temp_env::with_vars(
            [
                ("VMFLOW_GCP_CONFIG", Some("from-env.conf")),
                ("VMFLOW_PRESERVE_VALUE_CASE", Some("true")),
            ],
            || {
                let settings = Settings::load(Some(&path)).unwrap();
                assert_eq!(settings.gcp_config, PathBuf::from("from-env.conf"));
                assert_eq!(settings.value_case(), ValueCase::Preserve);
            },
        );
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = Settings::load(Some(&temp_dir.path().join("absent.toml")));
        assert!(result.is_err());
    }
}
