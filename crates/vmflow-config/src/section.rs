//! INI provider configuration files
//!
//! Each section of `azure.conf` / `gcp.conf` describes exactly one VM.
//! Sections keep file order; keys are always lower-cased.

use crate::error::{ConfigError, Result};
use indexmap::IndexMap;
use ini::{Ini, ParseOption};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Section whose keys act as fallbacks for every other section
const DEFAULT_SECTION: &str = "default";

/// How configuration values are normalized on load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueCase {
    /// Lower-case every value (keys are always lower-cased)
    #[default]
    Lower,
    /// Keep values exactly as written
    Preserve,
}

impl ValueCase {
    pub fn from_preserve(preserve: bool) -> Self {
        if preserve {
            ValueCase::Preserve
        } else {
            ValueCase::Lower
        }
    }

    fn apply(self, value: &str) -> String {
        match self {
            ValueCase::Lower => value.to_lowercase(),
            ValueCase::Preserve => value.to_string(),
        }
    }
}

/// One named block of key-value configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    entries: IndexMap<String, String>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn with_entry(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(key.as_ref().to_lowercase(), value.into());
    }

    /// Value for `key`. Empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_lowercase())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed provider configuration file
#[derive(Debug, Clone, Default)]
pub struct ProviderConfigFile {
    pub path: PathBuf,
    pub sections: Vec<Section>,
}

impl ProviderConfigFile {
    /// Load a provider file. A missing file is an error.
    pub fn load(path: impl AsRef<Path>, case: ValueCase) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        // values reach the command line verbatim: no escapes, no quote stripping
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_file_opt(path, options).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut defaults = Section::new(DEFAULT_SECTION);
        let mut sections = Vec::new();

        for (name, properties) in ini.iter() {
            let Some(name) = name else {
                for (key, _) in properties.iter() {
                    warn!(key = %key, file = %path.display(), "Ignoring key outside of a section");
                }
                continue;
            };

            let mut section = Section::new(name.to_lowercase());
            for (key, value) in properties.iter() {
                section.insert(key, case.apply(value));
            }

            if section.name == DEFAULT_SECTION {
                defaults = section;
            } else {
                sections.push(section);
            }
        }

        if !defaults.is_empty() {
            for section in &mut sections {
                for (key, value) in defaults.iter() {
                    if !section.entries.contains_key(key) {
                        section.insert(key, value.clone());
                    }
                }
            }
        }

        debug!(
            file = %path.display(),
            sections = sections.len(),
            "Loaded provider configuration"
        );

        Ok(Self {
            path: path.to_path_buf(),
            sections,
        })
    }

    /// Load a provider file, returning `None` when it does not exist.
    pub fn load_optional(path: impl AsRef<Path>, case: ValueCase) -> Result<Option<Self>> {
        match Self::load(path, case) {
            Ok(file) => Ok(Some(file)),
            Err(ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_conf(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("azure.conf");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_sections_keep_file_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_conf(
            temp_dir.path(),
            "[zeta]\nname = zeta\n\n[alpha]\nname = alpha\n\n[mid]\nname = mid\n",
        );

        let file = ProviderConfigFile::load(&path, ValueCase::Lower).unwrap();
        let names: Vec<_> = file.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_keys_and_values_lowercased() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_conf(
            temp_dir.path(),
            "[web]\nName = TestVM\nResource-Group = RG1\n",
        );

        let file = ProviderConfigFile::load(&path, ValueCase::Lower).unwrap();
        let section = &file.sections[0];
        assert_eq!(section.get("name"), Some("testvm"));
        assert_eq!(section.get("resource-group"), Some("rg1"));
    }

    #[test]
    fn test_preserve_value_case() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_conf(temp_dir.path(), "[web]\nNAME = TestVM\n");

        let file = ProviderConfigFile::load(&path, ValueCase::Preserve).unwrap();
        assert_eq!(file.sections[0].get("name"), Some("TestVM"));
    }

    #[test]
    fn test_default_section_fills_missing_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_conf(
            temp_dir.path(),
            "[DEFAULT]\nlocation = eastus\nos = linux\n\n[web]\nname = web\nos = windows\n",
        );

        let file = ProviderConfigFile::load(&path, ValueCase::Lower).unwrap();
        assert_eq!(file.sections.len(), 1);
        let section = &file.sections[0];
        assert_eq!(section.get("location"), Some("eastus"));
        assert_eq!(section.get("os"), Some("windows"));
    }

    #[test]
    fn test_values_kept_verbatim() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_conf(
            temp_dir.path(),
            "[win]\nadmin-password = P\\a\"ss;w#rd\"\nquoted = \"hello\"\n",
        );

        let file = ProviderConfigFile::load(&path, ValueCase::Preserve).unwrap();
        let section = &file.sections[0];
        assert_eq!(section.get("admin-password"), Some(r#"P\a"ss;w#rd""#));
        assert_eq!(section.get("quoted"), Some(r#""hello""#));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_conf(temp_dir.path(), "[web\nname = web\n");

        assert!(matches!(
            ProviderConfigFile::load(&path, ValueCase::Lower),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_empty_value_is_absent() {
        let section = Section::new("web").with_entry("vm_size", "  ");
        assert!(!section.contains("vm_size"));
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("gcp.conf");

        match ProviderConfigFile::load(&path, ValueCase::Lower) {
            Err(ConfigError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("Expected NotFound, got {:?}", other),
        }

        let optional = ProviderConfigFile::load_optional(&path, ValueCase::Lower).unwrap();
        assert!(optional.is_none());
    }
}
