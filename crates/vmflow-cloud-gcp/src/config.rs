//! Typed GCP VM section

use vmflow_cloud::{ProviderKind, ValidationError, ValidationResult, require_keys};
use vmflow_config::Section;

pub const REQUIRED_KEYS: [&str; 4] = ["name", "image", "imageproject", "zone"];

const NAME_RULE: &str = "The name must be all lowercase letters and digits, \
                         contain at least one letter, and contain no hyphens.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcpVmConfig {
    pub name: String,
    pub image: String,

    /// `imageproject`
    pub image_project: String,

    pub zone: String,

    /// `machine_type`
    pub machine_type: Option<String>,

    /// `disk_size`
    pub boot_disk_size: Option<String>,

    pub port: Option<String>,
}

impl GcpVmConfig {
    pub fn from_section(section: &Section) -> ValidationResult<Self> {
        require_keys(ProviderKind::Gcp, section, &REQUIRED_KEYS)?;

        let required = |key: &str| section.get(key).unwrap_or_default().to_string();
        let optional = |key: &str| section.get(key).map(str::to_string);

        let name = required("name");
        validate_name(&name)?;

        Ok(Self {
            name,
            image: required("image"),
            image_project: required("imageproject"),
            zone: required("zone"),
            machine_type: optional("machine_type"),
            boot_disk_size: optional("disk_size"),
            port: optional("port"),
        })
    }
}

pub fn validate_name(name: &str) -> ValidationResult<()> {
    let allowed = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let has_letter = name.chars().any(|c| c.is_ascii_lowercase());

    if allowed && has_letter {
        Ok(())
    } else {
        Err(ValidationError::InvalidName {
            provider: ProviderKind::Gcp,
            name: name.to_string(),
            rule: NAME_RULE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_legality() {
        for ok in ["vm1", "web", "a1b2c3", "1vm"] {
            assert!(validate_name(ok).is_ok(), "{ok:?} should be accepted");
        }
        for bad in ["VM1", "vm-1", "vm_1", "123", "", "vm 1", "vmé"] {
            assert!(validate_name(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_from_section() {
        let section = Section::new("batch")
            .with_entry("name", "batch1")
            .with_entry("image", "debian-11-bullseye-v20230615")
            .with_entry("imageproject", "debian-cloud")
            .with_entry("zone", "us-central1-a")
            .with_entry("disk_size", "50gb");

        let config = GcpVmConfig::from_section(&section).unwrap();
        assert_eq!(config.image_project, "debian-cloud");
        assert_eq!(config.machine_type, None);
        assert_eq!(config.boot_disk_size.as_deref(), Some("50gb"));
    }

    #[test]
    fn test_missing_keys_reported_together() {
        let section = Section::new("partial")
            .with_entry("name", "vm1")
            .with_entry("zone", "");

        match GcpVmConfig::from_section(&section) {
            Err(ValidationError::MissingArguments { provider, missing }) => {
                assert_eq!(provider, ProviderKind::Gcp);
                assert_eq!(missing, vec!["image", "imageproject", "zone"]);
            }
            other => panic!("Expected MissingArguments, got {other:?}"),
        }
    }
}
