//! Typed Azure VM section

use regex::Regex;
use std::sync::LazyLock;
use vmflow_cloud::{ProviderKind, ValidationError, ValidationResult, require_keys};
use vmflow_config::Section;

pub const REQUIRED_KEYS: [&str; 5] = [
    "name",
    "resource-group",
    "image",
    "location",
    "admin-username",
];

/// Alphanumeric first, alphanumeric or `_` last, `.` `-` `_` inside, 1-80 chars
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9_.\-]{0,78}[A-Za-z0-9_])?$")
        .expect("Azure name pattern is valid")
});

const NAME_RULE: &str = "The name must begin with a word character, end with a word character \
                         or '_', and may contain word characters, '.', '-', or '_'.";

/// How the admin account authenticates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `os = linux`
    GenerateSshKeys,
    /// `os = windows`
    AdminPassword(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureVmConfig {
    pub name: String,
    pub resource_group: String,
    pub image: String,
    pub location: String,
    pub admin_username: String,
    pub credentials: Credentials,

    /// `vm_size`
    pub size: Option<String>,

    /// `disk_size`, in GB
    pub os_disk_size_gb: Option<String>,

    pub port: Option<String>,
}

impl AzureVmConfig {
    /// Check required keys, name legality and credentials.
    ///
    /// Nothing here talks to Azure.
    pub fn from_section(section: &Section) -> ValidationResult<Self> {
        require_keys(ProviderKind::Azure, section, &REQUIRED_KEYS)?;

        let required = |key: &str| section.get(key).unwrap_or_default().to_string();
        let optional = |key: &str| section.get(key).map(str::to_string);

        let name = required("name");
        validate_name(&name)?;

        let credentials = match section.get("os") {
            Some(os) if os.eq_ignore_ascii_case("linux") => Credentials::GenerateSshKeys,
            Some(os) if os.eq_ignore_ascii_case("windows") => match section.get("admin-password") {
                Some(password) => Credentials::AdminPassword(password.to_string()),
                None => {
                    return Err(ValidationError::MissingArguments {
                        provider: ProviderKind::Azure,
                        missing: vec!["admin-password".to_string()],
                    });
                }
            },
            other => {
                return Err(ValidationError::UnsupportedOs(
                    other.unwrap_or_default().to_string(),
                ));
            }
        };

        Ok(Self {
            name,
            resource_group: required("resource-group"),
            image: required("image"),
            location: required("location"),
            admin_username: required("admin-username"),
            credentials,
            size: optional("vm_size"),
            os_disk_size_gb: optional("disk_size"),
            port: optional("port"),
        })
    }
}

pub fn validate_name(name: &str) -> ValidationResult<()> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName {
            provider: ProviderKind::Azure,
            name: name.to_string(),
            rule: NAME_RULE,
        })
    }
}
