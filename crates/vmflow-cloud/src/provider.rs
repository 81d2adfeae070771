//! Cloud provider trait definition

use crate::error::CloudError;
use crate::validation::ValidationResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vmflow_config::Section;

/// VM provisioning abstraction
///
/// Each provider (Azure, GCP) turns one configuration section into a
/// [`VmPlan`]: the validated create command and, when a port is requested,
/// the command that opens it. Read-only provider queries used as
/// preconditions happen inside [`VmProvider::prepare`].
#[async_trait]
pub trait VmProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    /// Check preconditions for `section` and synthesize its commands
    async fn prepare(&self, section: &Section) -> ValidationResult<VmPlan>;
}

/// Supported cloud providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Azure,
    Gcp,
}

impl ProviderKind {
    /// Passes run in this order
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Azure, ProviderKind::Gcp];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Azure => "azure",
            ProviderKind::Gcp => "gcp",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Azure => write!(f, "Azure"),
            ProviderKind::Gcp => write!(f, "GCP"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "azure" => Ok(ProviderKind::Azure),
            "gcp" => Ok(ProviderKind::Gcp),
            other => Err(CloudError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Everything needed to create one VM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmPlan {
    pub provider: ProviderKind,

    /// Configuration section the plan was built from
    pub section: String,

    pub name: String,
    pub project: Option<String>,
    pub team: Option<String>,
    pub purpose: Option<String>,
    pub os: Option<String>,

    pub create_command: Vec<String>,

    /// Issued only after a successful create
    pub open_port: Option<PortRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRequest {
    pub port: String,
    pub command: Vec<String>,
}

impl VmPlan {
    /// Build a plan, taking the documentation fields from `section`.
    pub fn new(
        provider: ProviderKind,
        section: &Section,
        name: impl Into<String>,
        create_command: Vec<String>,
    ) -> Self {
        let field = |key: &str| section.get(key).map(str::to_string);
        Self {
            provider,
            section: section.name.clone(),
            name: name.into(),
            project: field("project"),
            team: field("team"),
            purpose: field("purpose"),
            os: field("os"),
            create_command,
            open_port: None,
        }
    }

    pub fn with_open_port(mut self, port: impl Into<String>, command: Vec<String>) -> Self {
        self.open_port = Some(PortRequest {
            port: port.into(),
            command,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("azure".parse::<ProviderKind>().unwrap(), ProviderKind::Azure);
        assert_eq!("gcp".parse::<ProviderKind>().unwrap(), ProviderKind::Gcp);

        match "aws".parse::<ProviderKind>() {
            Err(CloudError::UnsupportedProvider(name)) => assert_eq!(name, "aws"),
            other => panic!("Expected UnsupportedProvider, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_takes_documentation_fields() {
        let section = Section::new("web")
            .with_entry("name", "web1")
            .with_entry("project", "billing")
            .with_entry("team", "platform")
            .with_entry("os", "linux");

        let plan = VmPlan::new(
            ProviderKind::Azure,
            &section,
            "web1",
            vec!["az".to_string()],
        )
        .with_open_port("80", vec!["az".to_string(), "vm".to_string()]);

        assert_eq!(plan.section, "web");
        assert_eq!(plan.project.as_deref(), Some("billing"));
        assert_eq!(plan.team.as_deref(), Some("platform"));
        assert_eq!(plan.purpose, None);
        assert_eq!(plan.os.as_deref(), Some("linux"));
        assert_eq!(plan.open_port.unwrap().port, "80");
    }
}
