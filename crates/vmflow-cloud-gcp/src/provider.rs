//! GCP provider implementation

use crate::config::GcpVmConfig;
use crate::gcloud::Gcloud;
use async_trait::async_trait;
use vmflow_cloud::{ProviderKind, ValidationResult, VmPlan, VmProvider};
use vmflow_config::Section;

/// GCP provider
///
/// Only configuration-level checks: required keys and name legality.
/// Zone, image and project are left for `gcloud` to reject.
pub struct GcpProvider {
    gcloud: Gcloud,
}

impl GcpProvider {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            gcloud: Gcloud::new(binary),
        }
    }
}

#[async_trait]
impl VmProvider for GcpProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gcp
    }

    fn display_name(&self) -> &str {
        "GCP"
    }

    async fn prepare(&self, section: &Section) -> ValidationResult<VmPlan> {
        let config = GcpVmConfig::from_section(section)?;
        tracing::debug!("GCP section '{}' is valid", section.name);

        let plan = VmPlan::new(
            ProviderKind::Gcp,
            section,
            config.name.clone(),
            self.gcloud.instances_create_command(&config),
        );

        Ok(match &config.port {
            Some(port) => {
                let command = self.gcloud.firewall_rule_command(&config.name, port);
                plan.with_open_port(port.clone(), command)
            }
            None => plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vmflow_cloud::testing::ScriptedExecutor;
    use vmflow_cloud::{DocumentationWriter, Orchestrator, PassStatus, SectionOutcome};
    use vmflow_config::ProviderConfigFile;

    fn section(name: &str) -> Section {
        Section::new(name)
            .with_entry("name", name)
            .with_entry("image", "debian-11")
            .with_entry("imageproject", "debian-cloud")
            .with_entry("zone", "us-east1-b")
    }

    #[tokio::test]
    async fn test_prepare_with_port() {
        let provider = GcpProvider::new("gcloud");

        let plan = provider
            .prepare(&section("web1").with_entry("port", "80"))
            .await
            .unwrap();

        assert_eq!(plan.provider, ProviderKind::Gcp);
        assert_eq!(plan.create_command[4], "web1");
        let port = plan.open_port.unwrap();
        assert_eq!(port.command[4], "allow-port-80-vm-web1");
    }

    #[tokio::test]
    async fn test_gcp_pass_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(ScriptedExecutor::new());
        let orchestrator = Orchestrator::new(
            executor.clone(),
            DocumentationWriter::new(temp_dir.path()),
        )
        .with_provider(GcpProvider::new("gcloud"));

        let config = ProviderConfigFile {
            path: temp_dir.path().join("gcp.conf"),
            sections: vec![section("vm1"), section("VM2"), section("vm3")],
        };

        let report = orchestrator.run_pass("gcp", Some(&config)).await;

        assert_eq!(report.status, PassStatus::Completed);
        assert_eq!(report.created(), 2);
        assert!(matches!(
            report.sections[1].outcome,
            SectionOutcome::Rejected { .. }
        ));
        assert_eq!(
            executor.count(&["gcloud", "compute", "instances", "create"]),
            2
        );
        assert_eq!(executor.count(&["gcloud", "compute", "firewall-rules"]), 0);
    }
}
