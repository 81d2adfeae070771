//! gcloud CLI wrapper
//!
//! GCP sections need no read-only queries, so this only builds argument
//! vectors for the orchestrator to execute.

use crate::config::GcpVmConfig;

/// gcloud CLI wrapper
#[derive(Debug, Clone)]
pub struct Gcloud {
    binary: String,
}

impl Gcloud {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command<S: AsRef<str>>(&self, args: &[S]) -> Vec<String> {
        std::iter::once(self.binary.clone())
            .chain(args.iter().map(|a| a.as_ref().to_string()))
            .collect()
    }

    /// `gcloud compute instances create <name> ...`
    pub fn instances_create_command(&self, config: &GcpVmConfig) -> Vec<String> {
        let mut args = vec![
            "compute",
            "instances",
            "create",
            config.name.as_str(),
            "--zone",
            config.zone.as_str(),
            "--image",
            config.image.as_str(),
            "--image-project",
            config.image_project.as_str(),
        ];

        if let Some(ref machine_type) = config.machine_type {
            args.push("--machine-type");
            args.push(machine_type.as_str());
        }

        if let Some(ref disk_size) = config.boot_disk_size {
            args.push("--boot-disk-size");
            args.push(disk_size.as_str());
        }

        self.command(args.as_slice())
    }

    /// Firewall rule allowing TCP `port` to instances tagged `vm_name`
    pub fn firewall_rule_command(&self, vm_name: &str, port: &str) -> Vec<String> {
        self.command(&[
            "compute".to_string(),
            "firewall-rules".to_string(),
            "create".to_string(),
            firewall_rule_name(vm_name, port),
            "--allow".to_string(),
            format!("tcp:{}", port),
            "--target-tags".to_string(),
            vm_name.to_string(),
            "--description".to_string(),
            format!("Allow port {} access to {}", port, vm_name),
        ])
    }
}

pub fn firewall_rule_name(vm_name: &str, port: &str) -> String {
    format!("allow-port-{}-vm-{}", port, vm_name)
}
