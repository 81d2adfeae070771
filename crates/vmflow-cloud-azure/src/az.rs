//! az CLI wrapper
//!
//! Read-only queries used as preconditions, plus the argument vectors for
//! `az vm create` and `az vm open-port`.

use crate::config::{AzureVmConfig, Credentials};
use crate::error::{AzureError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vmflow_cloud::CommandExecutor;

/// az CLI wrapper
pub struct Az {
    binary: String,
    executor: Arc<dyn CommandExecutor>,
}

impl Az {
    pub fn new(binary: impl Into<String>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            binary: binary.into(),
            executor,
        }
    }

    fn command(&self, args: &[&str]) -> Vec<String> {
        std::iter::once(self.binary.as_str())
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    /// Run a read-only query and return stdout
    async fn query(&self, args: &[&str]) -> Result<String> {
        let result = self.executor.execute(&self.command(args), false).await;
        if !result.success {
            return Err(AzureError::CommandFailed(result.info.trim().to_string()));
        }
        Ok(result.info)
    }

    /// `az group exists --name <rg>`
    pub async fn group_exists(&self, resource_group: &str) -> Result<bool> {
        let output = self
            .query(&["group", "exists", "--name", resource_group])
            .await?;
        Ok(output.trim() == "true")
    }

    /// `az vm image list --location <location> --output json`
    pub async fn list_images(&self, location: &str) -> Result<Vec<ImageInfo>> {
        let output = self
            .query(&["vm", "image", "list", "--location", location, "--output", "json"])
            .await?;

        if output.trim().is_empty() {
            return Ok(Vec::new());
        }

        let images: Vec<ImageInfo> = serde_json::from_str(&output)?;
        Ok(images)
    }

    /// Whether `image` matches an image alias offered in `location`
    pub async fn image_available(&self, location: &str, image: &str) -> Result<bool> {
        let images = self.list_images(location).await?;
        Ok(images.iter().any(|i| i.matches_alias(image)))
    }

    /// `az vm create ...`
    pub fn vm_create_command(&self, config: &AzureVmConfig) -> Vec<String> {
        let mut args = vec![
            "vm",
            "create",
            "--resource-group",
            config.resource_group.as_str(),
            "--name",
            config.name.as_str(),
            "--image",
            config.image.as_str(),
            "--location",
            config.location.as_str(),
            "--admin-username",
            config.admin_username.as_str(),
        ];

        match &config.credentials {
            Credentials::GenerateSshKeys => args.push("--generate-ssh-keys"),
            Credentials::AdminPassword(password) => {
                args.push("--admin-password");
                args.push(password.as_str());
            }
        }

        if let Some(ref size) = config.size {
            args.push("--size");
            args.push(size.as_str());
        }

        if let Some(ref disk_size) = config.os_disk_size_gb {
            args.push("--os-disk-size-gb");
            args.push(disk_size.as_str());
        }

        args.push("--output");
        args.push("table");

        self.command(&args)
    }

    /// `az vm open-port -g <rg> -n <name> --port <port>`
    pub fn open_port_command(&self, resource_group: &str, vm_name: &str, port: &str) -> Vec<String> {
        self.command(&["vm", "open-port", "-g", resource_group, "-n", vm_name, "--port", port])
    }
}

/// Image entry from `az vm image list`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub urn_alias: Option<String>,
    pub urn: Option<String>,
    pub offer: Option<String>,
    pub publisher: Option<String>,
    pub sku: Option<String>,
}

impl ImageInfo {
    pub fn matches_alias(&self, image: &str) -> bool {
        self.urn_alias
            .as_deref()
            .is_some_and(|alias| alias.eq_ignore_ascii_case(image))
    }
}
