//! Azure provider implementation

use crate::az::Az;
use crate::config::AzureVmConfig;
use async_trait::async_trait;
use std::sync::Arc;
use vmflow_cloud::{
    CommandExecutor, ProviderKind, ValidationError, ValidationResult, VmPlan, VmProvider,
};
use vmflow_config::Section;

/// Azure provider
///
/// Preconditions, in order: required keys, name legality, credentials,
/// resource group exists, image is offered in the location.
pub struct AzureProvider {
    az: Az,
}

impl AzureProvider {
    pub fn new(binary: impl Into<String>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            az: Az::new(binary, executor),
        }
    }

    /// Provider-side checks; only called once the section itself is valid
    async fn check_resources(&self, config: &AzureVmConfig) -> ValidationResult<()> {
        tracing::debug!("Checking resource group {}", config.resource_group);
        if !self.az.group_exists(&config.resource_group).await? {
            return Err(ValidationError::ResourceGroupNotFound(
                config.resource_group.clone(),
            ));
        }

        if !self
            .az
            .image_available(&config.location, &config.image)
            .await?
        {
            return Err(ValidationError::ImageNotFound {
                image: config.image.clone(),
                location: config.location.clone(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl VmProvider for AzureProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Azure
    }

    fn display_name(&self) -> &str {
        "Azure"
    }

    async fn prepare(&self, section: &Section) -> ValidationResult<VmPlan> {
        let config = AzureVmConfig::from_section(section)?;
        self.check_resources(&config).await?;

        let plan = VmPlan::new(
            ProviderKind::Azure,
            section,
            config.name.clone(),
            self.az.vm_create_command(&config),
        );

        Ok(match &config.port {
            Some(port) => {
                let command = self
                    .az
                    .open_port_command(&config.resource_group, &config.name, port);
                plan.with_open_port(port.clone(), command)
            }
            None => plan,
        })
    }
}
