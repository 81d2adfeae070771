//! Provisioning orchestrator
//!
//! Drives every section of a provider file through
//! prepare → create → open port → document, one section at a time.
//! A failing section never stops the ones after it.

use crate::error::{CloudError, Result};
use crate::executor::{CommandExecutor, command_line};
use crate::provider::{ProviderKind, VmPlan, VmProvider};
use crate::record::{DocumentationRecord, DocumentationWriter, PortOutcome};
use crate::validation::{ValidationError, ValidationResult};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use vmflow_config::{ProviderConfigFile, Section};

pub struct Orchestrator {
    providers: Vec<Box<dyn VmProvider>>,
    executor: Arc<dyn CommandExecutor>,
    writer: DocumentationWriter,
}

/// One provider pass to run
#[derive(Debug, Clone, Copy)]
pub struct PassInput<'a> {
    pub provider: &'a str,
    pub config: Option<&'a ProviderConfigFile>,

    /// Why the provider file could not be loaded
    pub error: Option<&'a str>,
}

impl<'a> PassInput<'a> {
    pub fn new(provider: &'a str, config: Option<&'a ProviderConfigFile>) -> Self {
        Self {
            provider,
            config,
            error: None,
        }
    }

    /// A pass whose provider file exists but could not be parsed
    pub fn invalid(provider: &'a str, error: &'a str) -> Self {
        Self {
            provider,
            config: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SectionOutcome {
    /// VM created and documented
    Created {
        record: PathBuf,
        port: Option<PortOutcome>,
    },
    /// Precondition failed; nothing was created
    Rejected { error: ValidationError },
    /// The create command exited nonzero
    CreateFailed { info: String },
    /// VM created but its record could not be written
    DocumentationFailed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub section: String,
    pub outcome: SectionOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassStatus {
    Completed,
    /// The provider file does not exist
    MissingConfig,
    /// The provider file could not be parsed
    InvalidConfig,
    /// The provider name is not one of the registered providers
    Unsupported,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub provider: String,
    pub status: PassStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub sections: Vec<SectionReport>,
}

impl PassReport {
    fn empty(provider: &str, status: PassStatus) -> Self {
        Self {
            provider: provider.to_string(),
            status,
            error: None,
            sections: Vec::new(),
        }
    }

    pub fn created(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| matches!(s.outcome, SectionOutcome::Created { .. }))
            .count()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub passes: Vec<PassReport>,
}

impl RunReport {
    /// Failures that must fail the run as a whole
    pub fn run_errors(&self) -> Vec<&str> {
        let invalid = self.passes.iter().filter_map(|p| p.error.as_deref());
        let undocumented = self
            .passes
            .iter()
            .flat_map(|p| &p.sections)
            .filter_map(|s| match &s.outcome {
                SectionOutcome::DocumentationFailed { error } => Some(error.as_str()),
                _ => None,
            });
        invalid.chain(undocumented).collect()
    }
}

/// Dry-run result for one section
#[derive(Debug, Clone)]
pub struct PlannedSection {
    pub section: String,
    pub plan: ValidationResult<VmPlan>,
}

impl Orchestrator {
    pub fn new(executor: Arc<dyn CommandExecutor>, writer: DocumentationWriter) -> Self {
        Self {
            providers: Vec::new(),
            executor,
            writer,
        }
    }

    pub fn with_provider(mut self, provider: impl VmProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    fn provider(&self, name: &str) -> Result<&dyn VmProvider> {
        let kind: ProviderKind = name.parse()?;
        self.providers
            .iter()
            .find(|p| p.kind() == kind)
            .map(|p| p.as_ref())
            .ok_or_else(|| CloudError::UnsupportedProvider(name.to_string()))
    }

    /// Run every pass in order
    pub async fn run(&self, passes: &[PassInput<'_>]) -> RunReport {
        let mut report = RunReport::default();
        for pass in passes {
            let pass_report = match pass.error {
                Some(error) => {
                    warn!(provider = pass.provider, "Skipping pass: {}", error);
                    PassReport {
                        error: Some(error.to_string()),
                        ..PassReport::empty(pass.provider, PassStatus::InvalidConfig)
                    }
                }
                None => self.run_pass(pass.provider, pass.config).await,
            };
            report.passes.push(pass_report);
        }
        report
    }

    /// Provision every section of one provider file
    pub async fn run_pass(&self, provider: &str, config: Option<&ProviderConfigFile>) -> PassReport {
        let provider_impl = match self.provider(provider) {
            Ok(p) => p,
            Err(e) => {
                warn!("{}", e);
                return PassReport::empty(provider, PassStatus::Unsupported);
            }
        };

        let Some(config) = config else {
            warn!(provider, "No configuration file, skipping pass");
            return PassReport::empty(provider, PassStatus::MissingConfig);
        };

        info!(
            "Provisioning {} section(s) on {}",
            config.sections.len(),
            provider_impl.display_name()
        );

        let mut report = PassReport::empty(provider, PassStatus::Completed);
        for section in &config.sections {
            let outcome = self.provision_section(provider_impl, section).await;
            report.sections.push(SectionReport {
                section: section.name.clone(),
                outcome,
            });
        }
        report
    }

    async fn provision_section(&self, provider: &dyn VmProvider, section: &Section) -> SectionOutcome {
        info!(section = %section.name, "Processing section");

        let plan = match provider.prepare(section).await {
            Ok(plan) => plan,
            Err(error) => {
                warn!(section = %section.name, "{}", error);
                return SectionOutcome::Rejected { error };
            }
        };

        info!("Executing command: {}", command_line(&plan.create_command));
        let created = self.executor.execute(&plan.create_command, true).await;
        if !created.success {
            return SectionOutcome::CreateFailed { info: created.info };
        }

        let port = match &plan.open_port {
            Some(request) => {
                let result = self.executor.execute(&request.command, false).await;
                if !result.success {
                    warn!(
                        vm = %plan.name,
                        port = %request.port,
                        "Failed to open port: {}",
                        result.info.trim()
                    );
                }
                Some(PortOutcome::from_execution(&request.port, &result))
            }
            None => None,
        };

        let mut record = DocumentationRecord::created(&plan, created.info);
        if let Some(port) = port.clone() {
            record = record.with_port(port);
        }

        match self.writer.write(&record).await {
            Ok(path) => SectionOutcome::Created { record: path, port },
            Err(e) => {
                tracing::error!("{}", e);
                SectionOutcome::DocumentationFailed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Validate one provider file without creating anything.
    ///
    /// Read-only precondition queries still run.
    pub async fn plan_pass(
        &self,
        provider: &str,
        config: &ProviderConfigFile,
    ) -> Result<Vec<PlannedSection>> {
        let provider = self.provider(provider)?;

        let mut planned = Vec::new();
        for section in &config.sections {
            planned.push(PlannedSection {
                section: section.name.clone(),
                plan: provider.prepare(section).await,
            });
        }
        Ok(planned)
    }
}
