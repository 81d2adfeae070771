use crate::RunArgs;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use vmflow_cloud::{
    CommandExecutor, DocumentationWriter, Orchestrator, PassInput, ProcessExecutor, ProviderKind,
};
use vmflow_cloud_azure::AzureProvider;
use vmflow_cloud_gcp::GcpProvider;
use vmflow_config::{ProviderConfigFile, Settings, ValueCase};

/// Settings with command line overrides applied
pub fn resolve_settings(args: &RunArgs) -> anyhow::Result<Settings> {
    let mut settings = Settings::load(args.settings.as_deref())?;

    if let Some(ref path) = args.azure_config {
        settings.azure_config = path.clone();
    }
    if let Some(ref path) = args.gcp_config {
        settings.gcp_config = path.clone();
    }
    if let Some(ref dir) = args.docs_dir {
        settings.docs_dir = dir.clone();
    }

    Ok(settings)
}

/// Provider names to run, in pass order
pub fn selected_providers(args: &RunArgs) -> Vec<String> {
    match &args.only {
        Some(only) => vec![only.to_lowercase()],
        None => ProviderKind::ALL
            .iter()
            .map(|kind| kind.as_str().to_string())
            .collect(),
    }
}

/// One provider pass and the file it reads
pub struct LoadedPass {
    pub provider: String,
    pub config: Option<ProviderConfigFile>,

    /// Set when the file exists but could not be parsed
    pub error: Option<String>,
}

impl LoadedPass {
    pub fn input(&self) -> PassInput<'_> {
        match &self.error {
            Some(error) => PassInput::invalid(&self.provider, error),
            None => PassInput::new(&self.provider, self.config.as_ref()),
        }
    }
}

/// Load the provider file of every selected pass.
///
/// A missing file is reported and yields `None`. A malformed one fails only
/// its own pass.
pub fn load_passes(settings: &Settings, providers: &[String]) -> Vec<LoadedPass> {
    let case = settings.value_case();

    providers
        .iter()
        .map(|provider| {
            let loaded = match provider.parse::<ProviderKind>() {
                Ok(ProviderKind::Azure) => load_file(&settings.azure_config, case),
                Ok(ProviderKind::Gcp) => load_file(&settings.gcp_config, case),
                // left for the orchestrator to report
                Err(_) => Ok(None),
            };
            let (config, error) = match loaded {
                Ok(config) => (config, None),
                Err(e) => {
                    println!("{}", e.to_string().red());
                    (None, Some(e.to_string()))
                }
            };
            LoadedPass {
                provider: provider.clone(),
                config,
                error,
            }
        })
        .collect()
}

fn load_file(path: &Path, case: ValueCase) -> vmflow_config::Result<Option<ProviderConfigFile>> {
    let file = ProviderConfigFile::load_optional(path, case)?;
    if file.is_none() {
        println!("{}", format!("{} does not exist.", path.display()).yellow());
    }
    Ok(file)
}

pub fn build_orchestrator(settings: &Settings) -> Orchestrator {
    let executor: Arc<dyn CommandExecutor> = Arc::new(ProcessExecutor::new());

    Orchestrator::new(
        executor.clone(),
        DocumentationWriter::new(&settings.docs_dir),
    )
    .with_provider(AzureProvider::new(settings.az_binary.clone(), executor))
    .with_provider(GcpProvider::new(settings.gcloud_binary.clone()))
}
