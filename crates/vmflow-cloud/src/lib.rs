//! vmflow cloud core
//!
//! Provider abstraction and the provisioning pipeline shared by the Azure
//! and GCP providers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  vmflow CLI                      │
//! │            (vmflow provision / plan)             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                vmflow-cloud                      │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   Orchestrator: prepare → create →        │   │
//! │  │   open port → document                    │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────────────┐     │
//! │  │ trait        │  │ trait                │     │
//! │  │ VmProvider   │  │ CommandExecutor      │     │
//! │  └──────────────┘  └──────────────────────┘     │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │ azure (az)    │ │ gcp (gcloud)  │
//! │   provider    │ │   provider    │
//! └───────────────┘ └───────────────┘
//! ```

pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod provider;
pub mod record;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod validation;

// Re-exports
pub use error::{CloudError, Result};
pub use executor::{CommandExecutor, ExecutionResult, ProcessExecutor, command_line};
pub use orchestrator::{
    Orchestrator, PassInput, PassReport, PassStatus, PlannedSection, RunReport, SectionOutcome,
    SectionReport,
};
pub use provider::{PortRequest, ProviderKind, VmPlan, VmProvider};
pub use record::{DocumentationRecord, DocumentationWriter, PortOutcome, operator_identity};
pub use validation::{ValidationError, ValidationResult, missing_keys, require_keys};
