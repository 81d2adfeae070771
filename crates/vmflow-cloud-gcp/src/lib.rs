//! Google Cloud provider for vmflow
//!
//! Validates GCP VM sections and builds `gcloud compute` commands.
//! Requires the `gcloud` CLI, authenticated with a default project set.

pub mod config;
pub mod gcloud;
pub mod provider;

pub use config::{GcpVmConfig, validate_name};
pub use gcloud::{Gcloud, firewall_rule_name};
pub use provider::GcpProvider;
