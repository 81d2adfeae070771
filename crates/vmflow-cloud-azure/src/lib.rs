//! Azure provider for vmflow
//!
//! Validates Azure VM sections and builds `az vm create` commands.
//!
//! # Requirements
//!
//! - `az` CLI must be installed and logged in (`az login`)
//! - Resource groups are never created automatically
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vmflow_cloud::{ProcessExecutor, VmProvider};
//! use vmflow_cloud_azure::AzureProvider;
//!
//! let provider = AzureProvider::new("az", Arc::new(ProcessExecutor::new()));
//! let plan = provider.prepare(&section).await?;
//! ```

pub mod az;
pub mod config;
pub mod error;
pub mod provider;

pub use az::{Az, ImageInfo};
pub use config::{AzureVmConfig, Credentials, validate_name};
pub use error::{AzureError, Result};
pub use provider::AzureProvider;
