//! Configuration for vmflow
//!
//! - [`Settings`]: layered application settings (defaults, settings file,
//!   `VMFLOW_*` environment variables)
//! - [`ProviderConfigFile`]: one INI provider file (`azure.conf`, `gcp.conf`),
//!   one [`Section`] per VM
//! - [`archive_config_files`]: timestamped copies of the provider files

pub mod archive;
pub mod error;
pub mod section;
pub mod settings;

pub use archive::{archive_config_files, archived_name};
pub use error::*;
pub use section::{ProviderConfigFile, Section, ValueCase};
pub use settings::Settings;

/// Second-granularity timestamp used in every generated file name.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
