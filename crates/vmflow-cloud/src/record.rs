//! Provenance records for created VMs
//!
//! One `VMcreation_<timestamp>.txt` file per successful creation. Files are
//! opened create-new and never rewritten.

use crate::error::{CloudError, Result};
use crate::executor::ExecutionResult;
use crate::provider::VmPlan;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use vmflow_config::FILE_TIMESTAMP_FORMAT;

const RECORD_PREFIX: &str = "VMcreation_";
const RECORD_EXTENSION: &str = "txt";
const DATE_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_PROJECT: &str = "DefaultProject";
pub const STATUS_CREATED: &str = "Successfully created";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentationRecord {
    pub timestamp: DateTime<Local>,

    /// OS-level identity of whoever ran vmflow
    pub operator: String,

    pub name: String,
    pub project: String,
    pub team: String,
    pub purpose: String,
    pub os: String,

    /// Output of the create command
    pub relevant_info: String,

    pub status: String,

    pub port: Option<PortOutcome>,
}

/// Result of the open-port / firewall command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortOutcome {
    pub port: String,
    pub opened: bool,
    pub info: String,
}

impl PortOutcome {
    pub fn from_execution(port: impl Into<String>, result: &ExecutionResult) -> Self {
        Self {
            port: port.into(),
            opened: result.success,
            info: result.info.trim().to_string(),
        }
    }
}

impl DocumentationRecord {
    /// Record for a VM whose create command succeeded
    pub fn created(plan: &VmPlan, relevant_info: impl Into<String>) -> Self {
        let or_empty = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            timestamp: Local::now(),
            operator: operator_identity(),
            name: plan.name.clone(),
            project: plan
                .project
                .clone()
                .unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
            team: or_empty(&plan.team),
            purpose: or_empty(&plan.purpose),
            os: or_empty(&plan.os),
            relevant_info: relevant_info.into(),
            status: STATUS_CREATED.to_string(),
            port: None,
        }
    }

    pub fn with_port(mut self, port: PortOutcome) -> Self {
        self.port = Some(port);
        self
    }

    /// File content, one `Key: value` line per field
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("Date Stamp: {}", self.timestamp.format(DATE_STAMP_FORMAT)),
            format!("System Admin Name: {}", self.operator),
            format!("Name: {}", self.name),
            format!("Project: {}", self.project),
            format!("Team: {}", self.team),
            format!("Purpose: {}", self.purpose),
            format!("Os: {}", self.os),
            format!("Relevant Info: {}", self.relevant_info.trim_end()),
            format!("Status: {}", self.status),
        ];

        if let Some(port) = &self.port {
            if port.opened {
                lines.push(format!("Port: {} opened", port.port));
            } else {
                lines.push(format!(
                    "Port: {} WARNING: failed to open: {}",
                    port.port, port.info
                ));
            }
        }

        let mut content = lines.join("\n");
        content.push('\n');
        content
    }

    fn file_stem(&self) -> String {
        format!(
            "{}{}",
            RECORD_PREFIX,
            self.timestamp.format(FILE_TIMESTAMP_FORMAT)
        )
    }
}

/// Current process owner, from the login environment
pub fn operator_identity() -> String {
    ["USER", "LOGNAME", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Writes [`DocumentationRecord`]s into a directory
#[derive(Debug, Clone)]
pub struct DocumentationWriter {
    dir: PathBuf,
}

impl DocumentationWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `record` to a new file and return its path.
    ///
    /// A second record in the same second gets a `_2`, `_3`, ... suffix.
    pub async fn write(&self, record: &DocumentationRecord) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .await
                .map_err(|source| CloudError::Documentation {
                    path: self.dir.clone(),
                    source,
                })?;
        }

        let stem = record.file_stem();
        let content = record.render();

        let mut attempt = 1u32;
        loop {
            let file_name = if attempt == 1 {
                format!("{}.{}", stem, RECORD_EXTENSION)
            } else {
                format!("{}_{}.{}", stem, attempt, RECORD_EXTENSION)
            };
            let path = self.dir.join(file_name);
            attempt += 1;

            let file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            let file = match file {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(CloudError::Documentation { path, source }),
            };

            if let Err(source) = write_or_remove(file, &path, content.as_bytes()).await {
                return Err(CloudError::Documentation { path, source });
            }

            tracing::info!("Documentation file created: {}", path.display());
            return Ok(path);
        }
    }
}

/// Write `content` through `out`. On failure the file at `path` is removed so
/// no partial record is left behind.
async fn write_or_remove<W: AsyncWrite + Unpin>(
    mut out: W,
    path: &Path,
    content: &[u8],
) -> std::io::Result<()> {
    let written = match out.write_all(content).await {
        Ok(()) => out.flush().await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        drop(out);
        if let Err(remove) = fs::remove_file(path).await {
            tracing::warn!("Failed to remove {}: {}", path.display(), remove);
        }
        return Err(e);
    }

    Ok(())
}
