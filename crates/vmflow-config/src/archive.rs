//! Timestamped copies of the provider configuration files

use crate::error::Result;
use std::path::{Path, PathBuf};

/// `azure.conf` + `2024-01-02_03-04-05` -> `azure_2024-01-02_03-04-05.conf`
pub fn archived_name(path: &Path, stamp: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, stamp),
    };

    path.with_file_name(file_name)
}

/// Copy every existing file next to itself with a timestamp suffix.
///
/// Originals are left in place. Missing files are skipped.
pub fn archive_config_files<P: AsRef<Path>>(paths: &[P], stamp: &str) -> Result<Vec<PathBuf>> {
    let mut archived = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Skipping archive of missing file: {}", path.display());
            continue;
        }

        let target = archived_name(path, stamp);
        std::fs::copy(path, &target)?;
        tracing::info!("Copied contents of {} to {}", path.display(), target.display());
        archived.push(target);
    }

    Ok(archived)
}
