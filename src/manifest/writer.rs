use super::Manifest;
use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct ManifestWriter;

impl ManifestWriter {
    /// Render the manifest as compose YAML.
    pub fn render(manifest: &Manifest) -> Result<String> {
        Ok(serde_yaml::to_string(manifest)?)
    }

    /// Replace the file at `path` with the rendered manifest.
    ///
    /// The YAML is written to a sibling temp file and renamed into place,
    /// so `path` holds either the previous manifest or the complete new one.
    pub fn write(manifest: &Manifest, path: &Path) -> Result<()> {
        let contents = Self::render(manifest)?;
        Self::atomic_write(path, &contents)?;
        tracing::info!("Generated {} successfully", path.display());
        Ok(())
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }

    fn atomic_write(path: &Path, contents: &str) -> Result<()> {
        let temp_path = Self::temp_path(path);

        let result = (|| {
            let mut file = fs::File::create(&temp_path).map_err(|e| {
                Error::Filesystem(format!(
                    "Failed to create temp file '{}': {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(contents.as_bytes()).map_err(|e| {
                Error::Filesystem(format!(
                    "Failed to write temp file '{}': {}",
                    temp_path.display(),
                    e
                ))
            })?;

            // Data must be on disk before the rename makes it visible.
            file.sync_all().map_err(|e| {
                Error::Filesystem(format!(
                    "Failed to sync temp file '{}': {}",
                    temp_path.display(),
                    e
                ))
            })?;
            drop(file);

            fs::rename(&temp_path, path).map_err(|e| {
                Error::Filesystem(format!(
                    "Failed to replace '{}': {}",
                    path.display(),
                    e
                ))
            })
        })();

        if result.is_err() {
            // The write error is the one reported.
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}
