//! Per-backend static content.
//!
//! Each backend serves `index-backend{N}.html` from the assets directory.
//! The file is created once with a placeholder page and then belongs to the
//! user: later runs find it and leave it alone.

use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name of the static page for backend `index`.
pub fn asset_file_name(index: usize) -> String {
    format!("index-backend{}.html", index)
}

/// Placeholder page written for a backend that has no asset yet.
pub fn default_page(index: usize) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Welcome to Nginx!</title></head><body><h1>Hello from Nginx Backend {}!</h1></body></html>",
        index
    )
}

pub struct AssetProvisioner {
    assets_dir: PathBuf,
    dry_run: bool,
}

impl AssetProvisioner {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            dry_run: false,
        }
    }

    /// Report paths without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.assets_dir.join(asset_file_name(index))
    }

    /// Make sure backend `index` has an asset file and return its path.
    ///
    /// An existing file is success and is never rewritten. The file is
    /// opened with `create_new`, so a file that appears between the check
    /// and the write is also left alone.
    pub fn ensure(&self, index: usize) -> Result<PathBuf> {
        let path = self.path_for(index);

        if self.dry_run {
            tracing::info!("Dry run: would ensure asset file {}", path.display());
            return Ok(path);
        }

        fs::create_dir_all(&self.assets_dir).map_err(|e| {
            Error::Filesystem(format!(
                "Failed to create asset directory '{}': {}",
                self.assets_dir.display(),
                e
            ))
        })?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::info!("Asset file already exists: {}", path.display());
                return Ok(path);
            }
            Err(e) => {
                return Err(Error::Filesystem(format!(
                    "Failed to create asset file '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        file.write_all(default_page(index).as_bytes()).map_err(|e| {
            Error::Filesystem(format!(
                "Failed to write asset file '{}': {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!("Created asset file: {}", path.display());
        Ok(path)
    }
}
