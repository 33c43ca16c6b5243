//! Run parameters for a single generation.
//!
//! These come from the command line, not from `config.json`. The defaults
//! are the conventional project layout: config and assets under `configs/`,
//! the manifest at the project root.

use crate::error::{Error, Result};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "configs/config.json";
pub const DEFAULT_OUTPUT_PATH: &str = "docker-compose.yml";
pub const DEFAULT_ASSETS_DIR: &str = "configs";

/// First host port probed for `backend1`; backend N starts at `base + N - 1`.
pub const DEFAULT_BASE_PORT: u16 = 8001;

/// Candidates probed per backend before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub config_path: PathBuf,
    pub output_path: PathBuf,
    pub assets_dir: PathBuf,
    pub base_port: u16,
    pub max_attempts: u32,
    /// Render the manifest without writing it or any asset files.
    pub dry_run: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            base_port: DEFAULT_BASE_PORT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            dry_run: false,
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<()> {
        if self.base_port == 0 {
            return Err(Error::Validation(
                "base port must be between 1 and 65535".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(Error::Validation(
                "max attempts must be at least 1".to_string(),
            ));
        }
        if self.assets_dir.as_os_str().is_empty() {
            return Err(Error::Validation(
                "assets directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
