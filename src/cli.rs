use clap::{Args, Parser, Subcommand};
use lb_compose::config::{
    DEFAULT_ASSETS_DIR, DEFAULT_BASE_PORT, DEFAULT_CONFIG_PATH, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_OUTPUT_PATH,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lbc")]
#[command(about = "Generate a docker-compose manifest for the load balancer and its backends")]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Suppress user-facing output (logs are still controlled by RUST_LOG)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Defaults to `generate`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate docker-compose.yml from the config (default)
    Generate(GenerateArgs),
    /// Check the config and show what would be generated
    Validate {
        /// First host port probed for backend1
        #[arg(long, default_value_t = DEFAULT_BASE_PORT, value_parser = clap::value_parser!(u16).range(1..))]
        base_port: u16,
    },
    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// Manifest output path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Directory holding nginx.conf and the per-backend pages
    #[arg(long, default_value = DEFAULT_ASSETS_DIR)]
    pub assets_dir: PathBuf,

    /// First host port probed for backend1; backend N starts at base + N - 1
    #[arg(long, default_value_t = DEFAULT_BASE_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    pub base_port: u16,

    /// Ports probed per backend before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Print the manifest on stdout instead of writing it; logs go to stderr
    /// and no asset files are created
    #[arg(long)]
    pub dry_run: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            base_port: DEFAULT_BASE_PORT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            dry_run: false,
        }
    }
}
