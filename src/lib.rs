//! # lb-compose
//!
//! Generates a docker-compose manifest for a load balancer, a redis cache and
//! one nginx backend per entry in the balancer's `config.json`.
//!
//! ## Features
//!
//! - **Port Allocation**: each backend gets a host port that is free at
//!   generation time, probing forward from `8001 + index - 1` and never
//!   reusing a port already assigned in the same run
//! - **Health Gating**: the load balancer waits for every backend to report
//!   `service_healthy`
//! - **Asset Provisioning**: a placeholder `index-backendN.html` is created
//!   once per backend and never overwritten
//! - **Stable Output**: services are written in a fixed order so regenerated
//!   manifests diff cleanly
//!
//! ## Quick Start
//!
//! ```no_run
//! use lb_compose::{Generator, GeneratorSettings};
//!
//! # fn example() -> Result<(), lb_compose::Error> {
//! let report = Generator::new(GeneratorSettings::default()).run()?;
//! for backend in &report.backends {
//!     println!("{} -> {}", backend.service_name(), backend.port);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! Generation is single-threaded and strictly sequential. Port probes bind
//! and release immediately, so a port reported free can still be taken by
//! another process before the containers start.

pub mod assets;
pub mod config;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod port;

// Re-export commonly used types
pub use config::{Config, GeneratorSettings, Parser};
pub use error::{Error, Result};
pub use generator::{GenerationReport, Generator};
pub use manifest::{BackendSpec, Manifest, ManifestBuilder, ManifestWriter};
pub use port::PortAllocator;
