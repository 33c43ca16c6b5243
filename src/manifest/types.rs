//! Docker Compose manifest model.
//!
//! Only the subset of the compose format this generator emits is modelled.
//! Field order in the structs is the key order in the written YAML, and all
//! maps are `IndexMap` so services keep their insertion order.

use super::duration::format_duration;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

pub const COMPOSE_VERSION: &str = "3.8";

/// Top-level compose document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub version: String,
    pub services: IndexMap<String, ServiceDescriptor>,
    pub networks: IndexMap<String, NetworkDefinition>,
    pub volumes: IndexMap<String, VolumeDefinition>,
}

impl Manifest {
    pub fn service(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services.get(name)
    }

    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }
}

/// One runnable unit in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildContext>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortMapping>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Mount>,

    /// `Some` with an empty map is written as `depends_on: {}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<IndexMap<String, DependsOn>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<HealthCheck>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    pub context: String,
    pub dockerfile: String,
}

/// `host:container` port publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

impl PortMapping {
    pub fn new(host: u16, container: u16) -> Self {
        Self { host, container }
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

impl Serialize for PortMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `source:target[:ro]` volume entry. `source` is a host path or a named
/// volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub source: String,
    pub target: String,
    pub read_only: bool,
}

impl Mount {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.target)?;
        if self.read_only {
            f.write_str(":ro")?;
        }
        Ok(())
    }
}

impl Serialize for Mount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Health-check policy executed by the orchestrator, not by this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub test: Vec<String>,
    #[serde(serialize_with = "serialize_duration")]
    pub interval: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub timeout: Duration,
    pub retries: u32,
}

fn serialize_duration<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*duration))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DependsOn {
    pub condition: DependencyCondition,
}

impl DependsOn {
    pub fn healthy() -> Self {
        Self {
            condition: DependencyCondition::ServiceHealthy,
        }
    }
}

/// Readiness a dependency must reach before the dependent starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyCondition {
    ServiceStarted,
    ServiceHealthy,
    ServiceCompletedSuccessfully,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDefinition {
    pub driver: String,
}

impl NetworkDefinition {
    pub fn bridge() -> Self {
        Self {
            driver: "bridge".to_string(),
        }
    }
}

/// Named volume with default driver options, written as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VolumeDefinition {}
