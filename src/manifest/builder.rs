use super::types::{
    BuildContext, DependsOn, HealthCheck, Manifest, Mount, NetworkDefinition, PortMapping,
    ServiceDescriptor, VolumeDefinition, COMPOSE_VERSION,
};
use crate::assets::{asset_file_name, AssetProvisioner};
use crate::config::{Config, GeneratorSettings};
use crate::error::{Error, Result};
use crate::port::{LoopbackProbe, PortAllocator, PortProbe};
use indexmap::IndexMap;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

pub const LOAD_BALANCER_SERVICE: &str = "load-balancer";
pub const CACHE_SERVICE: &str = "redis";
pub const NETWORK_NAME: &str = "balancer-net";
pub const CACHE_VOLUME: &str = "redis-data";

const BACKEND_IMAGE: &str = "nginx:1.27";
const BACKEND_CONTAINER_PORT: u16 = 80;
const CACHE_IMAGE: &str = "redis:7.4";
const CACHE_PORT: u16 = 6379;
const NGINX_CONF: &str = "nginx.conf";

const HEALTHCHECK_INTERVAL: Duration = Duration::from_secs(5);
const HEALTHCHECK_TIMEOUT: Duration = Duration::from_secs(3);
const HEALTHCHECK_RETRIES: u32 = 5;

pub fn backend_service_name(index: usize) -> String {
    format!("backend{}", index)
}

/// One backend as planned for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSpec {
    /// 1-based position in `config.backends`.
    pub index: usize,
    /// Identifier from the config. Only used for logging.
    pub source: String,
    pub port: u16,
    /// Where the page was provisioned, relative to the working directory.
    pub asset_path: PathBuf,
}

impl BackendSpec {
    pub fn service_name(&self) -> String {
        backend_service_name(self.index)
    }
}

/// Inputs to [`compose`] that are fixed for the whole manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Assets directory as seen from the directory holding the manifest.
    pub assets_dir: PathBuf,
    pub balancer_port: u16,
    pub health_check_path: String,
}

impl ComposeOptions {
    pub fn from_config(assets_dir: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let balancer_port = config.balancer_port().map_err(Error::Validation)?;
        Ok(Self {
            assets_dir: assets_dir.into(),
            balancer_port,
            health_check_path: config.health_check_path(),
        })
    }

    /// Re-express `assets_dir` for a manifest written to `output_path`.
    ///
    /// Compose resolves bind-mount sources against the manifest's own
    /// directory, not the directory `lbc` ran in.
    pub fn for_manifest_at(mut self, output_path: &Path) -> Result<Self> {
        self.assets_dir = mount_dir(&self.assets_dir, output_path)?;
        Ok(self)
    }
}

fn mount_dir(assets_dir: &Path, output_path: &Path) -> Result<PathBuf> {
    if assets_dir.is_absolute() {
        return Ok(assets_dir.to_path_buf());
    }

    let manifest_dir: Vec<Component> = output_path
        .parent()
        .map(|dir| {
            dir.components()
                .filter(|c| !matches!(c, Component::CurDir))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    if manifest_dir.is_empty() {
        return Ok(assets_dir.to_path_buf());
    }

    let assets: Vec<Component> = assets_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if !is_plain(&manifest_dir) || !is_plain(&assets) {
        let cwd = std::env::current_dir().map_err(|e| {
            Error::Filesystem(format!("Failed to resolve {}: {}", assets_dir.display(), e))
        })?;
        return Ok(cwd.join(assets_dir));
    }

    let shared = manifest_dir
        .iter()
        .zip(&assets)
        .take_while(|(a, b)| a == b)
        .count();
    let mut relative = PathBuf::new();
    for _ in shared..manifest_dir.len() {
        relative.push(Component::ParentDir);
    }
    for component in &assets[shared..] {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(Component::CurDir);
    }
    Ok(relative)
}

fn is_plain(components: &[Component<'_>]) -> bool {
    components.iter().all(|c| matches!(c, Component::Normal(_)))
}

/// Plans backends against the live host and composes the manifest.
///
/// Backends are processed strictly in order: each allocation must see the
/// ports handed out before it, so there is no parallel variant.
pub struct ManifestBuilder<P = LoopbackProbe> {
    allocator: PortAllocator<P>,
    assets: AssetProvisioner,
    base_port: u16,
}

impl ManifestBuilder<LoopbackProbe> {
    pub fn new(settings: &GeneratorSettings) -> Self {
        let allocator = PortAllocator::new().max_attempts(settings.max_attempts);
        Self::with_allocator(settings, allocator)
    }
}

impl<P: PortProbe> ManifestBuilder<P> {
    pub fn with_allocator(settings: &GeneratorSettings, allocator: PortAllocator<P>) -> Self {
        Self {
            allocator,
            assets: AssetProvisioner::new(&settings.assets_dir).dry_run(settings.dry_run),
            base_port: settings.base_port,
        }
    }

    /// Provision assets and allocate ports for every backend, in config order.
    pub fn plan_backends(&mut self, config: &Config) -> Result<Vec<BackendSpec>> {
        let mut backends = Vec::with_capacity(config.backend_count());

        for (position, source) in config.backends.iter().enumerate() {
            let index = position + 1;
            tracing::info!("Processing backend {}: {}", index, source);

            let asset_path = self.assets.ensure(index)?;
            let port = self.allocator.allocate(self.start_port(index)?)?;

            let spec = BackendSpec {
                index,
                source: source.clone(),
                port,
                asset_path,
            };
            tracing::info!("Added service {} with port {}", spec.service_name(), port);
            backends.push(spec);
        }

        Ok(backends)
    }

    pub fn build(&mut self, config: &Config) -> Result<Manifest> {
        let options = ComposeOptions::from_config(self.assets.assets_dir(), config)?;
        let backends = self.plan_backends(config)?;
        Ok(compose(&options, &backends))
    }

    /// First port probed for backend `index`: `base_port + index - 1`.
    fn start_port(&self, index: usize) -> Result<u16> {
        usize::from(self.base_port)
            .checked_add(index - 1)
            .and_then(|port| u16::try_from(port).ok())
            .ok_or_else(|| {
                Error::Validation(format!(
                    "{} would start probing above port {} (base port {})",
                    backend_service_name(index),
                    u16::MAX,
                    self.base_port
                ))
            })
    }
}

/// Assemble the manifest from already-planned backends.
///
/// The load balancer depends on exactly the backends given, each gated on
/// `service_healthy`.
pub fn compose(options: &ComposeOptions, backends: &[BackendSpec]) -> Manifest {
    let depends_on: IndexMap<String, DependsOn> = backends
        .iter()
        .map(|backend| (backend.service_name(), DependsOn::healthy()))
        .collect();

    let mut services = IndexMap::with_capacity(backends.len() + 2);
    services.insert(
        LOAD_BALANCER_SERVICE.to_string(),
        load_balancer_service(options, depends_on),
    );
    services.insert(CACHE_SERVICE.to_string(), cache_service());
    for backend in backends {
        services.insert(backend.service_name(), backend_service(options, backend));
    }

    let mut networks = IndexMap::new();
    networks.insert(NETWORK_NAME.to_string(), NetworkDefinition::bridge());

    let mut volumes = IndexMap::new();
    volumes.insert(CACHE_VOLUME.to_string(), VolumeDefinition::default());

    Manifest {
        version: COMPOSE_VERSION.to_string(),
        services,
        networks,
        volumes,
    }
}

fn load_balancer_service(
    options: &ComposeOptions,
    depends_on: IndexMap<String, DependsOn>,
) -> ServiceDescriptor {
    ServiceDescriptor {
        container_name: Some(LOAD_BALANCER_SERVICE.to_string()),
        build: Some(BuildContext {
            context: ".".to_string(),
            dockerfile: "Dockerfile".to_string(),
        }),
        ports: vec![PortMapping::new(options.balancer_port, options.balancer_port)],
        volumes: vec![Mount::new(host_path(&options.assets_dir), "/app/configs")],
        depends_on: Some(depends_on),
        environment: vec!["LOG_LEVEL=DEBUG".to_string()],
        networks: vec![NETWORK_NAME.to_string()],
        ..Default::default()
    }
}

fn cache_service() -> ServiceDescriptor {
    ServiceDescriptor {
        image: Some(CACHE_IMAGE.to_string()),
        ports: vec![PortMapping::new(CACHE_PORT, CACHE_PORT)],
        volumes: vec![Mount::new(CACHE_VOLUME, "/data")],
        healthcheck: Some(health_check(&["CMD", "redis-cli", "ping"])),
        networks: vec![NETWORK_NAME.to_string()],
        ..Default::default()
    }
}

fn backend_service(options: &ComposeOptions, backend: &BackendSpec) -> ServiceDescriptor {
    let health_url = format!("http://localhost{}", options.health_check_path);

    ServiceDescriptor {
        image: Some(BACKEND_IMAGE.to_string()),
        container_name: Some(backend.service_name()),
        ports: vec![PortMapping::new(backend.port, BACKEND_CONTAINER_PORT)],
        volumes: vec![
            Mount::new(
                host_path(&options.assets_dir.join(NGINX_CONF)),
                "/etc/nginx/nginx.conf",
            ),
            Mount::new(
                host_path(&options.assets_dir.join(asset_file_name(backend.index))),
                "/usr/share/nginx/html/index.html",
            )
            .read_only(),
        ],
        healthcheck: Some(health_check(&["CMD", "curl", "-f", health_url.as_str()])),
        networks: vec![NETWORK_NAME.to_string()],
        ..Default::default()
    }
}

fn health_check(test: &[&str]) -> HealthCheck {
    HealthCheck {
        test: test.iter().map(|part| part.to_string()).collect(),
        interval: HEALTHCHECK_INTERVAL,
        timeout: HEALTHCHECK_TIMEOUT,
        retries: HEALTHCHECK_RETRIES,
    }
}

/// Host side of a bind mount. Compose treats a bare name as a named volume,
/// so plain relative paths get a `./` prefix.
fn host_path(path: &Path) -> String {
    let display = path.display().to_string();
    match path.components().next() {
        Some(Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)) => {
            display
        }
        _ => format!("./{}", display),
    }
}
