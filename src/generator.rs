//! End-to-end generation: config in, manifest out.

use crate::config::{Config, GeneratorSettings, Parser};
use crate::error::Result;
use crate::manifest::{compose, BackendSpec, ComposeOptions, Manifest, ManifestBuilder, ManifestWriter};
use crate::port::{PortAllocator, PortProbe};

/// What a generation produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub config: Config,
    pub backends: Vec<BackendSpec>,
    pub manifest: Manifest,
    /// The manifest as YAML, exactly as written (or as it would be in a dry run).
    pub rendered: String,
    pub written: bool,
}

pub struct Generator {
    settings: GeneratorSettings,
}

impl Generator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Run against the live host using the default loopback probe.
    pub fn run(&self) -> Result<GenerationReport> {
        self.run_with_builder(ManifestBuilder::new(&self.settings))
    }

    /// Run with a caller-supplied allocator.
    pub fn run_with_allocator<P: PortProbe>(
        &self,
        allocator: PortAllocator<P>,
    ) -> Result<GenerationReport> {
        self.run_with_builder(ManifestBuilder::with_allocator(&self.settings, allocator))
    }

    /// Nothing is written to the manifest path until every backend has been
    /// planned, so a failure leaves any previous manifest in place.
    fn run_with_builder<P: PortProbe>(
        &self,
        mut builder: ManifestBuilder<P>,
    ) -> Result<GenerationReport> {
        self.settings.validate()?;

        let config = Parser::new().load_config(&self.settings.config_path)?;
        let options = ComposeOptions::from_config(&self.settings.assets_dir, &config)?
            .for_manifest_at(&self.settings.output_path)?;

        let backends = builder.plan_backends(&config)?;
        let manifest = compose(&options, &backends);
        let rendered = ManifestWriter::render(&manifest)?;

        let written = if self.settings.dry_run {
            tracing::info!(
                "Dry run: skipping write of {}",
                self.settings.output_path.display()
            );
            false
        } else {
            ManifestWriter::write(&manifest, &self.settings.output_path)?;
            true
        };

        Ok(GenerationReport {
            config,
            backends,
            manifest,
            rendered,
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    struct FakeProbe {
        occupied: HashSet<u16>,
    }

    impl PortProbe for FakeProbe {
        fn probe(&self, port: u16) -> io::Result<()> {
            if self.occupied.contains(&port) {
                Err(io::Error::new(io::ErrorKind::AddrInUse, "Address already in use"))
            } else {
                Ok(())
            }
        }
    }

    fn free_ports() -> PortAllocator<FakeProbe> {
        PortAllocator::with_probe(FakeProbe {
            occupied: HashSet::new(),
        })
    }

    fn settings_in(dir: &Path) -> GeneratorSettings {
        GeneratorSettings {
            config_path: dir.join("configs").join("config.json"),
            output_path: dir.join("docker-compose.yml"),
            assets_dir: dir.join("configs"),
            ..Default::default()
        }
    }

    fn write_config(dir: &Path, content: &str) {
        fs::create_dir_all(dir.join("configs")).unwrap();
        fs::write(dir.join("configs").join("config.json"), content).unwrap();
    }

    #[test]
    fn run_writes_manifest_and_assets() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_config(temp_dir.path(), r#"{"backends": ["http://a", "http://b"]}"#);
        let settings = settings_in(temp_dir.path());

        let report = Generator::new(settings.clone())
            .run_with_allocator(free_ports())
            .unwrap();

        assert!(report.written);
        assert_eq!(report.backends.len(), 2);
        assert_eq!(report.manifest.services.len(), 4);
        assert_eq!(fs::read_to_string(&settings.output_path).unwrap(), report.rendered);
        assert!(settings.assets_dir.join("index-backend1.html").exists());
        assert!(settings.assets_dir.join("index-backend2.html").exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_config(temp_dir.path(), r#"{"backends": ["http://a"]}"#);
        let settings = GeneratorSettings {
            dry_run: true,
            ..settings_in(temp_dir.path())
        };

        let report = Generator::new(settings.clone())
            .run_with_allocator(free_ports())
            .unwrap();

        assert!(!report.written);
        assert!(report.rendered.contains("backend1"));
        assert!(!settings.output_path.exists());
        assert!(!settings.assets_dir.join("index-backend1.html").exists());
    }

    #[test]
    fn missing_config_leaves_previous_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings_in(temp_dir.path());
        fs::write(&settings.output_path, "previous\n").unwrap();

        let err = Generator::new(settings.clone())
            .run_with_allocator(free_ports())
            .unwrap_err();

        assert!(matches!(err, Error::ConfigNotFound { .. }), "{:?}", err);
        assert_eq!(fs::read_to_string(&settings.output_path).unwrap(), "previous\n");
    }

    #[test]
    fn port_exhaustion_leaves_no_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_config(temp_dir.path(), r#"{"backends": ["http://a"]}"#);
        let settings = settings_in(temp_dir.path());
        let allocator = PortAllocator::with_probe(FakeProbe {
            occupied: (8001..8101).collect(),
        });

        let err = Generator::new(settings.clone())
            .run_with_allocator(allocator)
            .unwrap_err();

        assert!(matches!(err, Error::PortExhausted { .. }), "{:?}", err);
        assert!(!settings.output_path.exists());
    }

    #[test]
    fn invalid_settings_fail_before_reading_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = GeneratorSettings {
            max_attempts: 0,
            ..settings_in(temp_dir.path())
        };

        let err = Generator::new(settings).run_with_allocator(free_ports()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{:?}", err);
    }
}
