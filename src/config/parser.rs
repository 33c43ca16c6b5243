use super::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// On-disk syntax of a config file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Load config from file path
    pub fn load_config<P: AsRef<Path>>(&self, path: P) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::error!("Config file {} not found", path.display());
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| {
            Error::Filesystem(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = self
            .parse_config(&content, ConfigFormat::from_path(path))
            .map_err(|reason| {
                tracing::error!("Failed to parse config file {}: {}", path.display(), reason);
                Error::ConfigMalformed {
                    path: path.to_path_buf(),
                    reason,
                }
            })?;

        tracing::info!(
            "Loaded config with {} backends: {:?}",
            config.backend_count(),
            config.backends
        );
        Ok(config)
    }

    /// Parse config from a string.
    ///
    /// Returns the parse failure as a plain reason so the caller can attach
    /// the path it came from.
    pub fn parse_config(
        &self,
        content: &str,
        format: ConfigFormat,
    ) -> std::result::Result<Config, String> {
        let config: Config = match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
        };

        config.balancer_port()?;
        Ok(config)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_config() {
        let json = r#"
{
  "port": ":8087",
  "backends": ["http://backend1:80", "http://backend2:80"],
  "health_check_path": "/health",
  "health_check_interval": "5s",
  "rate_limit": { "capacity": 100, "rate": 10 },
  "client_configs": [{ "client_id": "client1", "capacity": 50, "rate": 5 }]
}
"#;

        let parser = Parser::new();
        let config = parser.parse_config(json, ConfigFormat::Json).unwrap();

        assert_eq!(config.backend_count(), 2);
        assert_eq!(config.backends[0], "http://backend1:80");
        assert_eq!(config.balancer_port(), Ok(8087));
    }

    #[test]
    fn missing_backends_means_zero_backends() {
        let parser = Parser::new();
        let config = parser.parse_config("{}", ConfigFormat::Json).unwrap();
        assert_eq!(config.backend_count(), 0);
    }

    #[test]
    fn yaml_configs_are_accepted() {
        let yaml = "backends:\n  - a\n  - b\n  - c\n";
        let parser = Parser::new();
        let config = parser.parse_config(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.backends, vec!["a", "b", "c"]);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("configs/config.json")),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("lb.yml")),
            ConfigFormat::Yaml
        );
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Json);
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let err = Parser::new().load_config(&path).unwrap_err();
        match err {
            Error::ConfigNotFound { path: reported } => assert_eq!(reported, path),
            other => panic!("expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn unparseable_file_is_config_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ \"backends\": [").unwrap();

        let err = Parser::new().load_config(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigMalformed { .. }), "{:?}", err);
    }

    #[test]
    fn wrong_shape_is_config_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "backends": "http://only-one" }"#).unwrap();

        let err = Parser::new().load_config(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigMalformed { .. }), "{:?}", err);
    }

    #[test]
    fn bad_balancer_port_is_config_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "port": ":http", "backends": [] }"#).unwrap();

        let err = Parser::new().load_config(&path).unwrap_err();
        match err {
            Error::ConfigMalformed { reason, .. } => assert!(reason.contains(":http")),
            other => panic!("expected ConfigMalformed, got {:?}", other),
        }
    }

    #[test]
    fn load_config_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "backends": ["z", "a", "m"] }"#).unwrap();

        let config = Parser::new().load_config(&path).unwrap();
        assert_eq!(config.backends, vec!["z", "a", "m"]);
    }
}
