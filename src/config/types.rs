//! Core configuration types.
//!
//! The input file is the load balancer's own `config.json`. Only the keys
//! that shape the manifest are modelled here; everything else the balancer
//! reads (rate limits, client configs, intervals) is ignored.

use serde::{Deserialize, Serialize};

/// Port the load balancer listens on when the config does not say.
pub const DEFAULT_BALANCER_PORT: u16 = 8087;

/// Health endpoint every backend is expected to serve.
pub const DEFAULT_HEALTH_CHECK_PATH: &str = "/health";

/// Root configuration structure for `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend identifiers in the order they are assigned indices.
    #[serde(default)]
    pub backends: Vec<String>,

    /// Balancer listen address, either `":8087"` or `"8087"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check_path: Option<String>,
}

impl Config {
    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Port published for the load balancer.
    ///
    /// Accepts the balancer's `":PORT"` form as well as a bare number.
    pub fn balancer_port(&self) -> std::result::Result<u16, String> {
        let Some(raw) = self.port.as_deref() else {
            return Ok(DEFAULT_BALANCER_PORT);
        };

        let trimmed = raw.trim().trim_start_matches(':');
        match trimmed.parse::<u16>() {
            Ok(0) | Err(_) => Err(format!("invalid port '{}'", raw)),
            Ok(port) => Ok(port),
        }
    }

    /// Path probed by the backend health checks, always with a leading `/`.
    pub fn health_check_path(&self) -> String {
        match self.health_check_path.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_HEALTH_CHECK_PATH.to_string(),
            Some(path) if path.starts_with('/') => path.to_string(),
            Some(path) => format!("/{}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balancer_port_defaults_when_unset() {
        assert_eq!(Config::default().balancer_port(), Ok(DEFAULT_BALANCER_PORT));
    }

    #[test]
    fn balancer_port_accepts_listen_address_form() {
        let config = Config {
            port: Some(":9090".to_string()),
            ..Default::default()
        };
        assert_eq!(config.balancer_port(), Ok(9090));

        let config = Config {
            port: Some("9091".to_string()),
            ..Default::default()
        };
        assert_eq!(config.balancer_port(), Ok(9091));
    }

    #[test]
    fn balancer_port_rejects_garbage_and_zero() {
        for raw in [":http", "70000", ":0", ""] {
            let config = Config {
                port: Some(raw.to_string()),
                ..Default::default()
            };
            assert!(config.balancer_port().is_err(), "accepted '{}'", raw);
        }
    }

    #[test]
    fn health_check_path_is_normalised() {
        let mut config = Config::default();
        assert_eq!(config.health_check_path(), "/health");

        config.health_check_path = Some("ready".to_string());
        assert_eq!(config.health_check_path(), "/ready");

        config.health_check_path = Some("/livez".to_string());
        assert_eq!(config.health_check_path(), "/livez");

        config.health_check_path = Some("  ".to_string());
        assert_eq!(config.health_check_path(), "/health");
    }
}
