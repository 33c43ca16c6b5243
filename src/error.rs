// Allow unused_assignments at module level because thiserror's generated code
// for struct variants triggers false positive warnings - the fields ARE used
// in the Display impl but rustc's lint pass doesn't see this.
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Config file {} not found", .path.display())]
    #[diagnostic(
        code(lbc::config::not_found),
        help("Create one with `lbc init` or pass a different path with --config")
    )]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse config file {}: {reason}", .path.display())]
    #[diagnostic(
        code(lbc::config::malformed),
        help("Check the file syntax with `lbc validate`")
    )]
    ConfigMalformed { path: PathBuf, reason: String },

    #[error("Could not find a free port after {attempts} attempts starting at {start}")]
    #[diagnostic(
        code(lbc::port::exhausted),
        help("Free some ports in that range or pick another with --base-port")
    )]
    PortExhausted { start: u16, attempts: u32 },

    #[error("Filesystem error: {0}")]
    #[diagnostic(code(lbc::filesystem::error))]
    Filesystem(String),

    #[error("Invalid settings: {0}")]
    #[diagnostic(code(lbc::settings::invalid))]
    Validation(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns a helpful suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Error::ConfigNotFound { path } => Some(format!(
                "Create a starter config with: lbc init --config {}",
                path.display()
            )),
            Error::ConfigMalformed { .. } => Some(
                "The config must be a JSON object, e.g. {\"backends\": [\"http://backend1:80\"]}"
                    .to_string(),
            ),
            Error::PortExhausted { start, attempts } => {
                let span = u16::try_from(attempts.saturating_sub(1)).unwrap_or(u16::MAX);
                let end = start.saturating_add(span);
                Some(format!(
                    "Every port in {}-{} is taken. Find what is using them with: lsof -i :{}",
                    start, end, start
                ))
            }
            Error::Filesystem(_) | Error::Io(_) => Some(
                "Check that the output and asset directories exist and are writable".to_string(),
            ),
            Error::Validation(_) => Some("Run `lbc generate --help` for valid values".to_string()),
            Error::Yaml(_) => None,
        }
    }

    /// Formats the error with its suggestion (if any) for user-friendly display.
    pub fn with_suggestion(&self) -> String {
        match self.suggestion() {
            Some(suggestion) => format!("{}\n\nHint: {}", self, suggestion),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_names_the_path() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("configs/config.json"),
        };
        assert_eq!(
            err.to_string(),
            "Config file configs/config.json not found"
        );
        assert!(err.with_suggestion().contains("lbc init"));
    }

    #[test]
    fn port_exhausted_hint_covers_the_probed_range() {
        let err = Error::PortExhausted {
            start: 8001,
            attempts: 100,
        };
        let hint = err.suggestion().unwrap();
        assert!(hint.contains("8001-8100"), "unexpected hint: {}", hint);
    }

    #[test]
    fn port_exhausted_hint_stops_at_top_of_port_range() {
        let err = Error::PortExhausted {
            start: 65500,
            attempts: u32::MAX,
        };
        let hint = err.suggestion().unwrap();
        assert!(hint.contains("65500-65535"), "unexpected hint: {}", hint);
    }

    #[test]
    fn yaml_errors_have_no_hint() {
        let yaml_err = serde_yaml::from_str::<u16>("not a number").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(err.suggestion().is_none());
        assert_eq!(err.with_suggestion(), err.to_string());
    }
}
