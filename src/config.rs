//! TOML-based server configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// Top-level configuration parsed from TOML.
///
/// All sections have defaults, so an empty file (or no file at all) yields
/// a server on `0.0.0.0:8000` with OS-seeded generators.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener and static asset settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Random source for the synthetic data generators.
    #[serde(default)]
    pub generators: GeneratorConfig,
    /// Log verbosity.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Listener and static asset settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// IP address to bind.
    pub listen: String,
    /// TCP port to bind (must be > 0).
    pub port: u16,
    /// Directory holding the frontend `index.html`.
    pub frontend_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0".to_string(),
            port: 8000,
            frontend_dir: PathBuf::from("frontend"),
        }
    }
}

/// Random source settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible output; `None` seeds from the OS.
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown log level \"{other}\", expected trace, debug, info, warn or error"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.port"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl Config {
    /// Parses a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.server;

        if s.port == 0 {
            errors.push(ConfigError {
                field: "server.port".into(),
                message: "must be > 0".into(),
            });
        }
        if s.listen.trim().is_empty() {
            errors.push(ConfigError {
                field: "server.listen".into(),
                message: "must not be empty".into(),
            });
        } else if s.listen.parse::<std::net::IpAddr>().is_err() {
            errors.push(ConfigError {
                field: "server.listen".into(),
                message: format!("\"{}\" is not an IP address", s.listen),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.listen, "0.0.0.0");
        assert!(cfg.generators.seed.is_none());
        assert_eq!(cfg.logging.level, LogLevel::Info);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.frontend_dir, PathBuf::from("frontend"));
    }

    #[test]
    fn full_toml_parses() {
        let toml = r#"
[server]
listen = "127.0.0.1"
port = 9000
frontend_dir = "web"

[generators]
seed = 7

[logging]
level = "debug"
"#;
        let cfg = Config::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.server.port), Some(9000));
        assert_eq!(cfg.as_ref().and_then(|c| c.generators.seed), Some(7));
        assert_eq!(
            cfg.as_ref().map(|c| c.logging.level),
            Some(LogLevel::Debug)
        );
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = Config::from_toml_str("[server]\nport = 8123\n").unwrap();
        assert_eq!(cfg.server.port, 8123);
        assert_eq!(cfg.server.listen, "0.0.0.0");
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = r#"
[server]
port = 8000
bogus_field = true
"#;
        assert!(Config::from_toml_str(toml).is_err());
    }

    #[test]
    fn unknown_log_level_rejected() {
        assert!(Config::from_toml_str("[logging]\nlevel = \"loud\"\n").is_err());
    }

    #[test]
    fn validation_catches_zero_port() {
        let mut cfg = Config::default();
        cfg.server.port = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "server.port"));
    }

    #[test]
    fn validation_catches_bad_listen() {
        let mut cfg = Config::default();
        cfg.server.listen = "localhost:80".to_string();
        assert!(cfg.validate().iter().any(|e| e.field == "server.listen"));

        cfg.server.listen = "  ".to_string();
        assert!(cfg.validate().iter().any(|e| e.field == "server.listen"));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generators]\nseed = 99").unwrap();
        let cfg = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(cfg.generators.seed, Some(99));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::from_toml_file(Path::new("/nonexistent/optimizer.toml")).unwrap_err();
        assert_eq!(err.field, "config");
        assert!(err.message.contains("/nonexistent/optimizer.toml"));
    }

    #[test]
    fn log_level_from_str() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("verbose".parse::<LogLevel>().is_err());
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
    }
}
