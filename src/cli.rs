//! Command-line options and their overlay onto the file configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError, LogLevel};

/// Smart-home energy optimizer demo API.
#[derive(Debug, Parser)]
#[command(name = "energy-optimizer", version, about)]
pub struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// IP address to bind (overrides `server.listen`).
    #[arg(long)]
    pub listen: Option<String>,

    /// TCP port (overrides `server.port`).
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Fixed generator seed (overrides `generators.seed`).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (overrides `logging.level`).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Directory containing the frontend `index.html`.
    #[arg(long, value_name = "DIR")]
    pub frontend_dir: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file (if any) and applies CLI overrides on top.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the config file cannot be read or parsed.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::default(),
        };

        if let Some(listen) = &self.listen {
            config.server.listen.clone_from(listen);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.frontend_dir {
            config.server.frontend_dir.clone_from(dir);
        }
        if let Some(seed) = self.seed {
            config.generators.seed = Some(seed);
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        Ok(config)
    }
}
