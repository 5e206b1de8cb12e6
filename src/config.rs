//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config PATH`, or `config.toml` in the platform
//!    config directory)
//! 3. `DUPFIND_*` environment variables (e.g. `DUPFIND_IO_THREADS=8`)
//! 4. CLI flags, applied with [`Config::merge_cli`]
//!
//! A config file that is missing is not an error. One that cannot be parsed
//! is logged and the defaults are used instead.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::DEFAULT_IO_THREADS;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DUPFIND_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of hashing threads.
    pub io_threads: usize,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
    /// Report format.
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            io_threads: DEFAULT_IO_THREADS,
            follow_symlinks: false,
            output: OutputFormat::Text,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Failed to determine project directories")]
    NoProjectDirs,

    /// A provider produced an invalid value.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

impl Config {
    /// Load configuration from the default file location and the environment.
    ///
    /// Falls back to defaults (with a debug log) if anything goes wrong.
    pub fn load(explicit_path: Option<&Path>) -> Self {
        let path = match explicit_path {
            Some(p) => Some(p.to_path_buf()),
            None => match Self::config_path() {
                Ok(p) => Some(p),
                Err(e) => {
                    log::debug!("{e}, skipping config file");
                    None
                }
            },
        };
        Self::load_layers(path.as_deref()).unwrap_or_else(|e| {
            log::debug!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Load configuration from `path` and the environment.
    ///
    /// Falls back to defaults if the merged configuration is invalid.
    pub fn load_from_path(path: PathBuf) -> Self {
        Self::load(Some(path.as_path()))
    }

    /// Merge defaults, the optional TOML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if any layer holds a value of the wrong type.
    pub fn load_layers(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)?;
        Ok(config.normalized())
    }

    /// Apply CLI flags on top of the loaded configuration.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(threads) = cli.io_threads {
            self.io_threads = threads;
        }
        if cli.follow_symlinks {
            self.follow_symlinks = true;
        }
        if cli.no_follow_symlinks {
            self.follow_symlinks = false;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        *self = self.clone().normalized();
    }

    fn normalized(mut self) -> Self {
        self.io_threads = self.io_threads.max(1);
        self
    }

    /// Default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoProjectDirs`] when no home directory is known.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let project_dirs =
            ProjectDirs::from("com", "dupfind", "dupfind").ok_or(ConfigError::NoProjectDirs)?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
