//! Configuration loading utilities

use crate::Config;
use dino_common::{PageviewsError, Result as PageviewsResult};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "DINO_PAGEVIEWS_CONFIG";

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dino-pageviews.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading or writing a configuration file
    #[error("Failed to access configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] PageviewsError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Offending variable
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for PageviewsError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            ConfigError::IoError(io) => PageviewsError::config_with_source(
                "Failed to access configuration file",
                io,
            ),
            other => PageviewsError::config(other.to_string()),
        }
    }
}

/// Configuration loader for the binaries
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = toml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Resolve and load the configuration.
    ///
    /// Uses `DINO_PAGEVIEWS_CONFIG` when set, else `dino-pageviews.toml` in the
    /// working directory if present, else the defaults. Environment overrides
    /// apply in every case.
    pub fn load() -> PageviewsResult<Config> {
        let config = match Self::resolve_path() {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                Self::load_config(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_env_overrides(&mut config)?;
                config.validate()?;
                config
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PageviewsResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Write `config` to `path` through a temporary file in the same directory.
    pub fn save<P: AsRef<Path>>(config: &Config, path: P) -> PageviewsResult<()> {
        Ok(Self::save_config(config, path.as_ref())?)
    }

    fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| ConfigError::IoError(e.error))?;

        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    fn resolve_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        default.exists().then(|| default.to_path_buf())
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup` instead of the process environment.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(user_agent) = lookup("DINO_PAGEVIEWS_USER_AGENT") {
            config.api.user_agent = user_agent;
        }

        if let Some(timeout) = lookup("DINO_PAGEVIEWS_TIMEOUT") {
            config.api.timeout_secs = timeout.parse().map_err(|e| ConfigError::EnvParseError {
                var: "DINO_PAGEVIEWS_TIMEOUT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(dir) = lookup("DINO_PAGEVIEWS_DATA_DIR") {
            config.paths.data_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup("DINO_PAGEVIEWS_IMAGE_DIR") {
            config.paths.image_dir = PathBuf::from(dir);
        }

        if let Some(csv) = lookup("DINO_PAGEVIEWS_ARTICLES_CSV") {
            config.paths.articles_csv = PathBuf::from(csv);
        }

        if let Some(level) = lookup("DINO_PAGEVIEWS_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_overrides_replace_paths_and_agent() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("DINO_PAGEVIEWS_USER_AGENT", "research bot <me@example.org>"),
            ("DINO_PAGEVIEWS_DATA_DIR", "/tmp/data"),
            ("DINO_PAGEVIEWS_LOG_LEVEL", "debug"),
        ]);

        ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap();

        assert_eq!(config.api.user_agent, "research bot <me@example.org>");
        assert_eq!(config.paths.data_dir, PathBuf::from("/tmp/data"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.paths.image_dir, PathBuf::from("img"));
    }

    #[test]
    fn test_unparsable_override_reports_variable() {
        let mut config = Config::default();
        let lookup = lookup_from(&[("DINO_PAGEVIEWS_TIMEOUT", "soon")]);

        let err = ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap_err();
        assert!(err.to_string().contains("DINO_PAGEVIEWS_TIMEOUT"));
    }

    #[test]
    fn test_validation_error_keeps_field() {
        let err: PageviewsError =
            ConfigError::ValidationError(PageviewsError::validation_field("bad", "plots.top_k"))
                .into();
        assert!(matches!(
            err,
            PageviewsError::Validation { field: Some(ref f), .. } if f == "plots.top_k"
        ));
    }
}
