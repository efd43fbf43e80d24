//! Bootstrap configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled defaults (fallback)
//!
//! Command-line and environment overrides are applied by the binary (clap
//! reads both); this module locates and parses the TOML file and supplies the
//! compiled defaults. A missing config file is not an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PODCASTR_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Interface to bind the HTTP server to
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// Base URL of the episodes API
    pub api_url: String,

    /// Number of episodes fetched for the home page
    pub home_limit: usize,

    /// Number of episodes shown as cards at the top of the home page
    pub latest_count: usize,

    /// Number of episode pages fetched before the server starts listening
    pub prerender_count: usize,

    /// Seconds before home page data is refetched
    pub home_revalidate_secs: u64,

    /// Seconds before episode page data is refetched
    pub episode_revalidate_secs: u64,

    /// Timeout for requests to the episodes API
    pub request_timeout_secs: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_url: "http://localhost:3333".to_string(),
            home_limit: 12,
            latest_count: 2,
            prerender_count: 2,
            home_revalidate_secs: 60 * 60 * 8,
            episode_revalidate_secs: 60 * 60 * 24,
            request_timeout_secs: 30,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a config file; a malformed file is an error
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::Config("api_url must not be empty".to_string()));
        }
        if self.home_limit == 0 {
            return Err(Error::Config("home_limit must be at least 1".to_string()));
        }
        if self.latest_count > self.home_limit {
            return Err(Error::Config(format!(
                "latest_count ({}) exceeds home_limit ({})",
                self.latest_count, self.home_limit
            )));
        }
        Ok(())
    }
}

/// Locates the bootstrap config file
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Config file path, if one is named or present in the user config dir
    pub fn config_path(&self) -> Option<PathBuf> {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        // Priority 3: ~/.config/podcastr/config.toml
        default_config_path().filter(|p| p.exists())
    }

    /// Where the bootstrap config comes from
    pub fn source(&self) -> ConfigSource {
        match self.config_path() {
            Some(path) if path.exists() => ConfigSource::File(path),
            Some(path) => ConfigSource::Missing(path),
            None => ConfigSource::Defaults,
        }
    }

    /// Resolve the bootstrap config
    ///
    /// A config file that does not exist yields the compiled defaults; a file
    /// that exists but does not parse is an error.
    pub fn resolve(&self) -> Result<TomlConfig> {
        self.source().load()
    }
}

/// Origin of the bootstrap config
///
/// Resolution runs before logging is set up, so the binary logs the source
/// once the subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// An existing config file
    File(PathBuf),
    /// A named config file that does not exist
    Missing(PathBuf),
    /// No config file named or present
    Defaults,
}

impl ConfigSource {
    /// Load and validate the config this source describes
    pub fn load(&self) -> Result<TomlConfig> {
        let config = match self {
            ConfigSource::File(path) => TomlConfig::load(path)?,
            ConfigSource::Missing(_) | ConfigSource::Defaults => TomlConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// A named file was not found
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigSource::Missing(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "Loaded config from {}", path.display()),
            ConfigSource::Missing(path) => {
                write!(f, "Config file {} not found, using defaults", path.display())
            }
            ConfigSource::Defaults => write!(f, "No config file, using defaults"),
        }
    }
}

/// Platform config location (`~/.config/podcastr/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("podcastr").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.home_limit, 12);
        assert_eq!(config.latest_count, 2);
        assert_eq!(config.home_revalidate_secs, 28_800);
        assert_eq!(config.episode_revalidate_secs, 86_400);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
            api_url = "https://api.example.com"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.port, 3000);
        assert_eq!(config.home_limit, 12);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_latest_count() {
        let config = TomlConfig {
            home_limit: 1,
            latest_count: 2,
            ..TomlConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_empty_api_url() {
        let config = TomlConfig {
            api_url: "  ".to_string(),
            ..TomlConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_source_loads_defaults() {
        let source = ConfigSource::Missing(PathBuf::from("/nonexistent/podcastr.toml"));
        assert!(source.is_missing());
        assert_eq!(source.load().unwrap(), TomlConfig::default());
        assert_eq!(
            source.to_string(),
            "Config file /nonexistent/podcastr.toml not found, using defaults"
        );
    }

    #[test]
    fn test_defaults_source() {
        assert!(!ConfigSource::Defaults.is_missing());
        assert_eq!(ConfigSource::Defaults.load().unwrap(), TomlConfig::default());
    }
}
