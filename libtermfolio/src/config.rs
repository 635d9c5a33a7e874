//! Configuration management for Termfolio
//!
//! Every section has defaults, so a missing config file is not an error.
//! Durations are written the human way (`"10s"`, `"35ms"`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub timing: TimingConfig,
    pub server: ServerConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GitHubConfig {
    /// Account whose repositories and stats are shown
    pub username: String,
    pub api_base: String,
    /// Personal access token; falls back to `GITHUB_TOKEN`
    pub token: Option<String>,
    #[serde(with = "duration_str")]
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Upper bound for any single background fetch
    #[serde(with = "duration_str")]
    pub fetch_timeout: Duration,
    /// Period of the stats screen's automatic refresh
    #[serde(with = "duration_str")]
    pub stats_refresh: Duration,
    #[serde(with = "duration_str")]
    pub intro_tick: Duration,
    #[serde(with = "duration_str")]
    pub matrix_tick: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    /// Where the last picked theme is remembered
    pub theme_file: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username: "Polqt".to_string(),
            api_base: "https://api.github.com".to_string(),
            token: None,
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            stats_refresh: Duration::from_secs(30),
            intro_tick: Duration::from_millis(35),
            matrix_tick: Duration::from_millis(50),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:23234".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            theme_file: None,
        }
    }
}

impl GitHubConfig {
    /// Token from the config file, else from the environment
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
    }
}

impl UiConfig {
    /// Resolve the theme file path, expanding `~`
    pub fn theme_file_path(&self) -> Result<PathBuf> {
        match &self.theme_file {
            Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).to_string())),
            None => Ok(resolve_config_dir()?.join("theme")),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.github.username.trim().is_empty() {
            return Err(ConfigError::MissingField("github.username".to_string()).into());
        }
        if self.timing.fetch_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "timing.fetch_timeout".to_string(),
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        for (field, value) in [
            ("timing.stats_refresh", self.timing.stats_refresh),
            ("timing.intro_tick", self.timing.intro_tick),
            ("timing.matrix_tick", self.timing.matrix_tick),
        ] {
            if value.is_zero() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("TERMFOLIO_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    Ok(resolve_config_dir()?.join("config.toml"))
}

fn resolve_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("termfolio"))
}

/// Resolve the data directory path following XDG Base Directory spec
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("termfolio"))
}

mod duration_str {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.github.username, "Polqt");
        assert_eq!(config.timing.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.timing.stats_refresh, Duration::from_secs(30));
        assert_eq!(config.timing.intro_tick, Duration::from_millis(35));
        assert_eq!(config.server.listen, "0.0.0.0:23234");
        assert_eq!(config.ui.theme, "default");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[github]
username = "octocat"

[timing]
stats_refresh = "1m"
"#
        )
        .unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.github.api_base, "https://api.github.com");
        assert_eq!(config.timing.stats_refresh, Duration::from_secs(60));
        assert_eq!(config.timing.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_bad_duration_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nfetch_timeout = \"soon\"").unwrap();

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nfetch_timeout = \"0s\"").unwrap();

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("timing.fetch_timeout"));
    }

    #[test]
    fn test_empty_username_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[github]\nusername = \"\"").unwrap();

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("github.username"));
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        std::env::set_var("TERMFOLIO_CONFIG", "/tmp/termfolio-test.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("TERMFOLIO_CONFIG");
        assert_eq!(path, PathBuf::from("/tmp/termfolio-test.toml"));
    }

    #[test]
    #[serial]
    fn test_token_falls_back_to_env() {
        std::env::set_var("GITHUB_TOKEN", "ghp_example");
        let config = GitHubConfig::default();
        assert_eq!(config.resolve_token().as_deref(), Some("ghp_example"));

        let explicit = GitHubConfig {
            token: Some("from-file".to_string()),
            ..GitHubConfig::default()
        };
        assert_eq!(explicit.resolve_token().as_deref(), Some("from-file"));
        std::env::remove_var("GITHUB_TOKEN");
    }

    #[test]
    #[serial]
    fn test_missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("TERMFOLIO_CONFIG", dir.path().join("absent.toml"));
        let config = Config::load().unwrap();
        std::env::remove_var("TERMFOLIO_CONFIG");
        assert_eq!(config, Config::default());
    }
}
