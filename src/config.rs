//! Configuration constants and file loading for the CLI.
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags and the `VIACEP_BASE_URL` environment variable
//! 2. Project-level config: `./.viacep/config.toml`
//! 3. User-level config: `~/.viacep/config.toml`
//! 4. Built-in defaults

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CliError, Result};

/// Base URL of the public ViaCEP service.
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

/// Environment variable overriding the lookup service base URL.
pub const BASE_URL_ENV: &str = "VIACEP_BASE_URL";

/// Project-level config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".viacep";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// TOML configuration file structure.
#[derive(Debug, Default, Deserialize)]
pub struct ViaCepConfig {
    /// Lookup service base URL.
    pub base_url: Option<String>,

    /// Request timeout. The HTTP client default applies when unset.
    pub timeout_secs: Option<u64>,

    /// Whether to wait for a key press before exiting.
    pub pause_on_exit: Option<bool>,

    /// Print every address field instead of the summary.
    #[serde(default)]
    pub show_all_fields: bool,
}

/// Loads configuration from TOML files.
///
/// Checks project-level config first, then user-level config.
/// The first file found wins.
pub fn load_config() -> ViaCepConfig {
    if let Some(config) = load_config_from_path(project_config_path()) {
        debug!("Loaded project-level config");
        return config;
    }

    if let Some(config) = load_config_from_path(user_config_path()) {
        debug!("Loaded user-level config");
        return config;
    }

    debug!("No config file found, using defaults");
    ViaCepConfig::default()
}

/// Loads config from a specific path.
fn load_config_from_path(path: Option<PathBuf>) -> Option<ViaCepConfig> {
    let path = path?;

    if !path.exists() {
        return None;
    }

    debug!(path = %path.display(), "Reading config file");

    match fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse config file"
                );
                None
            }
        },
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Failed to read config file"
            );
            None
        }
    }
}

/// Returns the project-level config path (./.viacep/config.toml).
pub fn project_config_path() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    Some(cwd.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE_NAME))
}

/// Returns the user-level config path (~/.viacep/config.toml).
pub fn user_config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE_NAME))
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Lookup service base URL, without a trailing slash.
    pub base_url: String,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
    /// Wait for a key press before exiting.
    pub pause_on_exit: bool,
    /// Print every address field.
    pub show_all_fields: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            pause_on_exit: true,
            show_all_fields: false,
        }
    }
}

impl Settings {
    /// Merges command-line overrides over a loaded config file.
    ///
    /// `base_url` carries the flag or environment value; `full` and
    /// `no_pause` can only switch their setting on.
    pub fn resolve(
        file: &ViaCepConfig,
        base_url: Option<&str>,
        full: bool,
        no_pause: bool,
    ) -> Result<Self> {
        let base_url = base_url
            .or(file.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);

        let parsed = Url::parse(base_url)
            .map_err(|e| CliError::ConfigError(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CliError::ConfigError(format!(
                "base URL must use http or https: '{}'",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: file.timeout_secs.map(Duration::from_secs),
            pause_on_exit: !no_pause && file.pause_on_exit.unwrap_or(true),
            show_all_fields: full || file.show_all_fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viacep_config() {
        let toml_str = r#"
            base_url = "http://localhost:8080/"
            timeout_secs = 10
            pause_on_exit = false
            show_all_fields = true
        "#;

        let config: ViaCepConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/"));
        assert_eq!(config.timeout_secs, Some(10));
        assert_eq!(config.pause_on_exit, Some(false));
        assert!(config.show_all_fields);
    }

    #[test]
    fn test_empty_config() {
        let config: ViaCepConfig = toml::from_str("").unwrap();

        assert_eq!(config.base_url, None);
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.pause_on_exit, None);
        assert!(!config.show_all_fields);
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(&ViaCepConfig::default(), None, false, false).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_resolve_precedence() {
        let file = ViaCepConfig {
            base_url: Some("http://from-file.test/".to_string()),
            timeout_secs: Some(3),
            pause_on_exit: Some(true),
            show_all_fields: false,
        };

        let from_file = Settings::resolve(&file, None, false, false).unwrap();
        assert_eq!(from_file.base_url, "http://from-file.test");
        assert_eq!(from_file.timeout, Some(Duration::from_secs(3)));

        let from_flag = Settings::resolve(&file, Some("https://flag.test"), true, true).unwrap();
        assert_eq!(from_flag.base_url, "https://flag.test");
        assert!(from_flag.show_all_fields);
        assert!(!from_flag.pause_on_exit);
    }

    #[test]
    fn test_resolve_rejects_bad_base_url() {
        let config = ViaCepConfig::default();
        assert!(matches!(
            Settings::resolve(&config, Some("not a url"), false, false),
            Err(CliError::ConfigError(_))
        ));
        assert!(matches!(
            Settings::resolve(&config, Some("ftp://viacep.com.br"), false, false),
            Err(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_paths() {
        if let Some(path) = project_config_path() {
            assert!(path.ends_with(".viacep/config.toml"));
        }
    }
}
