//! Optional TOML configuration for the `tax-rate` binary.
//!
//! ```toml
//! log_level = "debug"
//! default_tax_year = 2025
//! default_jurisdiction = "ON"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "tax-rate.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub default_tax_year: Option<i32>,
    pub default_jurisdiction: Option<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_tax_year: None,
            default_jurisdiction: None,
        }
    }
}

impl ToolConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given. Otherwise loads [`DEFAULT_CONFIG_FILE`] when it
    /// exists and falls back to defaults when it does not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ToolConfig::from_toml_str("").unwrap();

        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn parses_all_keys() {
        let config = ToolConfig::from_toml_str(
            r#"
            log_level = "debug"
            default_tax_year = 2026
            default_jurisdiction = "ON"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            ToolConfig {
                log_level: "debug".to_string(),
                default_tax_year: Some(2026),
                default_jurisdiction: Some("ON".to_string()),
            }
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(ToolConfig::from_toml_str("currency = \"USD\"").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ToolConfig::load(Path::new("/nonexistent/tax-rate.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/tax-rate.toml"));
    }
}
