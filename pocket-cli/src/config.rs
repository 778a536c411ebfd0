//! Optional TOML configuration for the `pocket` binary.
//!
//! ```toml
//! [contacts]
//! backend = "http"
//! root_url = "https://mysite.itvarsity.org/api/ContactBook/"
//! api_key = "someone@example.org"
//!
//! [logging]
//! level = "debug"
//! file = "pocket.log"
//! ```
//!
//! Every key is optional. Values given on the command line (or through the
//! matching environment variables) win over the file, and the file wins over
//! the built-in defaults.

use std::path::{Path, PathBuf};

use pocket_core::contacts::ApiConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "pocket.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactsSection {
    pub backend: Option<String>,
    pub root_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub contacts: ContactsSection,
    pub logging: LoggingSection,
}

/// Contact settings taken from the command line; `None` falls through to
/// the config file.
#[derive(Debug, Clone, Default)]
pub struct ApiOverrides {
    pub backend: Option<String>,
    pub root_url: Option<String>,
    pub api_key: Option<String>,
}

impl AppConfig {
    pub fn from_toml_str(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `explicit` when given (it must exist), otherwise
    /// [`DEFAULT_CONFIG_FILE`] from the working directory if present,
    /// otherwise returns the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&contents, &path)
    }

    /// Resolves the contact backend settings: overrides, then file, then
    /// [`ApiConfig::default`].
    pub fn api_config(
        &self,
        overrides: ApiOverrides,
    ) -> ApiConfig {
        let defaults = ApiConfig::default();
        let file = self.contacts.clone();

        ApiConfig {
            backend: overrides
                .backend
                .or(file.backend)
                .unwrap_or(defaults.backend),
            root_url: overrides
                .root_url
                .or(file.root_url)
                .unwrap_or(defaults.root_url),
            api_key: overrides
                .api_key
                .or(file.api_key)
                .unwrap_or(defaults.api_key),
        }
    }
}
