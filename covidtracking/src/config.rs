//! Client configuration.
//!
//! Defaults target the public API; an optional INI file under the user
//! config directory overrides the base URL and timeout.

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::client::DEFAULT_TIMEOUT_SECS;
use crate::endpoints::DEFAULT_BASE_URL;
use crate::error::{Error, Result};

/// Configuration for [`Tracker`](crate::Tracker) construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Loads the user configuration file if present, falling back to
    /// defaults. The file lives at `<config dir>/covidtracking/config.ini`.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_ini(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reads a configuration from an INI file.
    ///
    /// Recognized keys, all optional, live in the `[api]` section:
    /// `base_url` and `timeout` (seconds).
    pub fn from_ini(path: &Path) -> Result<Self> {
        let ini = Ini::load_from_file(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        let mut config = Self::default();
        if let Some(section) = ini.section(Some("api")) {
            if let Some(base_url) = section.get("base_url") {
                config.base_url = base_url.to_string();
            }
            if let Some(timeout) = section.get("timeout") {
                config.timeout_secs = timeout
                    .parse()
                    .map_err(|_| Error::Config(format!("invalid timeout {:?}", timeout)))?;
            }
        }
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("covidtracking").join("config.ini"))
    }
}
