//! Settings file management.
//!
//! An optional `config.toml` supplies default key paths so they need not be
//! typed at every prompt:
//!
//! ```toml
//! private_key = "~/.keys/lockbox.pem"
//! public_key = "~/.keys/lockbox.pub.pem"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// User settings loaded from `config.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default private key used to decrypt an encrypted store.
    #[serde(default)]
    pub private_key: Option<PathBuf>,
    /// Default public key used to encrypt on save.
    #[serde(default)]
    pub public_key: Option<PathBuf>,
}

impl Config {
    /// Default settings path (`<config dir>/lockbox/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::APP_DIR).join(constants::CONFIG_FILE))
    }

    /// Load settings.
    ///
    /// An explicitly supplied path must exist. When no path is supplied the
    /// default location is used if present, otherwise empty settings are
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// cannot be read or is not valid settings TOML.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            private_key = config.private_key.is_some(),
            public_key = config.public_key.is_some(),
            "config loaded"
        );
        Ok(config)
    }

    /// Configured private key path with `~` expanded.
    pub fn private_key(&self) -> Option<PathBuf> {
        self.private_key.as_deref().map(expand_home)
    }

    /// Configured public key path with `~` expanded.
    pub fn public_key(&self) -> Option<PathBuf> {
        self.public_key.as_deref().map(expand_home)
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
