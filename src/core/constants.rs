//! Constants used throughout lockbox.
//!
//! Centralizes magic strings and configuration values.

/// Application directory name under the user config dir.
pub const APP_DIR: &str = "lockbox";

/// Settings file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "LOCKBOX_LOG";

/// Permissions applied to a newly written store file (Unix only).
pub const STORE_FILE_MODE: u32 = 0o600;
