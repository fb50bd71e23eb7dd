//! # Runtime Configuration Module
//!
//! Environment variable configuration for the routing layer.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_APP_PATH`
//!
//! Application root that `~/` redirect targets are resolved against when the
//! `Location` header is written. Mount the service under `/shop` and a
//! redirect to `~/new/42` is sent as `/shop/new/42`.
//!
//! Default: `/`
//!
//! ## Usage
//!
//! ```rust
//! use brrtrouter_redirect::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Application path: {}", config.application_path);
//! ```

use std::env;

/// Default application root.
pub const DEFAULT_APP_PATH: &str = "/";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Application root for `~/` URLs (default: `/`)
    pub application_path: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            application_path: DEFAULT_APP_PATH.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let application_path = lookup("BRRTR_APP_PATH")
            .map(|v| normalize_app_path(&v))
            .unwrap_or_else(|| DEFAULT_APP_PATH.to_string());
        RuntimeConfig { application_path }
    }
}

/// Ensure a leading `/`; blank values fall back to `/`.
fn normalize_app_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_APP_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.application_path, "/");
    }

    #[test]
    fn test_app_path_is_normalized() {
        let config = RuntimeConfig::from_lookup(|k| {
            (k == "BRRTR_APP_PATH").then(|| " shop ".to_string())
        });
        assert_eq!(config.application_path, "/shop");

        let config = RuntimeConfig::from_lookup(|_| Some(String::new()));
        assert_eq!(config.application_path, "/");
    }
}
