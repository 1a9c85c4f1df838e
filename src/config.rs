//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Path to a CMU-format pronunciation dictionary
    pub dictionary_path: Option<PathBuf>,
    /// Entries kept by each per-worker memo
    pub cache_capacity: usize,
    /// Worker threads for batch runs (`None` lets rayon decide)
    pub threads: Option<usize>,
    /// Remove every remaining `[...]` annotation from sanitized lyrics
    pub strip_all_annotations: bool,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            dictionary_path: None,
            cache_capacity: constants::cache::DEFAULT_CAPACITY,
            threads: None,
            strip_all_annotations: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        // Dictionary path: env var override, or the platform data directory
        config.dictionary_path = env::var("LYRICSCOPE_DICTIONARY").ok().map_or_else(
            || {
                dirs::data_dir()
                    .map(|d| d.join("lyricscope").join("cmudict.dict"))
                    .filter(|p| p.is_file())
            },
            |path| Some(PathBuf::from(shellexpand::tilde(&path).to_string())),
        );

        if let Some(capacity) = parse_var::<usize>("LYRICSCOPE_CACHE_CAPACITY") {
            if capacity == 0 {
                return Err(Error::config(
                    "cache capacity must be positive",
                    "Set LYRICSCOPE_CACHE_CAPACITY to 1 or more",
                ));
            }
            config.cache_capacity = capacity;
        }

        config.threads = parse_var::<usize>("LYRICSCOPE_THREADS").filter(|&n| n > 0);

        if let Ok(flag) = env::var("LYRICSCOPE_STRIP_ALL_ANNOTATIONS") {
            config.strip_all_annotations = parse_flag(&flag);
        }

        Ok(config)
    }

    /// Require a dictionary path, with guidance when it is missing
    pub fn require_dictionary_path(&self) -> Result<&PathBuf> {
        self.dictionary_path.as_ref().ok_or_else(|| {
            Error::config(
                "no pronunciation dictionary configured",
                "Set LYRICSCOPE_DICTIONARY to a CMU dictionary file",
            )
        })
    }
}

/// Parse a numeric environment variable, keeping the default on bad input
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {name}={raw:?}: not a valid number");
            None
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn default_config_uses_constants() {
        let config = Config::default();
        assert_eq!(config.cache_capacity, constants::cache::DEFAULT_CAPACITY);
        assert_eq!(config.app_name(), "lyricscope");
        assert!(!config.strip_all_annotations);
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nah"));
    }

    #[test]
    fn missing_dictionary_path_is_a_config_error() {
        let config = Config::default();
        let err = config.require_dictionary_path().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
