//! Session configuration loaded from TOML.

use crate::search::{DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH, SearchLimits};
use crate::types::Side;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for a game session.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_setters::Setters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Engine search depth in plies.
    search_depth: u32,

    /// Forbid simple moves while any capture is available.
    must_capture: bool,

    /// Side that moves first.
    first_side: Side,

    /// Side the engine plays; `None` for two human players.
    engine_side: Option<Side>,

    /// Search root moves on the rayon pool.
    parallel_search: bool,

    /// Full turns after which the game is drawn.
    max_turns: Option<u32>,

    /// Optional cap on nodes visited per engine search.
    node_budget: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            must_capture: true,
            first_side: Side::Red,
            engine_side: Some(Side::Black),
            parallel_search: false,
            max_turns: None,
            node_budget: None,
        }
    }
}

impl SessionConfig {
    /// Configuration for two human players.
    pub fn two_player() -> Self {
        Self::default().with_engine_side(None)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(
            depth = config.search_depth,
            engine_side = ?config.engine_side,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the search depth is within `1..=MAX_SEARCH_DEPTH`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = MAX_SEARCH_DEPTH.unsigned_abs();
        if self.search_depth == 0 || self.search_depth > max {
            return Err(ConfigError::new(format!(
                "search_depth must be between 1 and {}, got {}",
                max, self.search_depth
            )));
        }
        Ok(())
    }

    /// Search limits derived from this configuration.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits::default()
            .with_must_capture(self.must_capture)
            .with_node_budget(self.node_budget)
            .with_parallel(self.parallel_search)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(*config.search_depth(), 3);
        assert_eq!(*config.engine_side(), Some(Side::Black));
    }

    #[test]
    fn test_overrides() {
        let config = SessionConfig::from_toml_str(
            "search_depth = 5\nfirst_side = \"Black\"\nmax_turns = 40\nmust_capture = false\n",
        )
        .unwrap();
        assert_eq!(*config.search_depth(), 5);
        assert_eq!(*config.first_side(), Side::Black);
        assert_eq!(*config.max_turns(), Some(40));
        assert!(!config.search_limits().must_capture);
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = SessionConfig::from_toml_str("depth = 2").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_rejects_depth_out_of_range() {
        assert!(SessionConfig::from_toml_str("search_depth = 0").is_err());
        assert!(SessionConfig::from_toml_str("search_depth = 11").is_err());
        assert!(SessionConfig::from_toml_str("search_depth = 10").is_ok());
    }

    #[test]
    fn test_error_records_location() {
        let err = SessionConfig::default()
            .with_search_depth(0)
            .validate()
            .unwrap_err();
        assert!(err.file.ends_with("config.rs"));
        assert!(err.line > 0);
    }
}
