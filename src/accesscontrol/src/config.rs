//! Scope syntax configuration

use crate::error::{AccessControlError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default segment delimiter for scopes (`datasources:uid:123`)
pub const DEFAULT_DELIMITER: char = ':';

/// Default wildcard token (`datasources:*`)
pub const DEFAULT_WILDCARD: &str = "*";

/// Path syntax used to build and query a trie
///
/// Carried by every [`Trie`](crate::trie::Trie) so that queries split
/// scopes the same way the builder did.
///
/// ```toml
/// delimiter = ":"
/// wildcard = "*"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrieConfig {
    /// Character separating scope segments
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Segment that grants everything at and below its position
    #[serde(default = "default_wildcard")]
    pub wildcard: String,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_wildcard() -> String {
    DEFAULT_WILDCARD.to_string()
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            wildcard: DEFAULT_WILDCARD.to_string(),
        }
    }
}

impl TrieConfig {
    /// Create a config with a custom delimiter and the default wildcard
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    /// Parse and validate a config from TOML
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.wildcard.is_empty() {
            return Err(AccessControlError::InvalidConfig(
                "wildcard cannot be empty".to_string(),
            ));
        }

        if self.wildcard.contains(self.delimiter) {
            return Err(AccessControlError::InvalidConfig(format!(
                "wildcard '{}' cannot contain the delimiter '{}'",
                self.wildcard, self.delimiter
            )));
        }

        Ok(())
    }
}
