//! Configuration Module
//!
//! Construction-time parameters for a [`BoundedCache`](crate::BoundedCache).

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Default key-count threshold at which purging starts
pub const DEFAULT_MAX_KEYS: usize = 5000;

/// Default purge divisor: each purge drops one third of the keys
pub const DEFAULT_PURGE_FRACTION: usize = 3;

/// Cache configuration parameters.
///
/// Deserializable so an owning application can embed it in its own config file;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Store size at which the next write purges
    pub max_keys: usize,
    /// Divisor applied to the store size to get the number of keys purged
    pub purge_fraction: usize,
}

impl CacheConfig {
    /// Creates a config with the given threshold and the default purge fraction.
    pub fn new(max_keys: usize) -> Self {
        Self {
            max_keys,
            ..Self::default()
        }
    }

    /// Overrides the purge fraction.
    pub fn with_purge_fraction(mut self, purge_fraction: usize) -> Self {
        self.purge_fraction = purge_fraction;
        self
    }

    /// Checks that both parameters are positive.
    pub fn validate(&self) -> Result<()> {
        if self.max_keys == 0 {
            return Err(CacheError::InvalidConfig(
                "max_keys must be positive".to_string(),
            ));
        }
        if self.purge_fraction == 0 {
            return Err(CacheError::InvalidConfig(
                "purge_fraction must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_keys: DEFAULT_MAX_KEYS,
            purge_fraction: DEFAULT_PURGE_FRACTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_keys, 5000);
        assert_eq!(config.purge_fraction, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::new(9).with_purge_fraction(2);
        assert_eq!(config.max_keys, 9);
        assert_eq!(config.purge_fraction, 2);
    }

    #[test]
    fn test_config_rejects_zero_max_keys() {
        let result = CacheConfig::new(0).validate();
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_rejects_zero_fraction() {
        let result = CacheConfig::new(10).with_purge_fraction(0).validate();
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: CacheConfig = serde_json::from_str(r#"{"max_keys": 42}"#).unwrap();
        assert_eq!(config.max_keys, 42);
        assert_eq!(config.purge_fraction, DEFAULT_PURGE_FRACTION);

        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CacheConfig::default());
    }
}
