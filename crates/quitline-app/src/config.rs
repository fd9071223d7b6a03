//! Engine configuration

use serde::{Deserialize, Serialize};

/// Configuration errors detected at engine construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The confirmation timeout must be nonzero.
    #[error("confirmation timeout must be nonzero")]
    ZeroTimeout,
}

/// Reconciliation engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How long to wait for a confirmation before giving up on the
    /// optimistic entry, in milliseconds.
    pub confirmation_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout_ms: 30_000,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.confirmation_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.confirmation_timeout_ms, 30_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = EngineConfig {
            confirmation_timeout_ms: 0,
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }
}
