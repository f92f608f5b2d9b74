//! Policy Configuration
//!
//! Loads configuration from environment variables.

use std::env;

use anyhow::{Context, Result};

use crate::permissions::SafeMethods;

/// Policy configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Methods granted object access regardless of authorship
    /// (comma-separated, default: `GET,HEAD,OPTIONS`)
    pub safe_methods: SafeMethods,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let safe_methods = env::var("SAFE_METHODS").ok();
        let config = Self::from_values(safe_methods.as_deref())?;

        tracing::info!(safe_methods = %config.safe_methods, "Permission policy configured");

        Ok(config)
    }

    fn from_values(safe_methods: Option<&str>) -> Result<Self> {
        let safe_methods = match safe_methods {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("SAFE_METHODS is invalid: {raw:?}"))?,
            None => SafeMethods::default(),
        };

        Ok(Self { safe_methods })
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self::default()
    }
}
