//! Configuration module
//!
//! Handles CLI configuration: where the API lives and how long to wait for it.

use anyhow::Result;
use cds_client::ActionClient;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the CDS API
    pub api_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    /// Creates a configuration, `timeout_secs` in seconds
    pub fn new(api_url: String, timeout_secs: u64) -> Self {
        Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds an action client from this configuration
    pub fn client(&self) -> Result<ActionClient> {
        Ok(ActionClient::with_timeout(&self.api_url, self.timeout)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:8081".to_string(), 30)
    }
}
