//! Session retention configuration

use serde::Deserialize;
use std::time::Duration;

use crate::application::handlers::session::IdleSweepConfig;

use super::error::ValidationError;

/// Longest idle lifetime accepted for a session (one week).
const MAX_IDLE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// How long abandoned sessions are kept and how often they are swept.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Sessions untouched for this many seconds are evicted
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_secs: u64,

    /// Seconds between eviction sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    pub fn sweep_config(&self) -> IdleSweepConfig {
        IdleSweepConfig {
            idle_ttl: Duration::from_secs(self.idle_ttl_secs),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
        }
    }

    /// Validate session retention settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.idle_ttl_secs == 0 || self.idle_ttl_secs > MAX_IDLE_TTL_SECS {
            return Err(ValidationError::InvalidSessionRetention("idle_ttl_secs"));
        }
        if self.sweep_interval_secs == 0 || self.sweep_interval_secs > self.idle_ttl_secs {
            return Err(ValidationError::InvalidSessionRetention("sweep_interval_secs"));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: default_idle_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_idle_ttl() -> u64 {
    60 * 60
}

fn default_sweep_interval() -> u64 {
    60
}
