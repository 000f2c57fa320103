//! Moment-window dispatcher configuration.

use serde::{Deserialize, Serialize};

/// Dispatcher batch and claim settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Maximum number of due windows fetched per invocation.
    #[serde(default = "default_batch_size")]
    pub batch_size: i64,
    /// Seconds after which an unfinished claim is returned to `pending`.
    #[serde(default = "default_claim_lease")]
    pub claim_lease_seconds: i64,
    /// Whether the built-in interval trigger is enabled.
    ///
    /// Deployments driven by an external scheduler (the normal case)
    /// leave this off and invoke `POST /api/dispatch/run` instead.
    #[serde(default)]
    pub poll_enabled: bool,
    /// Interval in seconds between built-in trigger passes.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            claim_lease_seconds: default_claim_lease(),
            poll_enabled: false,
            poll_interval_seconds: default_poll_interval(),
        }
    }
}

fn default_batch_size() -> i64 {
    100
}

fn default_claim_lease() -> i64 {
    300
}

fn default_poll_interval() -> u64 {
    60
}
