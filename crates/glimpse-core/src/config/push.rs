//! Push gateway configuration.

use serde::{Deserialize, Serialize};

/// Push gateway client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Gateway batch-send endpoint URL.
    pub endpoint: String,
    /// Optional bearer access token for the gateway.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    10
}
