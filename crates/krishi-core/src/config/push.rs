//! Push delivery gateway configuration.

use serde::{Deserialize, Serialize};

/// Push gateway and fan-out configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Push gateway send endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Maximum number of messages per gateway batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Per-batch request timeout in seconds. A timeout counts as a batch
    /// failure and aborts the remainder of the dispatch.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Region name treated as "broadcast to every user in the region".
    ///
    /// An alert whose location equals this value matches all users,
    /// regardless of their own location. Known limitation: exactly one
    /// region can broadcast region-wide; alerts scoped to any other region
    /// only reach users with an exact location match.
    #[serde(default = "default_broadcast_region")]
    pub broadcast_region: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            batch_size: default_batch_size(),
            request_timeout_seconds: default_request_timeout(),
            broadcast_region: default_broadcast_region(),
        }
    }
}

fn default_endpoint() -> String {
    "https://exp.host/--/api/v2/push/send".to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_request_timeout() -> u64 {
    10
}

fn default_broadcast_region() -> String {
    "Maharashtra".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PushConfig::default();
        assert_eq!(cfg.batch_size, 100);
        assert_eq!(cfg.broadcast_region, "Maharashtra");
    }
}
