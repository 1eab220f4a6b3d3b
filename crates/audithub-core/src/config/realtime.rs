//! Real-time broadcast engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time change broadcast configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Internal buffer size for per-audit broadcast channels. Slow
    /// subscribers that lag more than this many events miss the older
    /// ones, which is acceptable since events carry no payload.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}
