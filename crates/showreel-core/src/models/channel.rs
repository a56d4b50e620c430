use serde::{Deserialize, Serialize};

/// Display metadata for a channel, as fetched from the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub title: String,
    pub avatar_url: String,
    /// Human-formatted, e.g. "1.2M".
    pub subscriber_count: String,
}
