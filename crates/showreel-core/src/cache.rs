use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::models::ChannelInfo;
use crate::urls;

/// Session-wide channel metadata, keyed by channel id and by profile URL.
///
/// Append-only: entries are never replaced or evicted. Both keys of a channel
/// are written by the same `insert` call, so a reader holding the lock sees
/// either both or neither.
#[derive(Debug, Default)]
pub struct ChannelCache {
    entries: HashMap<String, ChannelInfo>,
    channels: usize,
}

impl ChannelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a channel under its bare id and its profile URL.
    ///
    /// Returns `false` if the channel was already cached.
    pub fn insert(&mut self, channel_id: &str, info: ChannelInfo) -> bool {
        if self.contains_channel(channel_id) {
            return false;
        }
        self.entries.insert(urls::channel_url(channel_id), info.clone());
        self.entries.insert(channel_id.to_string(), info);
        self.channels += 1;
        true
    }

    /// Look up by channel id or profile URL.
    pub fn get(&self, key: &str) -> Option<&ChannelInfo> {
        self.entries.get(key)
    }

    /// Whether the channel is cached under either of its keys.
    pub fn contains_channel(&self, channel_id: &str) -> bool {
        self.entries.contains_key(channel_id)
            || self.entries.contains_key(&urls::channel_url(channel_id))
    }

    /// Number of distinct channels.
    pub fn len(&self) -> usize {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.channels == 0
    }
}

/// Handle to the cache: written by enrichment, read by projection.
pub type SharedChannelCache = Arc<RwLock<ChannelCache>>;

pub fn shared_channel_cache() -> SharedChannelCache {
    Arc::new(RwLock::new(ChannelCache::new()))
}
