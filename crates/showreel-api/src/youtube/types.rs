use serde::Deserialize;

use crate::traits::{ChannelDetails, VideoChannel};

// ── videos?part=snippet ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
}

// ── channels?part=snippet,statistics ────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub thumbnails: ChannelThumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelThumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    /// The API reports counts as strings.
    pub subscriber_count: Option<String>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
}

// ── Conversions to shared trait types ───────────────────────────

impl VideoItem {
    pub fn into_video_channel(self) -> Option<VideoChannel> {
        let snippet = self.snippet?;
        Some(VideoChannel {
            video_id: self.id,
            channel_id: snippet.channel_id,
            channel_title: snippet.channel_title,
        })
    }
}

impl ChannelItem {
    pub fn into_channel_details(self) -> Option<ChannelDetails> {
        let snippet = self.snippet?;
        let thumbs = snippet.thumbnails;
        let avatar_url = thumbs
            .default
            .or(thumbs.medium)
            .or(thumbs.high)
            .map(|t| t.url)
            .unwrap_or_default();
        let subscriber_count = self
            .statistics
            .filter(|s| !s.hidden_subscriber_count)
            .and_then(|s| s.subscriber_count)
            .and_then(|s| s.trim().parse().ok());
        Some(ChannelDetails {
            channel_id: self.id,
            title: snippet.title,
            avatar_url,
            subscriber_count,
        })
    }
}
