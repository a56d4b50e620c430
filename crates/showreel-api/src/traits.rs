//! Trait definitions for the external collaborators.
//!
//! The runtime is generic over these so the enrichment pipeline can be
//! driven by the real HTTP clients or by in-memory fakes.

use std::future::Future;

/// Maximum number of ids the platform accepts in one batch lookup.
pub const MAX_BATCH: usize = 50;

/// Batched metadata lookups against the video platform.
pub trait VideoPlatform: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve up to [`MAX_BATCH`] video ids to their channels.
    ///
    /// Unknown or private videos are simply absent from the result.
    fn lookup_videos(
        &self,
        video_ids: &[String],
    ) -> impl Future<Output = Result<Vec<VideoChannel>, Self::Error>> + Send;

    /// Fetch details for up to [`MAX_BATCH`] channel ids.
    fn lookup_channels(
        &self,
        channel_ids: &[String],
    ) -> impl Future<Output = Result<Vec<ChannelDetails>, Self::Error>> + Send;
}

/// Source of the published project sheet.
pub trait SheetSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the sheet as CSV text.
    fn fetch_csv(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// The channel a video belongs to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoChannel {
    pub video_id: String,
    pub channel_id: String,
    pub channel_title: String,
}

/// Raw channel details, before display formatting.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChannelDetails {
    pub channel_id: String,
    pub title: String,
    pub avatar_url: String,
    /// Absent when the channel hides its count.
    pub subscriber_count: Option<u64>,
}
