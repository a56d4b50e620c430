use reqwest::Client;

use super::error::YouTubeError;
use super::types::{ChannelItem, ChannelListResponse, VideoItem, VideoListResponse};
use crate::traits::{ChannelDetails, VideoChannel, VideoPlatform, MAX_BATCH};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube Data API v3 client (API-key authenticated, read-only).
pub struct YouTubeClient {
    api_key: String,
    http: Client,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, YouTubeError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "YouTube API error");
            Err(YouTubeError::Api {
                status,
                message: body,
            })
        }
    }

    fn check_batch(ids: &[String]) -> Result<String, YouTubeError> {
        if ids.len() > MAX_BATCH {
            return Err(YouTubeError::BatchTooLarge(ids.len()));
        }
        Ok(ids.join(","))
    }
}

impl VideoPlatform for YouTubeClient {
    type Error = YouTubeError;

    async fn lookup_videos(&self, video_ids: &[String]) -> Result<Vec<VideoChannel>, YouTubeError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = Self::check_batch(video_ids)?;

        let resp = self
            .http
            .get(format!("{BASE_URL}/videos"))
            .query(&[
                ("part", "snippet"),
                ("id", ids.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let list: VideoListResponse = resp
            .json()
            .await
            .map_err(|e| YouTubeError::Parse(e.to_string()))?;

        Ok(list
            .items
            .into_iter()
            .filter_map(VideoItem::into_video_channel)
            .collect())
    }

    async fn lookup_channels(
        &self,
        channel_ids: &[String],
    ) -> Result<Vec<ChannelDetails>, YouTubeError> {
        if channel_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = Self::check_batch(channel_ids)?;

        let resp = self
            .http
            .get(format!("{BASE_URL}/channels"))
            .query(&[
                ("part", "snippet,statistics"),
                ("id", ids.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let list: ChannelListResponse = resp
            .json()
            .await
            .map_err(|e| YouTubeError::Parse(e.to_string()))?;

        Ok(list
            .items
            .into_iter()
            .filter_map(ChannelItem::into_channel_details)
            .collect())
    }
}
