//! Batched channel enrichment.
//!
//! Stage A resolves video ids to channel ids, stage B fetches channel details
//! into the shared cache. Every lookup is chunked to the API batch limit and
//! bounded by a timeout. A failed chunk is logged and leaves its ids
//! unresolved; nothing in here aborts the pipeline.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use showreel_api::traits::{VideoChannel, VideoPlatform, MAX_BATCH};
use showreel_core::cache::SharedChannelCache;
use showreel_core::format;
use showreel_core::models::{ChannelInfo, ProjectRecord};
use showreel_core::urls;

/// Why a single batch lookup produced no results.
#[derive(Debug, Error)]
pub enum ChunkError<E> {
    #[error("lookup failed: {0}")]
    Lookup(E),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Counters from one enrichment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentSummary {
    pub videos_requested: usize,
    pub videos_resolved: usize,
    pub channels_requested: usize,
    pub channels_cached: usize,
    pub failed_chunks: usize,
}

/// Drives both lookup stages against a [`VideoPlatform`].
///
/// `platform` is `None` when no API key is configured; every stage then
/// returns immediately without a request.
pub struct Enricher<P> {
    platform: Option<P>,
    cache: SharedChannelCache,
    timeout: Duration,
}

impl<P: VideoPlatform> Enricher<P> {
    pub fn new(platform: Option<P>, cache: SharedChannelCache, timeout: Duration) -> Self {
        Self {
            platform,
            cache,
            timeout,
        }
    }

    pub fn cache(&self) -> &SharedChannelCache {
        &self.cache
    }

    /// Resolve channels for all records, then fetch those channels' details.
    ///
    /// Sets `channel_id`/`channel_title` on every record whose video resolved
    /// and derives `channel_link` where the record has none.
    pub async fn enrich(&self, records: &mut [ProjectRecord]) -> EnrichmentSummary {
        let mut summary = EnrichmentSummary::default();

        let video_ids = unique(records.iter().filter_map(|r| r.video_id.as_deref()));
        summary.videos_requested = video_ids.len();

        let (resolved, failed) = self.resolve_videos(&video_ids).await;
        summary.videos_resolved = resolved.len();
        summary.failed_chunks += failed;

        for record in records.iter_mut() {
            let Some(video) = record.video_id.as_ref().and_then(|id| resolved.get(id)) else {
                continue;
            };
            record.channel_id = Some(video.channel_id.clone());
            record.channel_title = Some(video.channel_title.clone());
            if record.channel_link.is_empty() {
                record.channel_link = urls::channel_url(&video.channel_id);
            }
        }

        let channel_ids = unique(records.iter().filter_map(|r| r.channel_id.as_deref()));
        summary.channels_requested = channel_ids.len();

        let (cached, failed) = self.resolve_channels(&channel_ids).await;
        summary.channels_cached = cached;
        summary.failed_chunks += failed;

        info!(
            videos = summary.videos_resolved,
            channels = summary.channels_cached,
            failed_chunks = summary.failed_chunks,
            "Enrichment complete"
        );
        summary
    }

    /// Stage A: map video ids to their channels.
    ///
    /// Returns the merged mapping and the number of failed chunks.
    pub async fn resolve_videos(
        &self,
        video_ids: &[String],
    ) -> (HashMap<String, VideoChannel>, usize) {
        let mut resolved = HashMap::new();
        let Some(platform) = &self.platform else {
            debug!("No API key configured, skipping video lookup");
            return (resolved, 0);
        };

        let mut failed = 0;
        for (index, chunk) in video_ids.chunks(MAX_BATCH).enumerate() {
            debug!(chunk = index, size = chunk.len(), "Looking up videos");
            match self.run_chunk(platform.lookup_videos(chunk)).await {
                Ok(videos) => {
                    for video in videos {
                        resolved.insert(video.video_id.clone(), video);
                    }
                }
                Err(e) => {
                    failed += 1;
                    warn!(chunk = index, size = chunk.len(), error = %e, "Video batch lookup failed");
                }
            }
        }
        (resolved, failed)
    }

    /// Stage B: fetch details for channels not yet cached.
    ///
    /// Returns the number of channels newly cached and the number of failed
    /// chunks.
    pub async fn resolve_channels(&self, channel_ids: &[String]) -> (usize, usize) {
        let Some(platform) = &self.platform else {
            debug!("No API key configured, skipping channel lookup");
            return (0, 0);
        };

        let needed: Vec<String> = {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            channel_ids
                .iter()
                .filter(|id| !cache.contains_channel(id))
                .cloned()
                .collect()
        };
        if needed.is_empty() {
            return (0, 0);
        }

        let (mut cached, mut failed) = (0, 0);
        for (index, chunk) in needed.chunks(MAX_BATCH).enumerate() {
            debug!(chunk = index, size = chunk.len(), "Looking up channels");
            match self.run_chunk(platform.lookup_channels(chunk)).await {
                Ok(channels) => {
                    let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
                    for channel in channels {
                        let info = ChannelInfo {
                            title: channel.title,
                            avatar_url: channel.avatar_url,
                            subscriber_count: format::subscribers(channel.subscriber_count),
                        };
                        if cache.insert(&channel.channel_id, info) {
                            cached += 1;
                        }
                    }
                }
                Err(e) => {
                    failed += 1;
                    warn!(chunk = index, size = chunk.len(), error = %e, "Channel batch lookup failed");
                }
            }
        }
        (cached, failed)
    }

    async fn run_chunk<T, E>(
        &self,
        lookup: impl Future<Output = Result<T, E>>,
    ) -> Result<T, ChunkError<E>> {
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(result) => result.map_err(ChunkError::Lookup),
            Err(_) => Err(ChunkError::Timeout(self.timeout)),
        }
    }
}

/// Distinct non-empty values, first occurrence order.
fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use showreel_api::traits::ChannelDetails;
    use showreel_core::cache::shared_channel_cache;
    use showreel_core::models::ProjectType;
    use showreel_core::video_id;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct FakeError;

    /// In-memory platform: every video `v<n>` belongs to channel `UC<n % channels>`.
    #[derive(Default)]
    struct FakePlatform {
        channels: usize,
        fail_video_chunks: HashSet<usize>,
        stall_channels: bool,
        video_calls: Mutex<Vec<Vec<String>>>,
        channel_calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakePlatform {
        fn new(channels: usize) -> Self {
            Self {
                channels,
                ..Default::default()
            }
        }

        fn channel_for(&self, video_id: &str) -> String {
            let n: usize = video_id
                .trim_start_matches('v')
                .trim_start_matches('0')
                .parse()
                .unwrap_or(0);
            format!("UC{}", n % self.channels)
        }

        fn video_batches(&self) -> Vec<Vec<String>> {
            self.video_calls.lock().unwrap().clone()
        }

        fn channel_batches(&self) -> Vec<Vec<String>> {
            self.channel_calls.lock().unwrap().clone()
        }
    }

    impl VideoPlatform for FakePlatform {
        type Error = FakeError;

        async fn lookup_videos(&self, video_ids: &[String]) -> Result<Vec<VideoChannel>, FakeError> {
            let call = {
                let mut calls = self.video_calls.lock().unwrap();
                calls.push(video_ids.to_vec());
                calls.len() - 1
            };
            if self.fail_video_chunks.contains(&call) {
                return Err(FakeError);
            }
            Ok(video_ids
                .iter()
                .map(|id| {
                    let channel_id = self.channel_for(id);
                    VideoChannel {
                        video_id: id.clone(),
                        channel_title: format!("{channel_id} title"),
                        channel_id,
                    }
                })
                .collect())
        }

        async fn lookup_channels(
            &self,
            channel_ids: &[String],
        ) -> Result<Vec<ChannelDetails>, FakeError> {
            self.channel_calls.lock().unwrap().push(channel_ids.to_vec());
            if self.stall_channels {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Ok(channel_ids
                .iter()
                .map(|id| ChannelDetails {
                    channel_id: id.clone(),
                    title: format!("{id} details"),
                    avatar_url: format!("https://yt3.ggpht.com/{id}.jpg"),
                    subscriber_count: Some(1500),
                })
                .collect())
        }
    }

    fn video_ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("v{i:010}")).collect()
    }

    fn video_record(id: &str) -> ProjectRecord {
        ProjectRecord {
            video_link: format!("https://youtu.be/{id}"),
            thumb_link: String::new(),
            project_type: ProjectType::Video,
            video_id: video_id::extract(&format!("https://youtu.be/{id}")),
            channel_id: None,
            channel_link: String::new(),
            channel_title: None,
        }
    }

    fn enricher(platform: Option<FakePlatform>) -> Enricher<FakePlatform> {
        Enricher::new(platform, shared_channel_cache(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_video_lookups_are_chunked() {
        let e = enricher(Some(FakePlatform::new(3)));
        let (resolved, failed) = e.resolve_videos(&video_ids(120)).await;
        assert_eq!(resolved.len(), 120);
        assert_eq!(failed, 0);

        let sizes: Vec<usize> = e
            .platform
            .as_ref()
            .unwrap()
            .video_batches()
            .iter()
            .map(Vec::len)
            .collect();
        assert_eq!(sizes, vec![50, 50, 20]);
    }

    #[tokio::test]
    async fn test_failed_chunk_does_not_abort_stage() {
        let mut platform = FakePlatform::new(3);
        platform.fail_video_chunks.insert(0);
        let e = enricher(Some(platform));

        let ids = video_ids(60);
        let (resolved, failed) = e.resolve_videos(&ids).await;
        assert_eq!(failed, 1);
        assert_eq!(resolved.len(), 10);
        assert!(!resolved.contains_key(&ids[0]));
        assert!(resolved.contains_key(&ids[55]));
    }

    #[tokio::test]
    async fn test_no_platform_short_circuits() {
        let e = enricher(None);
        let (resolved, failed) = e.resolve_videos(&video_ids(5)).await;
        assert!(resolved.is_empty());
        assert_eq!(failed, 0);
        assert_eq!(e.resolve_channels(&["UC1".to_string()]).await, (0, 0));
    }

    #[tokio::test]
    async fn test_empty_input_issues_no_request() {
        let e = enricher(Some(FakePlatform::new(1)));
        let (resolved, _) = e.resolve_videos(&[]).await;
        assert!(resolved.is_empty());
        assert_eq!(e.resolve_channels(&[]).await, (0, 0));

        let platform = e.platform.as_ref().unwrap();
        assert!(platform.video_batches().is_empty());
        assert!(platform.channel_batches().is_empty());
    }

    #[tokio::test]
    async fn test_channels_are_dual_keyed_and_formatted() {
        let e = enricher(Some(FakePlatform::new(1)));
        let (cached, failed) = e.resolve_channels(&["UC0".to_string()]).await;
        assert_eq!((cached, failed), (1, 0));

        let cache = e.cache().read().unwrap();
        let by_id = cache.get("UC0").unwrap();
        assert_eq!(by_id.subscriber_count, "1.5K");
        assert_eq!(
            cache.get("https://www.youtube.com/channel/UC0").unwrap(),
            by_id
        );
    }

    #[tokio::test]
    async fn test_cached_channels_are_not_requested_again() {
        let e = enricher(Some(FakePlatform::new(1)));
        e.cache().write().unwrap().insert(
            "UC0",
            ChannelInfo {
                title: "Already here".into(),
                avatar_url: String::new(),
                subscriber_count: "0".into(),
            },
        );

        let ids: Vec<String> = (0..55).map(|i| format!("UC{i}")).collect();
        let (cached, _) = e.resolve_channels(&ids).await;
        assert_eq!(cached, 54);

        let batches = e.platform.as_ref().unwrap().channel_batches();
        assert_eq!(batches.iter().map(Vec::len).collect::<Vec<_>>(), vec![50, 4]);
        assert!(batches.iter().flatten().all(|id| id != "UC0"));
        assert_eq!(e.cache().read().unwrap().get("UC0").unwrap().title, "Already here");

        // A second pass finds everything cached and issues nothing.
        assert_eq!(e.resolve_channels(&ids).await, (0, 0));
        assert_eq!(e.platform.as_ref().unwrap().channel_batches().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_chunk_times_out() {
        let mut platform = FakePlatform::new(1);
        platform.stall_channels = true;
        let e = Enricher::new(Some(platform), shared_channel_cache(), Duration::from_secs(10));

        let (cached, failed) = e.resolve_channels(&["UC0".to_string()]).await;
        assert_eq!((cached, failed), (0, 1));
        assert!(e.cache().read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enrich_assigns_channels_and_dedupes() {
        let e = enricher(Some(FakePlatform::new(2)));
        let mut records = vec![
            video_record("v0000000001"),
            video_record("v0000000002"),
            video_record("v0000000001"),
            ProjectRecord {
                video_link: String::new(),
                thumb_link: "https://i.imgur.com/t.png".into(),
                project_type: ProjectType::Thumbnail,
                video_id: None,
                channel_id: None,
                channel_link: String::new(),
                channel_title: None,
            },
        ];

        let summary = e.enrich(&mut records).await;
        assert_eq!(summary.videos_requested, 2);
        assert_eq!(summary.videos_resolved, 2);
        assert_eq!(summary.channels_requested, 2);
        assert_eq!(summary.channels_cached, 2);

        assert_eq!(records[0].channel_id.as_deref(), Some("UC1"));
        assert_eq!(records[0].channel_title.as_deref(), Some("UC1 title"));
        assert_eq!(records[0].channel_link, "https://www.youtube.com/channel/UC1");
        assert_eq!(records[1].channel_id.as_deref(), Some("UC0"));
        assert_eq!(records[2].channel_id, records[0].channel_id);
        assert!(records[3].channel_id.is_none());
        assert!(records[3].channel_link.is_empty());

        let platform = e.platform.as_ref().unwrap();
        let expected = vec!["v0000000001".to_string(), "v0000000002".to_string()];
        assert_eq!(platform.video_batches(), vec![expected]);
        assert_eq!(platform.channel_batches().len(), 1);
    }

    #[tokio::test]
    async fn test_enrich_survives_stage_a_failure() {
        let mut platform = FakePlatform::new(1);
        platform.fail_video_chunks.insert(0);
        let e = enricher(Some(platform));
        let mut records = vec![video_record("v0000000001")];

        let summary = e.enrich(&mut records).await;
        assert_eq!(summary.failed_chunks, 1);
        assert!(records[0].channel_id.is_none());
        assert!(e.platform.as_ref().unwrap().channel_batches().is_empty());
    }

    #[test]
    fn test_unique_keeps_first_occurrence() {
        let ids = unique(["b", "a", "", "b", "c", "a"].into_iter());
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
