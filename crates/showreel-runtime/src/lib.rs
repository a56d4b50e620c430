//! The gallery service: loads the sheet, normalizes and enriches it, and
//! serves filtered projections to the presentation layer.

pub mod enrich;

use std::sync::RwLock;

use tracing::{error, info};

use showreel_api::sheet::SheetClient;
use showreel_api::traits::{SheetSource, VideoPlatform};
use showreel_api::youtube::YouTubeClient;
use showreel_core::cache::{shared_channel_cache, SharedChannelCache};
use showreel_core::config::AppConfig;
use showreel_core::models::ProjectRecord;
use showreel_core::normalize;
use showreel_core::projection::{self, Category, ClickAction, DisplayRecord};
use showreel_core::sheet;

pub use enrich::{ChunkError, Enricher, EnrichmentSummary};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("failed to load sheet: {0}")]
    SourceFetch(String),
    #[error("the sheet has no project rows")]
    EmptySource,
}

impl RuntimeError {
    /// The static message shown in place of the gallery.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Please configure the sheet URL in config.toml",
            Self::SourceFetch(_) => "Failed to connect to spreadsheet.",
            Self::EmptySource => "CSV is empty or could not be read.",
        }
    }
}

/// Owns the loaded records and the channel cache for one session.
///
/// Enrichment is the only writer of the cache; projections read it.
pub struct Runtime<S, P> {
    config: AppConfig,
    sheet: S,
    enricher: Enricher<P>,
    records: RwLock<Vec<ProjectRecord>>,
}

/// Runtime backed by the real HTTP clients.
pub type HttpRuntime = Runtime<SheetClient, YouTubeClient>;

impl HttpRuntime {
    /// Build a runtime with the real HTTP clients.
    ///
    /// Without an API key the gallery still loads, just without channel data.
    pub fn from_config(config: AppConfig) -> Self {
        let platform = config.api_key().map(|key| YouTubeClient::new(key.to_string()));
        if platform.is_none() {
            tracing::warn!("No YouTube API key configured, channel data will be unavailable");
        }
        Self::new(config, SheetClient::new(), platform)
    }
}

impl<S: SheetSource, P: VideoPlatform> Runtime<S, P> {
    pub fn new(config: AppConfig, sheet: S, platform: Option<P>) -> Self {
        let timeout = config.request_timeout();
        Self {
            config,
            sheet,
            enricher: Enricher::new(platform, shared_channel_cache(), timeout),
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cache(&self) -> &SharedChannelCache {
        self.enricher.cache()
    }

    /// Fetch, normalize and enrich the sheet.
    ///
    /// Replaces the previously loaded records wholesale. The channel cache
    /// persists across reloads.
    pub async fn load_and_process(&self) -> Result<Vec<ProjectRecord>, RuntimeError> {
        let url = self
            .config
            .sheet_url()
            .map_err(|e| RuntimeError::Config(e.to_string()))?
            .ok_or_else(|| {
                error!("Sheet CSV URL not set");
                RuntimeError::Config("sheet CSV URL not set".into())
            })?;

        let text = self.sheet.fetch_csv(url).await.map_err(|e| {
            error!(error = %e, "Sheet fetch failed");
            RuntimeError::SourceFetch(e.to_string())
        })?;

        let rows = sheet::parse_csv(&text).map_err(|e| {
            error!(error = %e, "Sheet CSV parse failed");
            RuntimeError::SourceFetch(e.to_string())
        })?;
        if rows.is_empty() {
            return Err(RuntimeError::EmptySource);
        }

        let mut records = normalize::normalize(&rows);
        info!(rows = rows.len(), records = records.len(), "Sheet normalized");

        self.enricher.enrich(&mut records).await;

        *self.records.write().unwrap_or_else(|e| e.into_inner()) = records.clone();
        Ok(records)
    }

    /// Snapshot of the currently loaded records.
    pub fn records(&self) -> Vec<ProjectRecord> {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Project `records` under `category` against the cache as it is now.
    pub fn filter(&self, records: &[ProjectRecord], category: Category) -> Vec<DisplayRecord> {
        let cache = self.cache().read().unwrap_or_else(|e| e.into_inner());
        projection::filter(records, category, &cache)
    }

    pub fn resolve_click_action(&self, record: &ProjectRecord) -> ClickAction {
        projection::resolve_click_action(record)
    }
}
