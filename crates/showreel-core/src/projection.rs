//! Read-time projection of records plus cached channel data into
//! display-ready cards, and the activation contract for those cards.

use serde::{Deserialize, Serialize};

use crate::cache::ChannelCache;
use crate::models::{ProjectRecord, ProjectType};
use crate::{urls, video_id};

/// Gallery filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Video,
    Shorts,
    Thumbnail,
}

impl Category {
    pub const ALL: &[Category] = &[Self::All, Self::Video, Self::Shorts, Self::Thumbnail];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Video => "video",
            Self::Shorts => "shorts",
            Self::Thumbnail => "thumbnail",
        }
    }

    pub fn matches(&self, project_type: ProjectType) -> bool {
        match self {
            Self::All => true,
            Self::Video => project_type == ProjectType::Video,
            Self::Shorts => project_type == ProjectType::Shorts,
            Self::Thumbnail => project_type == ProjectType::Thumbnail,
        }
    }

    /// Grid layout hint (`mode-shorts`, ...); `None` for the mixed view.
    pub fn layout_mode(&self) -> Option<String> {
        match self {
            Self::All => None,
            other => Some(format!("mode-{}", other.as_str())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category {0:?} (expected all, video, shorts or thumbnail)")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Where a card's channel data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelSource {
    /// Full channel details from the cache.
    Cache,
    /// Only the title reported alongside the video.
    Provisional,
    Unknown,
}

/// Channel data as a card shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelDisplay {
    pub title: String,
    pub avatar_url: String,
    /// Formatted count ("1.2M"), empty when unknown.
    pub subscribers: String,
    pub source: ChannelSource,
}

impl ChannelDisplay {
    fn unknown() -> Self {
        Self {
            title: "Unknown".into(),
            avatar_url: urls::PLACEHOLDER_AVATAR.into(),
            subscribers: String::new(),
            source: ChannelSource::Unknown,
        }
    }

    /// Caption line under the channel name, e.g. "1.2M Subs".
    pub fn subscriber_text(&self) -> Option<String> {
        (!self.subscribers.is_empty()).then(|| format!("{} Subs", self.subscribers))
    }
}

/// A record combined with the channel data available at projection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    #[serde(flatten)]
    pub record: ProjectRecord,
    /// `None` means the presentation layer shows [`urls::PLACEHOLDER_IMAGE`].
    pub thumbnail: Option<String>,
    /// Video and shorts cards get a play overlay.
    pub playable: bool,
    pub channel: ChannelDisplay,
}

/// The records visible under `category`, in their original order.
pub fn filter(
    records: &[ProjectRecord],
    category: Category,
    cache: &ChannelCache,
) -> Vec<DisplayRecord> {
    records
        .iter()
        .filter(|r| category.matches(r.project_type))
        .map(|r| project(r, cache))
        .collect()
}

pub fn project(record: &ProjectRecord, cache: &ChannelCache) -> DisplayRecord {
    DisplayRecord {
        thumbnail: resolve_thumbnail(record),
        playable: record.project_type.is_playable(),
        channel: resolve_channel(record, cache),
        record: record.clone(),
    }
}

/// Explicit thumbnail, else the platform thumbnail for the video, else none.
pub fn resolve_thumbnail(record: &ProjectRecord) -> Option<String> {
    if !record.thumb_link.is_empty() {
        return Some(record.thumb_link.clone());
    }
    record.video_id.as_deref().map(urls::thumbnail_url)
}

/// Channel data by priority: cache by id, cache by profile link, provisional
/// title, then the "Unknown" placeholder.
pub fn resolve_channel(record: &ProjectRecord, cache: &ChannelCache) -> ChannelDisplay {
    let cached = record
        .channel_id
        .as_deref()
        .and_then(|id| cache.get(id))
        .or_else(|| {
            Some(record.channel_link.as_str())
                .filter(|link| !link.is_empty())
                .and_then(|link| cache.get(link))
        });

    if let Some(info) = cached {
        return ChannelDisplay {
            title: info.title.clone(),
            avatar_url: info.avatar_url.clone(),
            subscribers: info.subscriber_count.clone(),
            source: ChannelSource::Cache,
        };
    }

    match record.channel_title.as_deref() {
        Some(title) if !title.is_empty() => ChannelDisplay {
            title: title.to_string(),
            source: ChannelSource::Provisional,
            ..ChannelDisplay::unknown()
        },
        _ => ChannelDisplay::unknown(),
    }
}

/// What activating a card opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Full-size image view.
    Image,
    /// Embedded player.
    Video,
    /// The link could not be embedded; open it as-is.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickAction {
    pub kind: ActionKind,
    pub target: String,
}

/// Resolve what a card opens when activated.
///
/// Thumbnails always open the image view. Videos and shorts re-extract the
/// id from the stored link and open the embedded player, or the raw link if
/// extraction fails.
pub fn resolve_click_action(record: &ProjectRecord) -> ClickAction {
    match record.project_type {
        ProjectType::Thumbnail => image_action(record),
        ProjectType::Video | ProjectType::Shorts => {
            if record.video_link.is_empty() {
                return image_action(record);
            }
            match video_id::extract(&record.video_link) {
                Some(id) => ClickAction {
                    kind: ActionKind::Video,
                    target: urls::embed_url(&id),
                },
                None => ClickAction {
                    kind: ActionKind::External,
                    target: record.video_link.clone(),
                },
            }
        }
    }
}

fn image_action(record: &ProjectRecord) -> ClickAction {
    ClickAction {
        kind: ActionKind::Image,
        target: resolve_thumbnail(record).unwrap_or_else(|| urls::PLACEHOLDER_IMAGE.into()),
    }
}
