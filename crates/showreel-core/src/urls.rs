//! URLs derived from platform identifiers, plus the placeholder images the
//! presentation layer falls back to.

pub const PLATFORM_BASE: &str = "https://www.youtube.com";
pub const IMAGE_BASE: &str = "https://img.youtube.com";

/// Avatar shown when no channel data could be resolved.
pub const PLACEHOLDER_AVATAR: &str = "https://cdn-icons-png.flaticon.com/512/847/847969.png";

/// Image shown when a card has neither an explicit nor a derived thumbnail.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400/000/FFF?text=No+Image";

/// Canonical channel profile URL.
pub fn channel_url(channel_id: &str) -> String {
    format!("{PLATFORM_BASE}/channel/{channel_id}")
}

/// Platform-standard full resolution thumbnail for a video.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("{IMAGE_BASE}/vi/{video_id}/maxresdefault.jpg")
}

/// Embeddable player URL, autoplaying.
pub fn embed_url(video_id: &str) -> String {
    format!("{PLATFORM_BASE}/embed/{video_id}?autoplay=1")
}
