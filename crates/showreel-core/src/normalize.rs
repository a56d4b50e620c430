//! Record normalization: loosely-structured sheet rows into canonical
//! [`ProjectRecord`]s.
//!
//! Column names are matched case- and whitespace-insensitively against a
//! small alias table. Anything the sheet leaves out is inferred:
//!
//! 1. A shorts link stands in for a missing video link.
//! 2. The thumbnail falls back to any column whose name mentions "thumbnail".
//! 3. The type is inferred from which links are present when not given.
//!
//! Rows with neither a video nor a thumbnail link are dropped.

use tracing::{debug, warn};

use crate::models::{ProjectRecord, ProjectType};
use crate::video_id;

const VIDEO_ALIASES: &[&str] = &["video_link", "videolink", "video link"];
const SHORTS_ALIASES: &[&str] = &["shorts_link", "shortslink", "shorts link"];
const THUMB_ALIASES: &[&str] = &["thumbnail_link", "thumbnaillink", "thumbnail link"];
const TYPE_COLUMN: &str = "type";

/// A sheet row keyed by normalized (trimmed, lowercased) column name.
///
/// Column order is preserved. A later column whose name normalizes to an
/// existing key overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        let key = key.trim().to_lowercase();
        let value = value.trim().to_string();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Non-empty value of a column, by normalized name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First non-empty value among the given aliases, in alias order.
    fn first_of(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|alias| self.get(alias))
    }

    /// First non-empty value whose column name contains `needle`.
    fn first_containing(&self, needle: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, v)| k.contains(needle) && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k.as_ref(), v.as_ref());
        }
        row
    }
}

/// Normalize every row, dropping the ones with nothing to show.
///
/// Output order follows input order.
pub fn normalize<'a>(rows: impl IntoIterator<Item = &'a RawRow>) -> Vec<ProjectRecord> {
    let mut dropped = 0usize;
    let records: Vec<ProjectRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let record = normalize_row(row);
            if record.is_none() {
                dropped += 1;
            }
            record
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, kept = records.len(), "Dropped rows without links");
    }
    records
}

/// Normalize a single row, or `None` when it has neither a video nor a
/// thumbnail link.
pub fn normalize_row(row: &RawRow) -> Option<ProjectRecord> {
    let shorts_link = row.first_of(SHORTS_ALIASES).unwrap_or_default();
    let video_link = row
        .first_of(VIDEO_ALIASES)
        .unwrap_or(shorts_link)
        .to_string();

    let thumb_link = row
        .first_of(THUMB_ALIASES)
        .or_else(|| row.first_containing("thumbnail"))
        .unwrap_or_default()
        .to_string();

    if video_link.is_empty() && thumb_link.is_empty() {
        return None;
    }

    let project_type = explicit_type(row)
        .unwrap_or_else(|| infer_type(shorts_link, &video_link, &thumb_link));

    Some(ProjectRecord {
        video_id: video_id::extract(&video_link),
        video_link,
        thumb_link,
        project_type,
        channel_id: None,
        channel_link: String::new(),
        channel_title: None,
    })
}

fn explicit_type(row: &RawRow) -> Option<ProjectType> {
    let raw = row.get(TYPE_COLUMN)?.to_lowercase();
    let parsed = ProjectType::from_sheet_str(&raw);
    if parsed.is_none() {
        warn!(value = %raw, "Unrecognized project type, inferring from links");
    }
    parsed
}

fn infer_type(shorts_link: &str, video_link: &str, thumb_link: &str) -> ProjectType {
    if !shorts_link.is_empty() || video_link.contains("/shorts/") {
        ProjectType::Shorts
    } else if !video_link.is_empty() {
        ProjectType::Video
    } else if !thumb_link.is_empty() {
        ProjectType::Thumbnail
    } else {
        ProjectType::default()
    }
}
