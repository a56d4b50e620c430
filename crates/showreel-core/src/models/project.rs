use serde::{Deserialize, Serialize};

/// What kind of work a project card showcases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Video,
    Shorts,
    Thumbnail,
}

impl ProjectType {
    pub const ALL: &[ProjectType] = &[Self::Video, Self::Shorts, Self::Thumbnail];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Shorts => "shorts",
            Self::Thumbnail => "thumbnail",
        }
    }

    /// Parse a sheet value. Expects input already trimmed and lowercased.
    pub fn from_sheet_str(s: &str) -> Option<Self> {
        match s {
            "video" => Some(Self::Video),
            "shorts" => Some(Self::Shorts),
            "thumbnail" => Some(Self::Thumbnail),
            _ => None,
        }
    }

    /// Whether the card plays a video when activated.
    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Video | Self::Shorts)
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One gallery entry, normalized from a spreadsheet row.
///
/// Always has a non-empty `thumb_link` or `video_link`. The channel fields
/// are filled in once by enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub video_link: String,
    pub thumb_link: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
    pub channel_link: String,
    pub channel_title: Option<String>,
}

impl ProjectRecord {
    /// Re-express the record as a sheet row using canonical column names.
    pub fn to_row(&self) -> Vec<(String, String)> {
        vec![
            ("video_link".into(), self.video_link.clone()),
            ("thumbnail_link".into(), self.thumb_link.clone()),
            ("type".into(), self.project_type.as_str().into()),
        ]
    }
}
