//! Video identifier extraction from the URL shapes people paste into the sheet.

use regex::Regex;
use std::sync::LazyLock;

/// Length of a canonical video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// Short links (`youtu.be/ID`), `/v/ID`, user paths (`/u/x/ID`), `/embed/ID`,
/// `watch?v=ID` and `/shorts/ID`. The greedy prefix anchors on the last marker.
static RE_VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^.*(?:youtu\.be/|v/|/u/\w/|embed/|watch\?v=|shorts/)(?P<id>[^#&?]*).*",
    )
    .unwrap()
});

/// Extract the 11-character video identifier from a URL.
///
/// Returns `None` for empty input, unrecognized shapes, or an identifier of
/// the wrong length.
pub fn extract(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let caps = RE_VIDEO_URL.captures(url)?;
    let id = caps.name("id")?.as_str();
    (id.chars().count() == VIDEO_ID_LEN).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_recognized_shapes() {
        let urls = [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=share",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/u/1/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ?feature=share",
            "youtube.com/watch?v=dQw4w9WgXcQ#comments",
        ];
        for url in urls {
            assert_eq!(extract(url).as_deref(), Some(ID), "url: {url}");
        }
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        assert_eq!(extract("https://youtu.be/short"), None);
        assert_eq!(extract("https://www.youtube.com/watch?v=dQw4w9WgXcQxx"), None);
        assert_eq!(extract("https://youtube.com/shorts/abcdefghij"), None);
    }

    #[test]
    fn test_unrecognized_input() {
        assert_eq!(extract(""), None);
        assert_eq!(extract("   "), None);
        assert_eq!(extract("https://vimeo.com/123456789"), None);
        assert_eq!(extract("https://example.com/image.png"), None);
        assert_eq!(extract("not a url at all"), None);
    }

    #[test]
    fn test_watch_without_v_first() {
        // `v` must directly follow `watch?`.
        assert_eq!(
            extract("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            None
        );
    }

    #[test]
    fn test_ids_starting_with_v() {
        let id = "vAbCdEfGhIj";
        let urls = [
            format!("https://youtu.be/{id}"),
            format!("https://www.youtube.com/v/{id}"),
            format!("https://www.youtube.com/u/1/{id}"),
            format!("https://www.youtube.com/embed/{id}"),
            format!("https://www.youtube.com/watch?v={id}"),
            format!("https://youtube.com/shorts/{id}"),
        ];
        for url in &urls {
            assert_eq!(extract(url).as_deref(), Some(id), "url: {url}");
        }
        assert_eq!(extract("https://youtu.be/v0000000001").as_deref(), Some("v0000000001"));
    }

    #[test]
    fn test_shorts_id() {
        assert_eq!(
            extract("https://youtube.com/shorts/abcdefghijk").as_deref(),
            Some("abcdefghijk")
        );
    }
}
