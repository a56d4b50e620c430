//! Plain-text rendering of gallery cards.

use std::fmt::Write;

use showreel_core::config::AppConfig;
use showreel_core::projection::{ActionKind, Category, ClickAction, DisplayRecord};
use showreel_core::urls;

pub fn gallery(cards: &[DisplayRecord], filter: Category) -> String {
    let mut out = String::new();
    let _ = write!(out, "Projects ({filter})");
    if let Some(mode) = filter.layout_mode() {
        let _ = write!(out, " [{mode}]");
    }
    out.push('\n');

    if cards.is_empty() {
        out.push_str("No projects found.\n");
        return out;
    }

    for (i, card) in cards.iter().enumerate() {
        let _ = writeln!(out, "{}", card_line(i + 1, card));
    }
    out
}

fn card_line(number: usize, card: &DisplayRecord) -> String {
    let marker = if card.playable { "▶" } else { " " };
    let mut line = format!(
        "{number:>3}. {marker} {:<9} {}",
        card.record.project_type.as_str(),
        card.channel.title
    );
    if let Some(subs) = card.channel.subscriber_text() {
        let _ = write!(line, " ({subs})");
    }
    let image = card.thumbnail.as_deref().unwrap_or(urls::PLACEHOLDER_IMAGE);
    let _ = write!(line, "\n       image: {image}");
    if !card.record.video_link.is_empty() {
        let _ = write!(line, "\n       link:  {}", card.record.video_link);
    }
    line
}

pub fn action(action: &ClickAction) -> String {
    let kind = match action.kind {
        ActionKind::Image => "image",
        ActionKind::Video => "video",
        ActionKind::External => "external",
    };
    format!("{kind}\t{}", action.target)
}

pub fn config_summary(config: &AppConfig) -> String {
    let sheet = match config.sheet_url() {
        Ok(Some(url)) => url.to_string(),
        Ok(None) => "(not set)".into(),
        Err(e) => format!("(invalid: {e})"),
    };
    let key = if config.api_key().is_some() {
        "set"
    } else {
        "(not set)"
    };
    let mut out = String::new();
    let _ = writeln!(out, "sheet_csv_url: {sheet}");
    let _ = writeln!(out, "api_key: {key}");
    let _ = writeln!(out, "request_timeout: {}s", config.request_timeout().as_secs());
    let _ = writeln!(out, "admin_url: {}", config.admin_url().unwrap_or("(none)"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use showreel_core::cache::ChannelCache;
    use showreel_core::models::{ProjectRecord, ProjectType};
    use showreel_core::projection;

    fn shorts() -> ProjectRecord {
        ProjectRecord {
            video_link: "https://youtube.com/shorts/abcdefghijk".into(),
            thumb_link: String::new(),
            project_type: ProjectType::Shorts,
            video_id: Some("abcdefghijk".into()),
            channel_id: None,
            channel_link: String::new(),
            channel_title: Some("Studio".into()),
        }
    }

    #[test]
    fn test_empty_gallery() {
        let out = gallery(&[], Category::Thumbnail);
        assert!(out.starts_with("Projects (thumbnail) [mode-thumbnail]"));
        assert!(out.contains("No projects found."));
    }

    #[test]
    fn test_card_lines() {
        let cards = projection::filter(&[shorts()], Category::All, &ChannelCache::new());
        let out = gallery(&cards, Category::All);
        assert!(out.contains("  1. ▶ shorts    Studio"));
        assert!(out.contains("image: https://img.youtube.com/vi/abcdefghijk/maxresdefault.jpg"));
        assert!(out.contains("link:  https://youtube.com/shorts/abcdefghijk"));
        assert!(!out.contains("Subs"));
    }

    #[test]
    fn test_action_line() {
        let a = projection::resolve_click_action(&shorts());
        assert_eq!(
            action(&a),
            "video\thttps://www.youtube.com/embed/abcdefghijk?autoplay=1"
        );
    }

    #[test]
    fn test_config_summary_hides_key() {
        let mut config = AppConfig::default();
        config.youtube.api_key = "secret".into();
        let out = config_summary(&config);
        assert!(out.contains("api_key: set"));
        assert!(!out.contains("secret"));
        assert!(out.contains("sheet_csv_url: (not set)"));
    }
}
