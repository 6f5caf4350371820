//! Video pitch link validation and the embeddable preview descriptor.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

static YOUTUBE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)")
        .expect("valid YouTube pattern")
});

static VIMEO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?vimeo\.com/[0-9]+").expect("valid Vimeo pattern")
});

static HTTP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("valid HTTP pattern"));

/// Accepts an empty link (the field is optional), a YouTube or Vimeo link, or
/// any other `http(s)://` URL.
pub fn validate_video_url(input: &str) -> bool {
    if input.is_empty() {
        return true;
    }

    YOUTUBE_PATTERN.is_match(input) || VIMEO_PATTERN.is_match(input) || HTTP_PATTERN.is_match(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    Vimeo,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub platform: Platform,
    pub video_id: Option<String>,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub watch_url: String,
}

impl VideoInfo {
    fn youtube(id: &str) -> Self {
        Self {
            platform: Platform::YouTube,
            video_id: Some(id.to_string()),
            embed_url: Some(format!("https://www.youtube.com/embed/{}", id)),
            thumbnail_url: Some(format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", id)),
            watch_url: format!("https://www.youtube.com/watch?v={}", id),
        }
    }

    fn vimeo(id: &str, watch_url: &str) -> Self {
        Self {
            platform: Platform::Vimeo,
            video_id: Some(id.to_string()),
            embed_url: Some(format!("https://player.vimeo.com/video/{}", id)),
            thumbnail_url: Some(format!("https://vumbnail.com/{}.jpg", id)),
            watch_url: watch_url.to_string(),
        }
    }

    fn other(watch_url: &str) -> Self {
        Self {
            platform: Platform::Other,
            video_id: None,
            embed_url: None,
            thumbnail_url: None,
            watch_url: watch_url.to_string(),
        }
    }

    pub fn is_embeddable(&self) -> bool {
        self.embed_url.is_some()
    }
}

fn youtube_id(url: &Url, host: &str) -> Option<String> {
    let path = url.path();
    let id = if host.contains("youtu.be") {
        path.strip_prefix('/').unwrap_or(path).to_string()
    } else if path == "/watch" {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    } else if path.starts_with("/embed/") {
        path.split("/embed/").nth(1)?.to_string()
    } else {
        return None;
    };

    (!id.is_empty()).then_some(id)
}

fn vimeo_id(url: &Url) -> Option<&str> {
    let last = url.path().rsplit('/').next()?;
    (!last.is_empty() && last.chars().all(|c| c.is_ascii_digit())).then_some(last)
}

/// Derives the preview descriptor for a video link.
///
/// Returns `None` for an empty link or one that does not parse as an absolute
/// URL. Hosts other than YouTube and Vimeo, and YouTube/Vimeo links whose id
/// cannot be found, come back as [`Platform::Other`] with only `watch_url`.
pub fn extract_video_info(input: &str) -> Option<VideoInfo> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let url = Url::parse(input).ok()?;
    let host = url.host_str().unwrap_or_default();

    if host.contains("youtube.com") || host.contains("youtu.be") {
        if let Some(id) = youtube_id(&url, host) {
            return Some(VideoInfo::youtube(&id));
        }
    }

    if host.contains("vimeo.com") {
        if let Some(id) = vimeo_id(&url) {
            return Some(VideoInfo::vimeo(id, input));
        }
    }

    Some(VideoInfo::other(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_video_url() {
        assert!(validate_video_url(""));
        assert!(validate_video_url("https://youtu.be/abc123"));
        assert!(validate_video_url("youtube.com/watch?v=abc123"));
        assert!(validate_video_url("www.vimeo.com/76979871"));
        assert!(validate_video_url("https://example.com/meu-video.mp4"));
        assert!(!validate_video_url("ftp://x.com"));
        assert!(!validate_video_url("vimeo.com/channel"));
        assert!(!validate_video_url("https://"));
    }

    #[test]
    fn test_vimeo_pattern_needs_ascii_digits() {
        assert!(VIMEO_PATTERN.is_match("vimeo.com/76979871"));
        assert!(!VIMEO_PATTERN.is_match("vimeo.com/٧٦٩٧٩٨٧١"));
        assert!(!validate_video_url("vimeo.com/٧٦٩٧٩٨٧١"));
    }

    #[test]
    fn test_extract_youtube_watch() {
        let info = extract_video_info("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").unwrap();
        assert_eq!(info.platform, Platform::YouTube);
        assert_eq!(info.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(
            info.embed_url.as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
        assert_eq!(
            info.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg")
        );
        assert_eq!(info.watch_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_extract_youtube_short_and_embed() {
        let short = extract_video_info("https://youtu.be/abc123").unwrap();
        assert_eq!(short.video_id.as_deref(), Some("abc123"));

        let embed = extract_video_info("https://youtube.com/embed/xyz789").unwrap();
        assert_eq!(embed.platform, Platform::YouTube);
        assert_eq!(embed.video_id.as_deref(), Some("xyz789"));
    }

    #[test]
    fn test_extract_youtube_without_id_is_other() {
        let info = extract_video_info("https://www.youtube.com/channel/UC123").unwrap();
        assert_eq!(info.platform, Platform::Other);
        assert!(!info.is_embeddable());
    }

    #[test]
    fn test_extract_vimeo() {
        let info = extract_video_info("https://vimeo.com/76979871").unwrap();
        assert_eq!(info.platform, Platform::Vimeo);
        assert_eq!(info.video_id.as_deref(), Some("76979871"));
        assert_eq!(
            info.embed_url.as_deref(),
            Some("https://player.vimeo.com/video/76979871")
        );
        assert_eq!(
            info.thumbnail_url.as_deref(),
            Some("https://vumbnail.com/76979871.jpg")
        );
        assert_eq!(info.watch_url, "https://vimeo.com/76979871");
    }

    #[test]
    fn test_extract_other_and_malformed() {
        let info = extract_video_info("  https://example.com/video  ").unwrap();
        assert_eq!(info.platform, Platform::Other);
        assert_eq!(info.watch_url, "https://example.com/video");
        assert_eq!(info.video_id, None);

        assert_eq!(extract_video_info("youtu.be/abc123"), None);
        assert_eq!(extract_video_info("   "), None);
    }
}
