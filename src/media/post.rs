//! Post representation.

use chrono::{DateTime, Datelike, Utc};

/// Kind of post, mirroring the platform's GraphQL typenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Image,
    Video,
    Sidecar,
}

impl PostKind {
    /// GraphQL typename string recorded in the download journal.
    pub fn typename(&self) -> &'static str {
        match self {
            PostKind::Image => "GraphImage",
            PostKind::Video => "GraphVideo",
            PostKind::Sidecar => "GraphSidecar",
        }
    }
}

/// Kind of a single downloadable media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Fallback file extension when the URL path carries none.
    pub fn default_extension(&self) -> &'static str {
        match self {
            MediaKind::Image => "jpg",
            MediaKind::Video => "mp4",
        }
    }
}

/// A single downloadable file belonging to a post.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Direct download URL.
    pub url: String,

    pub kind: MediaKind,

    /// Still-frame URL for video items.
    pub thumbnail_url: Option<String>,
}

/// A fetched post with the metadata the journal and file layout need.
#[derive(Debug, Clone)]
pub struct Post {
    pub shortcode: String,

    /// Username of the profile that owns the post.
    pub profile: String,

    /// Post creation time (UTC).
    pub taken_at: DateTime<Utc>,

    pub kind: PostKind,

    pub caption: Option<String>,

    pub like_count: Option<u64>,

    pub video_view_count: Option<u64>,

    pub video_duration: Option<f64>,

    /// Media files in carousel order (single entry for plain posts).
    pub media: Vec<MediaFile>,
}

impl Post {
    /// Year the post was published, used for the output directory layout.
    pub fn year(&self) -> i32 {
        self.taken_at.year()
    }

    /// First line of the caption, trimmed. Empty captions yield `None`.
    pub fn caption_first_line(&self) -> Option<&str> {
        self.caption
            .as_deref()
            .and_then(|c| c.lines().next())
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_post(caption: Option<&str>) -> Post {
        Post {
            shortcode: "ABC123".to_string(),
            profile: "someuser".to_string(),
            taken_at: Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap(),
            kind: PostKind::Image,
            caption: caption.map(String::from),
            like_count: Some(10),
            video_view_count: None,
            video_duration: None,
            media: vec![],
        }
    }

    #[test]
    fn test_year() {
        assert_eq!(make_post(None).year(), 2024);
    }

    #[test]
    fn test_caption_first_line() {
        let post = make_post(Some("First line \nsecond line"));
        assert_eq!(post.caption_first_line(), Some("First line"));
    }

    #[test]
    fn test_caption_first_line_empty() {
        assert_eq!(make_post(None).caption_first_line(), None);
        assert_eq!(make_post(Some("")).caption_first_line(), None);
        assert_eq!(make_post(Some("   \nreal text")).caption_first_line(), None);
    }

    #[test]
    fn test_typenames() {
        assert_eq!(PostKind::Image.typename(), "GraphImage");
        assert_eq!(PostKind::Video.typename(), "GraphVideo");
        assert_eq!(PostKind::Sidecar.typename(), "GraphSidecar");
    }
}
