//! API response type definitions.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::media::{MediaFile, MediaKind, Post, PostKind};

/// Response from `/api/v1/accounts/current_user/`.
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub user: Option<WireUser>,
}

/// Response from `/api/v1/media/{id}/info/`.
#[derive(Debug, Deserialize)]
pub struct MediaInfoResponse {
    #[serde(default)]
    pub items: Vec<WireMediaItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCaption {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireImageCandidate {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireImageVersions {
    #[serde(default)]
    pub candidates: Vec<WireImageCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireVideoVersion {
    pub url: String,
}

/// One media item as the info endpoint returns it. Carousel posts nest the
/// same shape under `carousel_media`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMediaItem {
    pub code: Option<String>,
    pub taken_at: i64,

    /// 1 = image, 2 = video, 8 = carousel.
    pub media_type: u8,

    pub caption: Option<WireCaption>,
    pub user: Option<WireUser>,

    pub like_count: Option<u64>,
    pub play_count: Option<u64>,
    pub video_duration: Option<f64>,

    #[serde(default)]
    pub image_versions2: WireImageVersions,
    #[serde(default)]
    pub video_versions: Vec<WireVideoVersion>,
    #[serde(default)]
    pub carousel_media: Vec<WireMediaItem>,
}

impl WireMediaItem {
    /// Convert the wire item into the domain post model.
    pub fn into_post(self, shortcode: &str) -> Result<Post> {
        let taken_at = chrono::DateTime::from_timestamp(self.taken_at, 0)
            .ok_or_else(|| Error::Api(format!("invalid post timestamp: {}", self.taken_at)))?;

        let profile = self
            .user
            .as_ref()
            .map(|u| u.username.clone())
            .ok_or_else(|| Error::Api(format!("post {} has no owner", shortcode)))?;

        let (kind, media) = match self.media_type {
            1 => (PostKind::Image, vec![self.image_file(shortcode)?]),
            2 => (PostKind::Video, vec![self.video_file(shortcode)?]),
            8 => {
                let mut files = Vec::with_capacity(self.carousel_media.len());
                for item in &self.carousel_media {
                    files.push(match item.media_type {
                        2 => item.video_file(shortcode)?,
                        _ => item.image_file(shortcode)?,
                    });
                }
                (PostKind::Sidecar, files)
            }
            other => {
                return Err(Error::Api(format!(
                    "unsupported media type {} for post {}",
                    other, shortcode
                )))
            }
        };

        Ok(Post {
            shortcode: self.code.unwrap_or_else(|| shortcode.to_string()),
            profile,
            taken_at,
            kind,
            caption: self.caption.map(|c| c.text),
            like_count: self.like_count,
            video_view_count: self.play_count,
            video_duration: self.video_duration,
            media,
        })
    }

    fn image_file(&self, shortcode: &str) -> Result<MediaFile> {
        let url = self
            .image_versions2
            .candidates
            .first()
            .map(|c| c.url.clone())
            .ok_or_else(|| Error::Api(format!("post {} has no image candidates", shortcode)))?;

        Ok(MediaFile {
            url,
            kind: MediaKind::Image,
            thumbnail_url: None,
        })
    }

    fn video_file(&self, shortcode: &str) -> Result<MediaFile> {
        let url = self
            .video_versions
            .first()
            .map(|v| v.url.clone())
            .ok_or_else(|| Error::Api(format!("post {} has no video versions", shortcode)))?;

        Ok(MediaFile {
            url,
            kind: MediaKind::Video,
            thumbnail_url: self.image_versions2.candidates.first().map(|c| c.url.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_item(json: serde_json::Value) -> WireMediaItem {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_image_post_conversion() {
        let item = wire_item(serde_json::json!({
            "code": "ABC123",
            "taken_at": 1715947200,
            "media_type": 1,
            "caption": {"text": "Hello\nworld"},
            "user": {"username": "someuser"},
            "like_count": 42,
            "image_versions2": {"candidates": [{"url": "https://cdn.example/a.jpg"}]},
        }));

        let post = item.into_post("ABC123").unwrap();
        assert_eq!(post.profile, "someuser");
        assert_eq!(post.kind, PostKind::Image);
        assert_eq!(post.media.len(), 1);
        assert_eq!(post.media[0].url, "https://cdn.example/a.jpg");
        assert_eq!(post.caption.as_deref(), Some("Hello\nworld"));
    }

    #[test]
    fn test_video_post_conversion() {
        let item = wire_item(serde_json::json!({
            "code": "VID111",
            "taken_at": 1715947200,
            "media_type": 2,
            "user": {"username": "someuser"},
            "play_count": 990,
            "video_duration": 12.3,
            "image_versions2": {"candidates": [{"url": "https://cdn.example/thumb.jpg"}]},
            "video_versions": [{"url": "https://cdn.example/v.mp4"}],
        }));

        let post = item.into_post("VID111").unwrap();
        assert_eq!(post.kind, PostKind::Video);
        assert_eq!(post.video_view_count, Some(990));
        assert_eq!(post.media[0].url, "https://cdn.example/v.mp4");
        assert_eq!(
            post.media[0].thumbnail_url.as_deref(),
            Some("https://cdn.example/thumb.jpg")
        );
    }

    #[test]
    fn test_carousel_post_conversion() {
        let item = wire_item(serde_json::json!({
            "code": "CAR222",
            "taken_at": 1715947200,
            "media_type": 8,
            "user": {"username": "someuser"},
            "carousel_media": [
                {
                    "taken_at": 1715947200,
                    "media_type": 1,
                    "image_versions2": {"candidates": [{"url": "https://cdn.example/1.jpg"}]},
                },
                {
                    "taken_at": 1715947200,
                    "media_type": 2,
                    "image_versions2": {"candidates": [{"url": "https://cdn.example/2t.jpg"}]},
                    "video_versions": [{"url": "https://cdn.example/2.mp4"}],
                },
            ],
        }));

        let post = item.into_post("CAR222").unwrap();
        assert_eq!(post.kind, PostKind::Sidecar);
        assert_eq!(post.media.len(), 2);
        assert_eq!(post.media[0].kind, MediaKind::Image);
        assert_eq!(post.media[1].kind, MediaKind::Video);
    }

    #[test]
    fn test_post_without_owner_is_rejected() {
        let item = wire_item(serde_json::json!({
            "taken_at": 1715947200,
            "media_type": 1,
            "image_versions2": {"candidates": [{"url": "https://cdn.example/a.jpg"}]},
        }));

        assert!(item.into_post("ABC123").is_err());
    }
}
