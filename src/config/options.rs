//! Download client options.

use std::collections::BTreeMap;

use crate::config::overrides::OverrideValue;

/// Enumerated configuration for the download client.
///
/// The fields cover the options this tool actually sets; anything else a
/// user passes as `key=value` lands in `extra` with its coerced type.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Directory layout relative to the output base.
    pub dirname_pattern: String,

    /// File stem layout relative to the profile directory.
    pub filename_pattern: String,

    /// Whether to save picture files.
    pub download_pictures: bool,

    /// Whether to save video files.
    pub download_videos: bool,

    /// Whether to save a still frame next to each video.
    pub download_video_thumbnails: bool,

    /// Whether to write a `<shortcode>.json` metadata sidecar.
    pub save_metadata: bool,

    /// Template for the caption sidecar; empty disables the `.txt` file.
    pub post_metadata_txt_pattern: String,

    /// Whether pattern-derived path components are sanitized.
    pub sanitize_paths: bool,

    /// Residual overrides with no dedicated field.
    pub extra: BTreeMap<String, OverrideValue>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            dirname_pattern: "{profile}".to_string(),
            filename_pattern: "{date_utc:%Y}/{shortcode}".to_string(),
            download_pictures: true,
            download_videos: true,
            download_video_thumbnails: false,
            save_metadata: false,
            post_metadata_txt_pattern: "{caption}".to_string(),
            sanitize_paths: true,

            extra: BTreeMap::new(),
        }
    }
}

impl ClientOptions {
    /// Apply one user override, routing known keys to their typed field.
    pub fn apply_override(&mut self, key: &str, value: OverrideValue) {
        match key {
            "dirname_pattern" => {
                self.dirname_pattern = value.to_string();
            }
            "filename_pattern" => {
                self.filename_pattern = value.to_string();
            }
            "download_pictures" => {
                self.download_pictures = value.as_bool().unwrap_or(self.download_pictures);
            }
            "download_videos" => {
                self.download_videos = value.as_bool().unwrap_or(self.download_videos);
            }
            "download_video_thumbnails" => {
                self.download_video_thumbnails =
                    value.as_bool().unwrap_or(self.download_video_thumbnails);
            }
            "save_metadata" => {
                self.save_metadata = value.as_bool().unwrap_or(self.save_metadata);
            }
            "post_metadata_txt_pattern" => {
                self.post_metadata_txt_pattern =
                    value.as_str().map(String::from).unwrap_or_default();
            }
            "sanitize_paths" => {
                self.sanitize_paths = value.as_bool().unwrap_or(self.sanitize_paths);
            }
            _ => {
                tracing::debug!("unrecognized override: {}={}", key, value);
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// Overlay a set of overrides onto the current options.
    pub fn apply_overrides<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (String, OverrideValue)>,
    {
        for (key, value) in overrides {
            self.apply_override(&key, value);
        }
    }
}
