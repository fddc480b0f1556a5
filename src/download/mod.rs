//! Fetch-and-persist workflow for a single post.

use std::path::{Path, PathBuf};

use url::Url;

use crate::api::MediaClient;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::fs::naming::{rename_with_title, sanitize_title};
use crate::fs::paths::{ensure_dir, post_stem};
use crate::journal::{Journal, JournalEntry};
use crate::media::{MediaKind, Post};

/// One download invocation.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Canonical post URL (query and fragment already stripped).
    pub url: String,

    pub shortcode: String,

    /// Maximum characters for the caption-derived title.
    pub max_title_len: usize,

    /// Output base directory.
    pub base_dir: PathBuf,
}

/// Result of a download invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The shortcode was already journaled; nothing was fetched or written.
    AlreadyDownloaded { shortcode: String },

    /// Media was saved (and renamed when a usable title existed).
    Saved { path: PathBuf, files: usize },
}

/// Download one post: journal pre-check, fetch, save, rename, journal append.
pub async fn download_post(
    client: &dyn MediaClient,
    journal: &Journal,
    options: &ClientOptions,
    request: &DownloadRequest,
) -> Result<Outcome> {
    if journal.contains(&request.shortcode)? {
        return Ok(Outcome::AlreadyDownloaded {
            shortcode: request.shortcode.clone(),
        });
    }

    tracing::info!("fetching post {}", request.shortcode);
    let post = client.fetch_post(&request.shortcode).await?;

    let stem = post_stem(&request.base_dir, options, &post);
    let post_dir = stem
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| request.base_dir.clone());
    ensure_dir(&post_dir)?;

    let files = save_media(client, options, &post, &post_dir).await?;
    write_sidecars(options, &post, &post_dir)?;

    let title = post
        .caption_first_line()
        .map(|line| sanitize_title(line, request.max_title_len))
        .unwrap_or_default();

    let saved_path = if title.is_empty() {
        post_dir.join(&post.shortcode)
    } else {
        rename_with_title(&post_dir, &post.shortcode, &title)?;
        post_dir.join(&title)
    };

    let logged_title = if title.is_empty() {
        &post.shortcode
    } else {
        &title
    };
    let entry = JournalEntry::for_post(&post, &request.url, logged_title);
    journal.append(&post.profile, &entry)?;

    Ok(Outcome::Saved {
        path: saved_path,
        files,
    })
}

/// Save the post's media files as `{shortcode}.{ext}`, numbering carousel
/// items `{shortcode}_1..n`. Returns the number of files written.
async fn save_media(
    client: &dyn MediaClient,
    options: &ClientOptions,
    post: &Post,
    post_dir: &Path,
) -> Result<usize> {
    let multi = post.media.len() > 1;
    let mut saved = 0;

    for (index, media) in post.media.iter().enumerate() {
        let wanted = match media.kind {
            MediaKind::Image => options.download_pictures,
            MediaKind::Video => options.download_videos,
        };
        if !wanted {
            tracing::debug!("skipping {:?} item by configuration", media.kind);
            continue;
        }

        let stem = item_stem(&post.shortcode, multi, index);
        let ext = extension_for(&media.url, media.kind);
        let dest = post_dir.join(format!("{}.{}", stem, ext));

        let bytes = client.fetch_file(&media.url, &dest).await?;
        tracing::debug!("wrote {} ({} bytes)", dest.display(), bytes);
        saved += 1;

        if media.kind == MediaKind::Video && options.download_video_thumbnails {
            if let Some(thumbnail_url) = &media.thumbnail_url {
                let dest = post_dir.join(format!("{}.jpg", stem));
                client.fetch_file(thumbnail_url, &dest).await?;
                saved += 1;
            }
        }
    }

    Ok(saved)
}

/// Write the caption `.txt` and metadata `.json` sidecars when enabled.
fn write_sidecars(options: &ClientOptions, post: &Post, post_dir: &Path) -> Result<()> {
    if !options.post_metadata_txt_pattern.is_empty() {
        let text = options
            .post_metadata_txt_pattern
            .replace("{caption}", post.caption.as_deref().unwrap_or(""));

        if !text.is_empty() {
            std::fs::write(post_dir.join(format!("{}.txt", post.shortcode)), text)?;
        }
    }

    if options.save_metadata {
        let metadata = serde_json::json!({
            "shortcode": post.shortcode,
            "profile": post.profile,
            "date_posted": post.taken_at,
            "typename": post.kind.typename(),
            "caption": post.caption,
            "likes": post.like_count,
            "video_view_count": post.video_view_count,
            "video_duration": post.video_duration,
        });

        std::fs::write(
            post_dir.join(format!("{}.json", post.shortcode)),
            serde_json::to_string_pretty(&metadata)?,
        )?;
    }

    Ok(())
}

fn item_stem(shortcode: &str, multi: bool, index: usize) -> String {
    if multi {
        format!("{}_{}", shortcode, index + 1)
    } else {
        shortcode.to_string()
    }
}

/// File extension from the media URL path, falling back per media kind.
fn extension_for(url: &str, kind: MediaKind) -> String {
    let from_path = Url::parse(url).ok().and_then(|u| {
        u.path_segments()
            .and_then(|segments| segments.last().map(String::from))
            .and_then(|name| {
                name.rsplit_once('.')
                    .map(|(_, ext)| ext.to_ascii_lowercase())
            })
            .filter(|ext| !ext.is_empty() && ext.len() <= 4 && ext.chars().all(char::is_alphanumeric))
    });

    from_path.unwrap_or_else(|| kind.default_extension().to_string())
}
