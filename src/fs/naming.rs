//! Filename sanitation and post-download renaming.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Characters that are unsafe in filenames on at least one platform.
const HOSTILE_CHARS: [char; 9] = ['/', ':', '*', '?', '"', '<', '>', '|', '\\'];

/// Sanitize a caption-derived title for use as a filename stem.
///
/// Truncates to `max_len` characters, backing up to the last space so no
/// word is split, then replaces hostile characters with underscores and
/// strips trailing dots and spaces.
pub fn sanitize_title(name: &str, max_len: usize) -> String {
    let truncated: String = if name.chars().count() > max_len {
        let cut: String = name.chars().take(max_len).collect();
        match cut.rfind(' ') {
            Some(pos) => cut[..pos].to_string(),
            None => cut,
        }
    } else {
        name.to_string()
    };

    let replaced: String = truncated
        .chars()
        .map(|c| if HOSTILE_CHARS.contains(&c) { '_' } else { c })
        .collect();

    replaced.trim_end_matches(['.', ' ']).to_string()
}

/// Sanitize a single path component derived from a pattern.
///
/// Unlike [`sanitize_title`] this also replaces control characters and does
/// not truncate.
pub fn sanitize_path_component(name: &str) -> String {
    name.chars()
        .map(|c| {
            if HOSTILE_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Rename every `{shortcode}*` file in `dir`, swapping the shortcode prefix
/// for `title` while keeping each file's remaining suffix.
///
/// Returns the renamed paths in sorted order.
pub fn rename_with_title(dir: &Path, shortcode: &str, title: &str) -> Result<Vec<PathBuf>> {
    let mut matches: Vec<PathBuf> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if path.is_file() && name.starts_with(shortcode) {
            matches.push(path);
        }
    }

    matches.sort();

    let mut renamed = Vec::with_capacity(matches.len());
    for path in matches {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let suffix = &name[shortcode.len()..];

        let target = dir.join(format!("{}{}", title, suffix));
        std::fs::rename(&path, &target)?;
        renamed.push(target);
    }

    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_short_name_unchanged() {
        assert_eq!(sanitize_title("hello world", 70), "hello world");
    }

    #[test]
    fn test_sanitize_truncates_at_word_boundary() {
        assert_eq!(sanitize_title("one two three", 9), "one two");
    }

    #[test]
    fn test_sanitize_truncates_without_space() {
        assert_eq!(sanitize_title("abcdefghij", 4), "abcd");
    }

    #[test]
    fn test_sanitize_replaces_hostile_chars() {
        assert_eq!(sanitize_title(r#"a/b:c*d?e"f<g>h|i\j"#, 70), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn test_sanitize_strips_trailing_dots_and_spaces() {
        assert_eq!(sanitize_title("title... ", 70), "title");
        assert_eq!(sanitize_title("title . .", 70), "title");
    }

    #[test]
    fn test_sanitize_never_exceeds_max_len() {
        for input in ["word ".repeat(40), "x".repeat(200), "a b".repeat(30)] {
            for max_len in [1, 10, 50, 70] {
                let out = sanitize_title(&input, max_len);
                assert!(out.chars().count() <= max_len, "{:?} > {}", out, max_len);
                assert!(!out.contains(HOSTILE_CHARS));
                assert!(!out.ends_with(['.', ' ']));
            }
        }
    }

    #[test]
    fn test_sanitize_path_component() {
        assert_eq!(sanitize_path_component("some/user"), "some_user");
        assert_eq!(sanitize_path_component("tab\there"), "tab_here");
    }

    #[test]
    fn test_rename_with_title() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["ABC123.mp4", "ABC123.txt", "ABC123_1.jpg", "OTHER.jpg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let renamed = rename_with_title(dir.path(), "ABC123", "My Title").unwrap();

        assert_eq!(
            renamed,
            vec![
                dir.path().join("My Title.mp4"),
                dir.path().join("My Title.txt"),
                dir.path().join("My Title_1.jpg"),
            ]
        );
        assert!(dir.path().join("OTHER.jpg").exists());
        assert!(!dir.path().join("ABC123.mp4").exists());
    }
}
