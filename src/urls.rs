//! Post URL normalization and shortcode handling.

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

/// Alphabet Instagram uses to encode media IDs into URL shortcodes.
const SHORTCODE_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Strip query string and fragment from a URL, keeping scheme/host/path.
pub fn clean_url(raw: &str) -> Result<String> {
    let mut url = Url::parse(raw)?;
    url.set_query(None);
    url.set_fragment(None);
    Ok(url.to_string())
}

/// Extract the shortcode from a `/p/<code>` or `/reel/<code>` URL.
pub fn extract_shortcode(url: &str) -> Result<String> {
    let pattern = Regex::new(r"/(reel|p)/([^/?#]+)").unwrap();

    pattern
        .captures(url)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))
}

/// Decode a shortcode into the numeric media ID the web API expects.
///
/// Shortcodes are a base-64 positional encoding over Instagram's URL-safe
/// alphabet, most significant digit first.
pub fn media_id_from_shortcode(shortcode: &str) -> Result<u64> {
    let mut id: u64 = 0;

    for ch in shortcode.chars() {
        let digit = SHORTCODE_ALPHABET
            .find(ch)
            .ok_or_else(|| Error::InvalidUrl(format!("invalid shortcode: {}", shortcode)))?;

        id = id
            .checked_mul(64)
            .and_then(|v| v.checked_add(digit as u64))
            .ok_or_else(|| Error::InvalidUrl(format!("shortcode too long: {}", shortcode)))?;
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_url_strips_query_and_fragment() {
        let cleaned = clean_url("https://instagram.com/p/ABC123/?utm_source=x&igsh=y#frag").unwrap();
        assert_eq!(cleaned, "https://instagram.com/p/ABC123/");
    }

    #[test]
    fn test_clean_url_preserves_plain_urls() {
        let cleaned = clean_url("https://www.instagram.com/reel/XYZ/").unwrap();
        assert_eq!(cleaned, "https://www.instagram.com/reel/XYZ/");
    }

    #[test]
    fn test_clean_url_rejects_garbage() {
        assert!(clean_url("not a url").is_err());
    }

    #[test]
    fn test_extract_shortcode_post() {
        assert_eq!(
            extract_shortcode("https://instagram.com/p/ABC123/").unwrap(),
            "ABC123"
        );
    }

    #[test]
    fn test_extract_shortcode_reel() {
        assert_eq!(
            extract_shortcode("https://www.instagram.com/reel/Cx9_ab-12Qz/").unwrap(),
            "Cx9_ab-12Qz"
        );
    }

    #[test]
    fn test_extract_shortcode_without_trailing_slash() {
        assert_eq!(
            extract_shortcode("https://instagram.com/p/ABC123").unwrap(),
            "ABC123"
        );
    }

    #[test]
    fn test_extract_shortcode_missing() {
        assert!(extract_shortcode("https://instagram.com/someuser/").is_err());
    }

    #[test]
    fn test_query_noise_does_not_change_shortcode() {
        let plain = "https://instagram.com/p/ABC123/";
        let noisy = "https://instagram.com/p/ABC123/?utm=x&foo=bar#section";

        let a = extract_shortcode(&clean_url(plain).unwrap()).unwrap();
        let b = extract_shortcode(&clean_url(noisy).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_media_id_from_shortcode() {
        assert_eq!(media_id_from_shortcode("A").unwrap(), 0);
        assert_eq!(media_id_from_shortcode("B").unwrap(), 1);
        assert_eq!(media_id_from_shortcode("_").unwrap(), 63);
        assert_eq!(media_id_from_shortcode("BA").unwrap(), 64);
        assert_eq!(media_id_from_shortcode("BAA").unwrap(), 64 * 64);
    }

    #[test]
    fn test_media_id_rejects_invalid_chars() {
        assert!(media_id_from_shortcode("abc!").is_err());
    }
}
