//! Browser cookie extraction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One cookie as stored in a session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

/// Browsers with a supported local cookie store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Arc,
    Brave,
    Chrome,
    Chromium,
    Edge,
    Firefox,
    Librewolf,
    Opera,
    OperaGx,
    Safari,
    Vivaldi,
}

impl Browser {
    /// All supported browsers, for the usage message.
    pub const ALL: [Browser; 11] = [
        Browser::Arc,
        Browser::Brave,
        Browser::Chrome,
        Browser::Chromium,
        Browser::Edge,
        Browser::Firefox,
        Browser::Librewolf,
        Browser::Opera,
        Browser::OperaGx,
        Browser::Safari,
        Browser::Vivaldi,
    ];

    /// Comma-separated list of supported browser names.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Browser::Arc => "arc",
            Browser::Brave => "brave",
            Browser::Chrome => "chrome",
            Browser::Chromium => "chromium",
            Browser::Edge => "edge",
            Browser::Firefox => "firefox",
            Browser::Librewolf => "librewolf",
            Browser::Opera => "opera",
            Browser::OperaGx => "opera_gx",
            Browser::Safari => "safari",
            Browser::Vivaldi => "vivaldi",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Browser {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "arc" => Ok(Browser::Arc),
            "brave" => Ok(Browser::Brave),
            "chrome" => Ok(Browser::Chrome),
            "chromium" => Ok(Browser::Chromium),
            "edge" => Ok(Browser::Edge),
            "firefox" => Ok(Browser::Firefox),
            "librewolf" => Ok(Browser::Librewolf),
            "opera" => Ok(Browser::Opera),
            "opera_gx" => Ok(Browser::OperaGx),
            "safari" => Ok(Browser::Safari),
            "vivaldi" => Ok(Browser::Vivaldi),
            _ => Err(Error::Usage(format!(
                "Unsupported browser: {}\nSupported: {}",
                s,
                Browser::supported_list()
            ))),
        }
    }
}

/// Source of authentication cookies for a domain.
///
/// The production implementation reads a browser's local cookie store;
/// tests substitute an in-memory source.
pub trait CookieSource {
    fn cookies(&self, domain: &str) -> Result<Vec<SessionCookie>>;
}

/// Cookie source backed by a local browser profile via `rookie`.
pub struct BrowserCookieSource {
    browser: Browser,
}

impl BrowserCookieSource {
    pub fn new(browser: Browser) -> Self {
        Self { browser }
    }
}

impl CookieSource for BrowserCookieSource {
    fn cookies(&self, domain: &str) -> Result<Vec<SessionCookie>> {
        let domains = Some(vec![domain.trim_start_matches('.').to_string()]);

        let cookies = match self.browser {
            Browser::Arc => rookie::arc(domains),
            Browser::Brave => rookie::brave(domains),
            Browser::Chrome => rookie::chrome(domains),
            Browser::Chromium => rookie::chromium(domains),
            Browser::Edge => rookie::edge(domains),
            Browser::Firefox => rookie::firefox(domains),
            Browser::Librewolf => rookie::librewolf(domains),
            Browser::Opera => rookie::opera(domains),
            Browser::OperaGx => rookie::opera_gx(domains),
            #[cfg(target_os = "macos")]
            Browser::Safari => rookie::safari(domains),
            #[cfg(not(target_os = "macos"))]
            Browser::Safari => {
                return Err(Error::CookieExtraction(
                    "safari cookies can only be read on macOS".to_string(),
                ))
            }
            Browser::Vivaldi => rookie::vivaldi(domains),
        }
        .map_err(|e| Error::CookieExtraction(e.to_string()))?;

        Ok(cookies
            .into_iter()
            .map(|c| SessionCookie {
                name: c.name,
                value: c.value,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_round_trip() {
        for browser in Browser::ALL {
            assert_eq!(browser.to_string().parse::<Browser>().unwrap(), browser);
        }
    }

    #[test]
    fn test_browser_parse_case_insensitive() {
        assert_eq!("Firefox".parse::<Browser>().unwrap(), Browser::Firefox);
        assert_eq!("OPERA_GX".parse::<Browser>().unwrap(), Browser::OperaGx);
    }

    #[test]
    fn test_unsupported_browser_lists_the_set() {
        let err = "netscape".parse::<Browser>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("netscape"));
        assert!(message.contains("firefox"));
        assert!(message.contains("opera_gx"));
    }
}
