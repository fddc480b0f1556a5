//! Session persistence and browser cookie import.

pub mod cookies;
pub mod store;

pub use cookies::{Browser, BrowserCookieSource, CookieSource, SessionCookie};
pub use store::{Session, SessionStore};
