//! Instagram web API HTTP client.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{cookie::Jar, header, Client, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::api::types::{CurrentUserResponse, MediaInfoResponse};
use crate::api::MediaClient;
use crate::error::{Error, Result};
use crate::media::Post;
use crate::session::SessionCookie;
use crate::urls::media_id_from_shortcode;

/// Instagram web API base URL.
const API_BASE: &str = "https://www.instagram.com";

/// App ID the web client sends with every API request.
const APP_ID: &str = "936619743392459";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Instagram web API client authenticated by session cookies.
pub struct InstagramApi {
    client: Client,
    csrf_token: Option<String>,
}

impl InstagramApi {
    /// Build a client with the given cookies injected into its jar.
    pub fn new(cookies: &[SessionCookie]) -> Result<Self> {
        let jar = Jar::default();
        let base: Url = API_BASE.parse()?;

        for cookie in cookies {
            jar.add_cookie_str(
                &format!(
                    "{}={}; Domain=.instagram.com; Path=/",
                    cookie.name, cookie.value
                ),
                &base,
            );
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(Arc::new(jar))
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        let csrf_token = cookies
            .iter()
            .find(|c| c.name == "csrftoken")
            .map(|c| c.value.clone());

        Ok(Self { client, csrf_token })
    }

    /// Build common headers for API requests.
    fn build_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();

        headers.insert("x-ig-app-id", header::HeaderValue::from_static(APP_ID));
        headers.insert(
            "x-requested-with",
            header::HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(
            header::REFERER,
            header::HeaderValue::from_static("https://www.instagram.com/"),
        );

        if let Some(token) = &self.csrf_token {
            if let Ok(value) = token.parse() {
                headers.insert("x-csrftoken", value);
            }
        }

        headers
    }

    /// Make an authenticated GET request against the API.
    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", API_BASE, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers())
            .send()
            .await?;

        Ok(response)
    }
}

#[async_trait]
impl MediaClient for InstagramApi {
    async fn logged_in_user(&self) -> Result<Option<String>> {
        let response = self.get("/api/v1/accounts/current_user/?edit=true").await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => {
                return Err(Error::Api(format!("login check failed: HTTP {}", status)))
            }
            _ => {}
        }

        let body: CurrentUserResponse = response.json().await?;
        Ok(body.user.map(|u| u.username))
    }

    async fn fetch_post(&self, shortcode: &str) -> Result<Post> {
        let media_id = media_id_from_shortcode(shortcode)?;
        let response = self.get(&format!("/api/v1/media/{}/info/", media_id)).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::Api(format!("Post not found: {}", shortcode)));
        }
        if !status.is_success() {
            return Err(Error::Api(format!(
                "fetching post {} failed: HTTP {}",
                shortcode, status
            )));
        }

        let body: MediaInfoResponse = response.json().await?;
        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api(format!("Post not found: {}", shortcode)))?;

        item.into_post(shortcode)
    }

    async fn fetch_file(&self, url: &str, dest: &Path) -> Result<u64> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "HTTP {} for {}",
                response.status(),
                url
            )));
        }

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;

        Ok(written)
    }
}
