//! Unsplash API client

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::models::ImageRecord;

use super::{FetchError, PageRequest, PhotoSource};

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

/// Unsplash API client (authenticates with a static `client_id`)
pub struct UnsplashClient {
    client: Client,
    base_url: String,
    access_key: String,
}

impl std::fmt::Debug for UnsplashClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsplashClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl UnsplashClient {
    /// Create a new client with default HTTP settings
    pub fn new(base_url: &str, access_key: &str) -> Self {
        Self::with_client(Client::new(), base_url, access_key)
    }

    /// Create a client from config (timeout, base URL, access key)
    pub fn from_config(config: &Config) -> Result<Self> {
        let access_key = config.access_key()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("snapshelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, &config.api_base_url, &access_key))
    }

    fn with_client(client: Client, base_url: &str, access_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        }
    }

    /// Build the URL for a listing or search page
    fn page_url(&self, request: &PageRequest) -> String {
        match request.query.as_deref().filter(|q| !q.is_empty()) {
            Some(query) => format!(
                "{}/search/photos?query={}&page={}&per_page={}&order_by=latest&client_id={}",
                self.base_url,
                urlencoding::encode(query),
                request.page,
                request.per_page,
                self.access_key
            ),
            None => format!(
                "{}/photos?page={}&per_page={}&order_by=latest&client_id={}",
                self.base_url, request.page, request.per_page, self.access_key
            ),
        }
    }

    /// Build the URL for a single photo
    fn photo_url(&self, id: &str) -> String {
        format!(
            "{}/photos/{}?client_id={}",
            self.base_url,
            urlencoding::encode(id),
            self.access_key
        )
    }

    async fn get_body(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept-Version", "v1")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl PhotoSource for UnsplashClient {
    async fn page(&self, request: &PageRequest) -> Result<Vec<ImageRecord>, FetchError> {
        tracing::debug!(
            page = request.page,
            per_page = request.per_page,
            search = request.is_search(),
            "Fetching photo page"
        );
        let body = self.get_body(&self.page_url(request)).await?;
        decode_page(&body, request.is_search())
    }

    async fn photo(&self, id: &str) -> Result<ImageRecord, FetchError> {
        tracing::debug!(id, "Fetching photo");
        let body = self.get_body(&self.photo_url(id)).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

// ==================== API Types ====================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ImageRecord>,
}

/// Decode a page body: search pages are wrapped in `{ "results": [...] }`,
/// listing pages are a bare array
pub fn decode_page(body: &[u8], search: bool) -> Result<Vec<ImageRecord>, FetchError> {
    if search {
        let response: SearchResponse = serde_json::from_slice(body)?;
        Ok(response.results)
    } else {
        Ok(serde_json::from_slice(body)?)
    }
}
