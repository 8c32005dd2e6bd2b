//! Photo API clients

pub mod unsplash;

pub use unsplash::UnsplashClient;

use crate::models::ImageRecord;

/// Why a single request produced no photos
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never got a response (DNS, TLS, timeout, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },
    /// The body did not match the expected response shape
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One page of a listing or search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Search term; `None` means the latest-photos listing
    pub query: Option<String>,
    /// 1-based page number
    pub page: u32,
    /// Photos per page
    pub per_page: u32,
}

impl PageRequest {
    /// Whether this page goes to the search endpoint
    pub fn is_search(&self) -> bool {
        self.query.as_deref().is_some_and(|q| !q.is_empty())
    }
}

/// Source of photos (the remote API, or a fake in tests)
#[allow(async_fn_in_trait)]
pub trait PhotoSource {
    /// Fetch one page of photos, newest first
    async fn page(&self, request: &PageRequest) -> Result<Vec<ImageRecord>, FetchError>;

    /// Fetch a single photo by ID
    async fn photo(&self, id: &str) -> Result<ImageRecord, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_listing() {
        let mut request = PageRequest {
            query: None,
            page: 1,
            per_page: 10,
        };
        assert!(!request.is_search());

        request.query = Some(String::new());
        assert!(!request.is_search());

        request.query = Some("cats".to_string());
        assert!(request.is_search());
    }
}
