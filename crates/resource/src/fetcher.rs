//! The [`FontFetcher`] trait and its HTTP and in-memory implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable font bytes shared across the pipeline without copying.
pub type SharedFontData = Arc<Vec<u8>>;

/// Errors surfaced by a [`FontFetcher`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("font not found: {0}")]
    NotFound(String),

    #[error("failed to fetch '{source_name}': {message}")]
    FetchFailed { source_name: String, message: String },
}

/// Asynchronous source of font bytes.
///
/// Implementations must be safe to call concurrently; the resolver
/// settles several fetches at once.
#[async_trait]
pub trait FontFetcher: Send + Sync {
    /// Fetches the font at `source`, returning all of its bytes.
    async fn fetch(&self, source: &str) -> Result<SharedFontData, FetchError>;

    /// Implementation name, used in log messages.
    fn name(&self) -> &'static str;
}

/// Fetches fonts over HTTP(S).
pub struct HttpFontFetcher {
    client: reqwest::Client,
}

impl HttpFontFetcher {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl Default for HttpFontFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FontFetcher for HttpFontFetcher {
    async fn fetch(&self, source: &str) -> Result<SharedFontData, FetchError> {
        let response = self
            .client
            .get(source)
            .send()
            .await
            .map_err(|e| FetchError::FetchFailed {
                source_name: source.to_string(),
                message: e.to_string(),
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(source.to_string()));
        }
        let response = response.error_for_status().map_err(|e| FetchError::FetchFailed {
            source_name: source.to_string(),
            message: e.to_string(),
        })?;

        let bytes = response.bytes().await.map_err(|e| FetchError::FetchFailed {
            source_name: source.to_string(),
            message: e.to_string(),
        })?;
        Ok(Arc::new(bytes.to_vec()))
    }

    fn name(&self) -> &'static str {
        "HttpFontFetcher"
    }
}

/// Pre-populated in-memory fetcher.
#[derive(Default)]
pub struct InMemoryFontFetcher {
    fonts: HashMap<String, SharedFontData>,
}

impl InMemoryFontFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, data: Vec<u8>) {
        self.fonts.insert(source.into(), Arc::new(data));
    }
}

#[async_trait]
impl FontFetcher for InMemoryFontFetcher {
    async fn fetch(&self, source: &str) -> Result<SharedFontData, FetchError> {
        self.fonts
            .get(source)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(source.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryFontFetcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_fetcher_returns_inserted_bytes() {
        let mut fetcher = InMemoryFontFetcher::new();
        fetcher.insert("fonts/Sarabun.ttf", vec![1, 2, 3]);

        let data = fetcher.fetch("fonts/Sarabun.ttf").await.unwrap();
        assert_eq!(&*data, &[1, 2, 3]);
    }

    #[tokio::test]
    async fn in_memory_fetcher_reports_missing_fonts() {
        let fetcher = InMemoryFontFetcher::new();
        let result = fetcher.fetch("fonts/absent.ttf").await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }
}
