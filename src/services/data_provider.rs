//! Character feed retrieval.
//!
//! The feed lives at `{base_url}data/data.json`. The URL is built by plain
//! concatenation, so the base URL is expected to end with a slash.

use crate::metrics::CarouselMetrics;
use crate::models::CharacterEntry;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Path of the feed relative to the base URL.
pub const FEED_PATH: &str = "data/data.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that can occur while fetching the character feed
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Base URL is empty")]
    EmptyBaseUrl,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Feed at {url} is not a character list: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Anything that can produce the character feed for a base URL.
pub trait CharacterSource: Send + Sync {
    fn fetch(
        &self,
        base_url: &str,
    ) -> impl Future<Output = Result<Vec<CharacterEntry>, FetchError>> + Send;
}

/// Full feed URL for `base_url`.
pub fn feed_url(base_url: &str) -> Result<String, FetchError> {
    if base_url.is_empty() {
        return Err(FetchError::EmptyBaseUrl);
    }
    Ok(format!("{}{}", base_url, FEED_PATH))
}

/// Fetches the feed over HTTP. One attempt per call, no caching.
#[derive(Debug, Clone)]
pub struct HttpCharacterProvider {
    client: reqwest::Client,
}

impl HttpCharacterProvider {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl CharacterSource for HttpCharacterProvider {
    async fn fetch(&self, base_url: &str) -> Result<Vec<CharacterEntry>, FetchError> {
        let url = feed_url(base_url)?;
        tracing::debug!("Fetching character feed from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status(),
            });
        }

        let characters: Vec<CharacterEntry> = response
            .json()
            .await
            .map_err(|source| FetchError::Decode {
                url: url.clone(),
                source,
            })?;

        tracing::info!("Fetched {} characters from {}", characters.len(), url);
        Ok(characters)
    }
}

/// Fetch the feed, degrading to an empty list on any failure.
///
/// The failure is logged and counted; the page then renders with no slides.
pub async fn load_characters<S: CharacterSource>(
    source: &S,
    base_url: &str,
    metrics: &CarouselMetrics,
) -> Vec<CharacterEntry> {
    match source.fetch(base_url).await {
        Ok(characters) => characters,
        Err(e) => {
            tracing::error!("An error occurred while fetching characters: {}", e);
            metrics.record_fetch_failure();
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url_concatenates() {
        assert_eq!(
            feed_url("https://dbz.test/").unwrap(),
            "https://dbz.test/data/data.json"
        );
        // No separator is inserted
        assert_eq!(
            feed_url("https://dbz.test").unwrap(),
            "https://dbz.testdata/data.json"
        );
    }

    #[test]
    fn test_feed_url_rejects_empty_base() {
        assert!(matches!(feed_url(""), Err(FetchError::EmptyBaseUrl)));
    }

    #[tokio::test]
    async fn test_empty_base_url_never_hits_network() {
        let provider = HttpCharacterProvider::new().unwrap();
        let result = provider.fetch("").await;
        assert!(matches!(result, Err(FetchError::EmptyBaseUrl)));
    }

    #[tokio::test]
    async fn test_load_characters_degrades() {
        let provider = HttpCharacterProvider::new().unwrap();
        let metrics = CarouselMetrics::new();

        let characters = load_characters(&provider, "", &metrics).await;

        assert!(characters.is_empty());
        assert_eq!(
            metrics
                .fetch_failures
                .load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }
}
