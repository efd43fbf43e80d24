//! Episodes REST API client

use super::{EpisodeSource, SourceError};
use async_trait::async_trait;
use podcastr_common::ApiEpisode;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("Podcastr/", env!("CARGO_PKG_VERSION"));

/// HTTP client for `GET episodes` and `GET episodes/{id}`
pub struct HttpEpisodeSource {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpEpisodeSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| SourceError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// API URL for `segments` below the base path
    ///
    /// Each segment is percent-encoded, so an id never changes the route.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        not_found_id: &str,
    ) -> Result<T, SourceError> {
        tracing::debug!(url = %url, "Querying episodes API");

        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(not_found_id.to_string()));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SourceError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl EpisodeSource for HttpEpisodeSource {
    async fn latest(&self, limit: usize) -> Result<Vec<ApiEpisode>, SourceError> {
        let url = self.endpoint(&["episodes"])?;
        let query = [
            ("_limit", limit.to_string()),
            ("_sort", "published_at".to_string()),
            ("_order", "desc".to_string()),
        ];

        let episodes: Vec<ApiEpisode> = self.get_json(url, &query, "episodes").await?;
        tracing::debug!(count = episodes.len(), "Fetched latest episodes");
        Ok(episodes)
    }

    async fn episode(&self, id: &str) -> Result<ApiEpisode, SourceError> {
        let url = self.endpoint(&["episodes", id])?;
        self.get_json(url, &[], id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base_url: &str) -> HttpEpisodeSource {
        HttpEpisodeSource::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_with_or_without_trailing_slash() {
        for base in ["http://localhost:3333", "http://localhost:3333/"] {
            assert_eq!(
                source(base).endpoint(&["episodes"]).unwrap().as_str(),
                "http://localhost:3333/episodes"
            );
        }
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        assert_eq!(
            source("https://api.example.com/v1/").endpoint(&["episodes", "ep-1"]).unwrap().as_str(),
            "https://api.example.com/v1/episodes/ep-1"
        );
    }

    #[test]
    fn test_endpoint_encodes_id_as_one_segment() {
        assert_eq!(
            source("http://localhost:3333").endpoint(&["episodes", "a/b?c#d"]).unwrap().as_str(),
            "http://localhost:3333/episodes/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        for base in ["not a url", "mailto:podcastr@example.com"] {
            assert!(matches!(
                HttpEpisodeSource::new(base, Duration::from_secs(5)),
                Err(SourceError::InvalidUrl(_))
            ));
        }
    }
}
