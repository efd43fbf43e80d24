//! Episode data source
//!
//! Page views read episodes through [`EpisodeSource`]; the running service
//! uses [`HttpEpisodeSource`] against the episodes REST API.

mod http;

pub use http::HttpEpisodeSource;

use async_trait::async_trait;
use podcastr_common::ApiEpisode;
use thiserror::Error;

/// Episode source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Episode not found: {0}")]
    NotFound(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Read-only access to episode records
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// Most recent episodes, newest first
    async fn latest(&self, limit: usize) -> Result<Vec<ApiEpisode>, SourceError>;

    /// Single episode by identifier
    async fn episode(&self, id: &str) -> Result<ApiEpisode, SourceError>;
}
