//! Episode records
//!
//! Three shapes of the same episode:
//! - [`ApiEpisode`]: wire record returned by the episodes API
//! - [`EpisodeView`]: display model used by the page views
//! - [`Episode`]: the immutable record the player works with

use crate::human_time::convert_duration;
use crate::time::format_published_at;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Playable episode record
///
/// Value type: two episodes are the same episode when all fields match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub title: String,
    /// Display names of the show participants
    pub members: String,
    pub thumbnail: String,
    /// Length in seconds
    pub duration: u64,
    /// Media source URL
    pub url: String,
}

/// Episode record as served by `GET episodes` and `GET episodes/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEpisode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub published_at: String,
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub file: ApiEpisodeFile,
}

/// Media file section of an API episode
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEpisodeFile {
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub duration: DurationValue,
}

/// Duration as found in the wild: a JSON number or a numeric string
///
/// Fractional values are floored to whole seconds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Fractional(f64),
    Text(String),
}

impl DurationValue {
    /// Duration in whole seconds
    pub fn seconds(&self) -> Result<u64> {
        match self {
            DurationValue::Seconds(secs) => Ok(*secs),
            DurationValue::Fractional(secs) => floor_seconds(*secs)
                .ok_or_else(|| Error::InvalidInput(format!("Invalid duration: {}", secs))),
            DurationValue::Text(text) => {
                let text = text.trim();
                text.parse::<u64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(floor_seconds))
                    .ok_or_else(|| Error::InvalidInput(format!("Invalid duration: {:?}", text)))
            }
        }
    }
}

fn floor_seconds(secs: f64) -> Option<u64> {
    (secs.is_finite() && secs >= 0.0).then(|| secs.floor() as u64)
}

/// Episode as rendered by the home and detail pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeView {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub members: String,
    /// Publication date formatted as `d MMM yy`
    pub published_at: String,
    pub duration: u64,
    /// Duration formatted as `HH:MM:SS`
    pub duration_string: String,
    /// Trusted HTML from the episodes API
    pub description: String,
    pub url: String,
}

impl EpisodeView {
    /// Project the record the player needs
    pub fn to_episode(&self) -> Episode {
        Episode {
            title: self.title.clone(),
            members: self.members.clone(),
            thumbnail: self.thumbnail.clone(),
            duration: self.duration,
            url: self.url.clone(),
        }
    }
}

impl TryFrom<ApiEpisode> for EpisodeView {
    type Error = Error;

    fn try_from(api: ApiEpisode) -> Result<Self> {
        let duration = api.file.duration.seconds()?;
        let published_at = format_published_at(&api.published_at)?;

        Ok(EpisodeView {
            id: api.id,
            title: api.title,
            thumbnail: api.thumbnail,
            members: api.members,
            published_at,
            duration,
            duration_string: convert_duration(duration),
            description: api.description,
            url: api.file.url,
        })
    }
}
