//! # Podcastr Common Library
//!
//! Shared code for the Podcastr service crates:
//! - Error and Result types
//! - Bootstrap configuration loading
//! - Episode records (wire format, page view model, player record)
//! - Player event types and the event bus
//! - Duration and date display formatting

pub mod config;
pub mod episode;
pub mod error;
pub mod events;
pub mod human_time;
pub mod time;

pub use episode::{ApiEpisode, Episode, EpisodeView};
pub use error::{Error, Result};
pub use human_time::convert_duration;
