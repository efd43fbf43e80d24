//! podcastr-web library
//!
//! Podcast listing pages with a persistent, server-driven audio player.
//!
//! The server owns the playback state. Browsers render the pages, apply the
//! media commands streamed over SSE to their audio element and report the
//! element's native events back through the player API.

pub mod api;
pub mod error;
pub mod pages;
pub mod player;
pub mod source;
pub mod state;

pub use api::{create_router, AppState};
pub use error::{Error, Result};
