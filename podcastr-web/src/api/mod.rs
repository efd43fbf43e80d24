//! HTTP API for podcastr-web
//!
//! Server-rendered pages, player commands and the SSE event stream.

pub mod handlers;
pub mod pages;
pub mod player;
pub mod sse;

use crate::pages::PageStore;
use crate::state::SharedState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub player: Arc<SharedState>,
    pub pages: Arc<PageStore>,
}

impl AppState {
    pub fn new(player: Arc<SharedState>, pages: Arc<PageStore>) -> Self {
        Self { player, pages }
    }
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/episodes/:id", get(pages::episode))
        .route("/static/player.js", get(handlers::player_script))

        // Health and build info
        .route("/health", get(handlers::health))
        .route("/api/buildinfo", get(handlers::build_info))

        // Player state and commands
        .route("/api/player", get(player::get_state))
        .route("/api/player/panel", get(player::get_panel))
        .route("/api/player/play", post(player::play))
        .route("/api/player/playlist", post(player::playlist))
        .route("/api/player/toggle-play", post(player::toggle_play))
        .route("/api/player/toggle-loop", post(player::toggle_loop))
        .route("/api/player/toggle-shuffle", post(player::toggle_shuffle))
        .route("/api/player/next", post(player::next))
        .route("/api/player/previous", post(player::previous))
        .route("/api/player/seek", post(player::seek))
        .route("/api/player/media", post(player::media))

        // SSE event stream
        .route("/api/events", get(sse::event_stream))

        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
