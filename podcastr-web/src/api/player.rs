//! Player command handlers
//!
//! Each command is applied to the shared player, which publishes the
//! resulting state on the event bus. The handler responds with that same
//! snapshot.

use super::AppState;
use crate::error::Result;
use crate::pages::render::render_player_panel;
use crate::player::MediaEvent;
use axum::{extract::State, response::Html, Json};
use podcastr_common::events::PlayerSnapshot;
use podcastr_common::Episode;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub episode: Episode,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    pub episodes: Vec<Episode>,
    pub index: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct TogglePlayRequest {
    /// Explicit play state; toggles when absent
    #[serde(default)]
    pub state: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SeekRequest {
    pub seconds: u64,
}

/// GET /api/player - Current player snapshot
pub async fn get_state(State(state): State<AppState>) -> Json<PlayerSnapshot> {
    Json(state.player.snapshot().await)
}

/// GET /api/player/panel - Player panel HTML fragment
pub async fn get_panel(State(state): State<AppState>) -> Html<String> {
    Html(render_player_panel(&state.player.snapshot().await))
}

/// POST /api/player/play - Play a single episode
pub async fn play(
    State(state): State<AppState>,
    Json(req): Json<PlayRequest>,
) -> Json<PlayerSnapshot> {
    debug!("Play: {}", req.episode.title);
    let ((), snapshot) = state.player.apply(|p| p.play(req.episode)).await;
    Json(snapshot)
}

/// POST /api/player/playlist - Replace the playlist and start at `index`
pub async fn playlist(
    State(state): State<AppState>,
    Json(req): Json<PlaylistRequest>,
) -> Result<Json<PlayerSnapshot>> {
    debug!("Playlist: {} episodes, index {}", req.episodes.len(), req.index);
    let (outcome, snapshot) = state
        .player
        .apply(|p| p.playlist(req.episodes, req.index))
        .await;
    outcome?;
    Ok(Json(snapshot))
}

/// POST /api/player/toggle-play - Toggle, or set with `{"state": bool}`
pub async fn toggle_play(
    State(state): State<AppState>,
    body: Option<Json<TogglePlayRequest>>,
) -> Json<PlayerSnapshot> {
    let explicit = body.and_then(|Json(req)| req.state);
    debug!("Toggle play: {:?}", explicit);
    let ((), snapshot) = state.player.apply(|p| p.toggle_play(explicit)).await;
    Json(snapshot)
}

/// POST /api/player/toggle-loop
pub async fn toggle_loop(State(state): State<AppState>) -> Json<PlayerSnapshot> {
    let ((), snapshot) = state.player.apply(|p| p.toggle_loop()).await;
    debug!("Looping: {}", snapshot.is_looping);
    Json(snapshot)
}

/// POST /api/player/toggle-shuffle
pub async fn toggle_shuffle(State(state): State<AppState>) -> Json<PlayerSnapshot> {
    let ((), snapshot) = state.player.apply(|p| p.toggle_shuffle()).await;
    debug!("Shuffled: {}", snapshot.is_shuffled);
    Json(snapshot)
}

/// POST /api/player/next
pub async fn next(State(state): State<AppState>) -> Json<PlayerSnapshot> {
    let ((), snapshot) = state.player.apply(|p| p.play_next()).await;
    debug!("Next: index {}", snapshot.current_index);
    Json(snapshot)
}

/// POST /api/player/previous
pub async fn previous(State(state): State<AppState>) -> Json<PlayerSnapshot> {
    let ((), snapshot) = state.player.apply(|p| p.play_previous()).await;
    debug!("Previous: index {}", snapshot.current_index);
    Json(snapshot)
}

/// POST /api/player/seek - Seek the current episode to `seconds`
pub async fn seek(
    State(state): State<AppState>,
    Json(req): Json<SeekRequest>,
) -> Json<PlayerSnapshot> {
    debug!("Seek: {}s", req.seconds);
    let ((), snapshot) = state.player.apply(|p| p.handle_seek(req.seconds)).await;
    Json(snapshot)
}

/// POST /api/player/media - Native event reported by the audio element
pub async fn media(
    State(state): State<AppState>,
    Json(event): Json<MediaEvent>,
) -> Json<PlayerSnapshot> {
    let ((), snapshot) = state.player.apply(|p| p.media_event(event)).await;
    Json(snapshot)
}
