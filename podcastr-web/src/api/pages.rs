//! Server-rendered page handlers

use super::AppState;
use crate::error::Error;
use crate::pages::render::{render_document, render_episode, render_error, render_home};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Local;
use podcastr_common::time::format_header_date;
use tracing::{debug, warn};

async fn document(state: &AppState, title: &str, content: &str) -> String {
    let snapshot = state.player.page_snapshot().await;
    render_document(title, content, &snapshot, &format_header_date(Local::now()))
}

async fn error_page(state: &AppState, error: Error) -> Response {
    let status = error.status_code();
    warn!("Page request failed ({}): {}", status.as_u16(), error);

    let message = match status {
        StatusCode::NOT_FOUND => "Episódio não encontrado".to_string(),
        _ => error.to_string(),
    };
    let html = document(state, "Erro", &render_error(status.as_u16(), &message)).await;
    (status, Html(html)).into_response()
}

/// GET / - Home page
pub async fn home(State(state): State<AppState>) -> Response {
    match state.pages.home().await {
        Ok(home) => {
            debug!("Rendering home page");
            Html(document(&state, "Home", &render_home(&home)).await).into_response()
        }
        Err(e) => error_page(&state, e).await,
    }
}

/// GET /episodes/:id - Episode detail page
pub async fn episode(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.pages.episode(&id).await {
        Ok(episode) => {
            debug!("Rendering episode page {}", id);
            Html(document(&state, &episode.title, &render_episode(&episode)).await).into_response()
        }
        Err(e) => error_page(&state, e).await,
    }
}
