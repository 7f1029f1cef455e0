//! History handlers

use axum::extract::State;
use axum::response::Response;

use crate::error::AppResult;
use crate::render::{self, PageContext};
use crate::session::Session;
use crate::AppState;

/// Drop all history for the session and render the empty page.
pub async fn clear(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    state.history.clear(session.id);
    tracing::debug!(session = %session.id, "history cleared");
    render::page(&state, &session, PageContext::with_history(Vec::new()))
}
