//! Home page handler

use axum::extract::State;
use axum::response::Response;

use crate::error::AppResult;
use crate::render::{self, PageContext};
use crate::session::Session;
use crate::AppState;

/// Render the current session history. No mutation.
pub async fn index(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let history = state.history.read(session.id);
    render::page(&state, &session, PageContext::with_history(history))
}
