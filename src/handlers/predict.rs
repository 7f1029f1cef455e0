//! Single-URL prediction handler

use axum::extract::State;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;

use crate::error::AppResult;
use crate::logic::FeatureVector;
use crate::models::PredictionRecord;
use crate::render::{self, PageContext};
use crate::session::Session;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictForm {
    pub url: String,
}

/// Classify one URL and prepend the result to the session history.
///
/// The URL is taken as-is, with no syntax validation. A classifier
/// failure surfaces as a 500 and writes no history.
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PredictForm>,
) -> AppResult<Response> {
    let features = FeatureVector::extract(&form.url);
    let result = state.classifier.classify(&features)?;

    tracing::debug!(url = %form.url, label = ?result.label, confidence = result.confidence, "classified URL");

    let record = PredictionRecord::new(&form.url, result.label.into(), result.confidence);
    state.history.append(session.id, vec![record]);

    let ctx = PageContext::with_history(state.history.read(session.id))
        .prediction(&form.url, &result);
    render::page(&state, &session, ctx)
}
