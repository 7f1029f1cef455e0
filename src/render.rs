//! HTML page rendering.
//!
//! One Handlebars template renders every page: verdict block (single
//! predict), batch results table, error banner, and the session history.
//! Templates are registered once at startup and shared via [`AppState`].

use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Response};
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::logic::{Classification, Label};
use crate::models::{PredictionRecord, Verdict};
use crate::session::Session;
use crate::AppState;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.hbs");

/// Build the template registry. Called once in `main`.
pub fn build_registry() -> Result<Handlebars<'static>, Box<handlebars::TemplateError>> {
    let mut hb = Handlebars::new();
    hb.register_template_string("index", INDEX_TEMPLATE)?;
    Ok(hb)
}

/// Template context for the index page.
#[derive(Debug, Serialize, Default)]
pub struct PageContext {
    prediction: Option<VerdictView>,
    batch_results: Option<Vec<RecordView>>,
    history: Vec<RecordView>,
    error: Option<String>,
}

impl PageContext {
    pub fn with_history(history: Vec<PredictionRecord>) -> Self {
        Self {
            history: history.into_iter().map(RecordView::from).collect(),
            ..Default::default()
        }
    }

    pub fn prediction(mut self, url: &str, result: &Classification) -> Self {
        self.prediction = Some(VerdictView::new(url, result));
        self
    }

    pub fn batch_results(mut self, results: Vec<PredictionRecord>) -> Self {
        self.batch_results = Some(results.into_iter().map(RecordView::from).collect());
        self
    }

    pub fn error(mut self, message: String) -> Self {
        self.error = Some(message);
        self
    }
}

/// Single-predict verdict block.
#[derive(Debug, Serialize)]
struct VerdictView {
    headline: String,
    url: String,
    color: &'static str,
}

impl VerdictView {
    fn new(url: &str, result: &Classification) -> Self {
        let (headline, color) = match result.label {
            Label::Safe => (
                format!("🔒 Safe Website ({}% confidence)", result.confidence),
                "green",
            ),
            Label::Malicious => (
                format!("⚠️ Malicious Website ({}% confidence)", result.confidence),
                "red",
            ),
        };
        Self {
            headline,
            url: url.to_string(),
            color,
        }
    }
}

/// One row of the batch-results or history table.
#[derive(Debug, Serialize)]
struct RecordView {
    url: String,
    label: String,
    confidence: f64,
    color: &'static str,
}

impl From<PredictionRecord> for RecordView {
    fn from(record: PredictionRecord) -> Self {
        let color = match record.label {
            Verdict::Safe => "green",
            Verdict::Malicious => "red",
            Verdict::Error => "gray",
        };
        Self {
            url: record.url,
            label: record.label.to_string(),
            confidence: record.confidence,
            color,
        }
    }
}

/// Render the index page, attaching the session cookie on first contact.
pub fn page(state: &AppState, session: &Session, ctx: PageContext) -> AppResult<Response> {
    let body = state.templates.render("index", &ctx)?;

    let mut response = Html(body).into_response();
    if let Some(cookie) = session.set_cookie() {
        let value = cookie
            .parse()
            .map_err(|_| AppError::InternalError("invalid session cookie value".to_string()))?;
        response.headers_mut().insert(SET_COOKIE, value);
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_builds() {
        assert!(build_registry().is_ok());
    }

    #[test]
    fn history_renders_in_given_order() {
        let hb = build_registry().unwrap();
        let ctx = PageContext::with_history(vec![
            PredictionRecord::new("http://newest.com", Verdict::Malicious, 91.2),
            PredictionRecord::new("http://older.com", Verdict::Safe, 77.5),
        ]);
        let html = hb.render("index", &ctx).unwrap();

        let newest = html.find("http://newest.com").unwrap();
        let older = html.find("http://older.com").unwrap();
        assert!(newest < older);
        assert!(html.contains("Malicious"));
    }

    #[test]
    fn error_banner_renders() {
        let hb = build_registry().unwrap();
        let ctx = PageContext::with_history(vec![]).error("Error reading file: file is empty".to_string());
        let html = hb.render("index", &ctx).unwrap();
        assert!(html.contains("Error reading file"));
    }
}
