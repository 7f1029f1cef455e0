//! PhishGuard - Phishing URL Detection Web Server
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       PHISHGUARD                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌───────────────────────┐ │
//! │  │  HTTP     │  │  Feature     │  │  Classifier           │ │
//! │  │  Handlers │─▶│  Extractor   │─▶│  (pre-trained model)  │ │
//! │  │  (Axum)   │  │  (7 lexical) │  │                       │ │
//! │  └─────┬─────┘  └──────────────┘  └───────────────────────┘ │
//! │        ▼                                                    │
//! │  ┌─────────────────┐      ┌──────────────────────────────┐ │
//! │  │ Session History │      │ HTML Rendering (Handlebars)  │ │
//! │  │ (in-memory)     │      │                              │ │
//! │  └─────────────────┘      └──────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod history;
pub mod logic;
pub mod models;
pub mod render;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};
use handlebars::Handlebars;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};

use history::HistoryStore;
use logic::UrlClassifier;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn UrlClassifier>,
    pub history: HistoryStore,
    pub templates: Arc<Handlebars<'static>>,
    pub config: config::Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home::index))
        .route("/predict", post(handlers::predict::submit))
        .route("/batch", post(handlers::batch::upload))
        .route("/clear-history", post(handlers::history::clear))
        .route("/health", get(handlers::health::check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
