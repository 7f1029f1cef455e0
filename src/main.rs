//! PhishGuard server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishguard::{config::Config, create_router, history::HistoryStore, logic::LogisticModel, render, AppState};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phishguard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("PhishGuard server starting...");
    tracing::info!("Model artifact: {}", config.model_path);

    // Load the pre-trained classifier once; it is read-only afterwards.
    let model = LogisticModel::load(&config.model_path).expect("Failed to load model artifact");

    // Register page templates
    let templates = render::build_registry().expect("Failed to register templates");

    // Build application state
    let state = AppState {
        classifier: Arc::new(model),
        history: HistoryStore::new(),
        templates: Arc::new(templates),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
