pub mod request_id;

use axum::{extract::DefaultBodyLimit, middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, podcast::PodcastController};
use crate::infrastructure::config::Config;
use crate::infrastructure::storage::AudioStorage;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn build_router(
    podcast_controller: Arc<PodcastController>,
    storage: Arc<AudioStorage>,
    max_upload_bytes: usize,
) -> Router {
    // Synthesis and voice routes
    let podcast_routes = Router::new()
        .route("/", get(PodcastController::index))
        .route("/api/voices", get(PodcastController::list_voices))
        .route("/api/generate", post(PodcastController::generate))
        .route("/api/tts/synthesize", post(PodcastController::synthesize))
        .route("/api/upload", post(PodcastController::upload))
        .route("/download/:filename", get(PodcastController::download))
        .with_state(podcast_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(storage)
        .merge(podcast_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

/// Layers that depend on the deployment environment
pub fn with_environment(app: Router, config: &Config) -> Router {
    if config.is_development() {
        // The form may be served from a separate dev server
        tracing::info!("Development environment, allowing cross-origin requests");
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    podcast_controller: Arc<PodcastController>,
    storage: Arc<AudioStorage>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = with_environment(
        build_router(podcast_controller, storage, config.max_upload_bytes),
        &config,
    );

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
