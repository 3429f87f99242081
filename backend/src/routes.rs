// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{files, render},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Nests the file and render APIs under `/api`.
/// * Serves the viewer page from the static directory for everything else.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let file_routes = Router::new()
        .route("/", get(files::list_files))
        .route("/{name}", get(files::get_file))
        .route("/{name}/raw", get(files::get_raw));

    let api_routes = Router::new()
        .nest("/files", file_routes)
        .route("/preview", post(render::preview))
        .route("/render", post(render::render_delta))
        .route("/sanitize", post(render::sanitize_html));

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(static_files)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
