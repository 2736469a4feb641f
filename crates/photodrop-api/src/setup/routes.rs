//! Route configuration and setup

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::post,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::upload;
use crate::state::AppState;

/// Build the application router. POST carries the upload; GET answers with
/// a usage hint; OPTIONS exists for CORS preflight; every other method gets
/// a JSON 405 instead of axum's bare default.
pub fn setup_routes(state: AppState) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(&state)?;
    // DefaultBodyLimit must cover the file plus multipart framing, otherwise
    // axum rejects large uploads before the handler can report the size cap.
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes());

    let router = Router::new()
        .route(
            "/api/upload",
            post(upload::upload)
                .get(upload::upload_hint)
                .options(upload::upload_options)
                .fallback(upload::method_not_allowed),
        )
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

fn setup_cors(state: &AppState) -> Result<CorsLayer, anyhow::Error> {
    let origins = &state.config.cors_origins;
    let cors = if origins.is_empty() || origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    } else {
        let parsed: Result<Vec<HeaderValue>, _> = origins.iter().map(|o| o.parse()).collect();
        let parsed =
            parsed.map_err(|_| anyhow::anyhow!("ALLOWED_ORIGINS contains an invalid origin"))?;
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    };
    Ok(cors)
}
