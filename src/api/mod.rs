//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the SwipeNews backend:
//! - Auth API endpoints (signup, login, current user)
//! - News API endpoints
//! - Publisher application API endpoints

pub mod auth;
pub mod middleware;
pub mod news;
pub mod publisher;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Routes behind token verification
    let protected_routes = Router::new()
        .nest("/auth", auth::protected_router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .nest("/auth", auth::router())
        .nest("/news", news::router())
        .nest("/publisher", publisher::router())
        .merge(protected_routes)
}

/// GET / - Liveness banner
async fn root_banner() -> &'static str {
    "SwipeNews API is running..."
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000")),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(root_banner))
        .nest("/api", build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
