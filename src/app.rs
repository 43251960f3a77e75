use axum::Router;
use http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::routes::{health, predictions, stocks};
use crate::state::AppState;

pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/stocks", stocks::router())
        .nest("/predictions", predictions::router())
        .layer(cors)
        .with_state(state)
}

/// Single-origin CORS for the frontend dev server, credentials allowed.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, http::header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(allowed_origin)?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}
