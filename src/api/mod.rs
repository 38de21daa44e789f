use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use axum::http::{HeaderValue, Method};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::Config;

pub mod handlers;
pub mod models;

pub fn create_router(config: Arc<Config>) -> Router {
    let origin = config.allowed_origin.clone();

    // Preflight handling for the widget's origin.
    let cors = CorsLayer::new()
        .allow_origin(origin.clone())
        .allow_credentials(true)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/suggest", get(handlers::suggest_handler))
        .with_state(config)
        .layer(cors)
        // Every response carries these, whatever path produced it.
        .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_ORIGIN, origin))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
        .layer(TraceLayer::new_for_http())
}
