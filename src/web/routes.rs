use super::handlers;
use super::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::home::index))
        .route("/health", get(handlers::api::health))
        .route(
            "/webhook",
            post(handlers::capture::receive).layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
        .route(
            "/api/webhooks",
            get(handlers::api::list_webhooks).delete(handlers::api::delete_webhooks),
        )
        .route("/api/webhooks/:id", get(handlers::api::get_webhook))
}
