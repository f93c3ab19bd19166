pub mod products;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use crate::state::AppState;

/// Base path every endpoint is nested under.
pub const BASE_PATH: &str = "/info-market";

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
}

/// The full application: API routes, health endpoints and middleware.
pub fn app(state: AppState) -> Router {
    let api = create_router()
        .route("/", get(|| async { "info-market API" }))
        .route("/health", get(health_check));

    Router::new()
        .nest(BASE_PATH, api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
