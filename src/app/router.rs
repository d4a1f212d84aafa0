use super::state::AppState;
use crate::handler::analyze::analyze_handler;
use crate::handler::form::index_handler;
use crate::handler::health::health_handler;
use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Build the HTTP router (form + result pages, health).
pub fn main_router(state: AppState) -> Router {
    let v1_health_router = Router::new().route("/v1/health", get(health_handler));

    let page_router = Router::new()
        .route("/", get(index_handler).post(analyze_handler))
        .with_state(state);

    Router::new()
        .merge(v1_health_router)
        .merge(page_router)
        .layer(TraceLayer::new_for_http())
}
