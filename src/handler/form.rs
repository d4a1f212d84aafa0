use crate::app::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use tracing::error;

/// Handler for GET / (the email form)
pub async fn index_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    state.pages.index().map(Html).map_err(|e| {
        error!("Failed to render form page: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page")
    })
}
