//! Dashboard routes.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use billbook_db::repositories::DashboardRepository;

use crate::{AppState, error::ApiError};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// GET /dashboard
///
/// Counts, ledger totals and the number of low-stock products, computed fresh.
async fn get_dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = DashboardRepository::new((*state.db).clone());
    let summary = repo.summary().await?;
    Ok(Json(summary))
}
