use axum::{Router, routing::get};

use super::handlers::{get_aggregated_results, get_published_results};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:contest_type/:scope_id", get(get_aggregated_results))
        .route("/:contest_type/:scope_id/published", get(get_published_results))
}
