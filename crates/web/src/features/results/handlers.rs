use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    dto::results::{AggregatedResults, PublishedResultsResponse},
    models::ContestType,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/results/{contest_type}/{scope_id}",
    params(
        ("contest_type" = ContestType, Path, description = "judge or specialty"),
        ("scope_id" = Uuid, Path, description = "Vehicle class ID for judge results, contest ID for specialty results")
    ),
    responses(
        (status = 200, description = "Live results computed from the ledgers", body = AggregatedResults),
        (status = 404, description = "Scope not found")
    ),
    tag = "results"
)]
pub async fn get_aggregated_results(
    State(state): State<AppState>,
    Path((contest_type, scope_id)): Path<(ContestType, Uuid)>,
) -> ApiResult<Json<AggregatedResults>> {
    let results = services::get_aggregated_results(&state.engine, contest_type, scope_id).await?;

    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/results/{contest_type}/{scope_id}/published",
    params(
        ("contest_type" = ContestType, Path, description = "Result type: judge or specialty"),
        ("scope_id" = Uuid, Path, description = "Vehicle class ID or specialty contest ID")
    ),
    responses(
        (status = 200, description = "Snapshot frozen by the last lock, empty if none", body = PublishedResultsResponse)
    ),
    tag = "results"
)]
pub async fn get_published_results(
    State(state): State<AppState>,
    Path((result_type, scope_id)): Path<(ContestType, Uuid)>,
) -> ApiResult<Json<PublishedResultsResponse>> {
    let response = services::get_published_results(&state.engine, result_type, scope_id).await?;

    Ok(Json(response))
}
