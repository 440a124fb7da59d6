use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    dto::voting::{ContestStateResponse, SetStateRequest, StateTransitionResponse},
    models::ContestType,
};

use crate::error::ApiResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/contests/{contest_type}/state",
    params(
        ("contest_type" = ContestType, Path, description = "judge or specialty")
    ),
    responses(
        (status = 200, description = "Current voting state", body = ContestStateResponse)
    ),
    tag = "contests"
)]
pub async fn get_contest_state(
    State(state): State<AppState>,
    Path(contest_type): Path<ContestType>,
) -> ApiResult<Json<ContestStateResponse>> {
    let response = services::get_contest_state(&state.engine, contest_type).await?;

    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/contests/{contest_type}/state",
    params(
        ("contest_type" = ContestType, Path, description = "judge or specialty")
    ),
    request_body = SetStateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "State changed; locking also publishes results", body = StateTransitionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Transition not allowed from the current state"),
        (status = 500, description = "Publication failed, state unchanged")
    ),
    tag = "contests"
)]
pub async fn set_contest_state(
    State(state): State<AppState>,
    Path(contest_type): Path<ContestType>,
    Json(req): Json<SetStateRequest>,
) -> ApiResult<Json<StateTransitionResponse>> {
    let response = services::set_contest_state(&state.engine, contest_type, req.state).await?;

    Ok(Json(response))
}
