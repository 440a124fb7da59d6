use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    dto::voting::{JudgeProgressResponse, SubmitScoresRequest},
    models::ScoreWithJudge,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/cars/{car_id}/scores",
    params(
        ("car_id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Scores for the car with judge names", body = Vec<ScoreWithJudge>),
        (status = 404, description = "Car not found")
    ),
    tag = "scores"
)]
pub async fn get_scores(
    State(state): State<AppState>,
    Path(car_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ScoreWithJudge>>> {
    let scores = services::get_scores(&state.engine, car_id).await?;

    Ok(Json(scores))
}

#[utoipa::path(
    put,
    path = "/api/cars/{car_id}/scores",
    params(
        ("car_id" = Uuid, Path, description = "Car ID")
    ),
    request_body = SubmitScoresRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Score sheet replaced", body = Vec<ScoreWithJudge>),
        (status = 400, description = "Duplicate question or score out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Submitter may not score for this judge"),
        (status = 404, description = "Car, judge or question not found"),
        (status = 409, description = "Judging is not open")
    ),
    tag = "scores"
)]
pub async fn submit_scores(
    State(state): State<AppState>,
    Path(car_id): Path<Uuid>,
    Json(req): Json<SubmitScoresRequest>,
) -> ApiResult<Json<Vec<ScoreWithJudge>>> {
    req.validate()?;

    let scores = services::submit_scores(&state.engine, car_id, &req).await?;

    Ok(Json(scores))
}

#[utoipa::path(
    get,
    path = "/api/judges/{judge_id}/progress",
    params(
        ("judge_id" = Uuid, Path, description = "Judge user ID")
    ),
    responses(
        (status = 200, description = "Cars the judge has scored", body = JudgeProgressResponse),
        (status = 404, description = "Judge not found")
    ),
    tag = "scores"
)]
pub async fn get_judge_progress(
    State(state): State<AppState>,
    Path(judge_id): Path<Uuid>,
) -> ApiResult<Json<JudgeProgressResponse>> {
    let progress = services::get_judge_progress(&state.engine, judge_id).await?;

    Ok(Json(progress))
}
