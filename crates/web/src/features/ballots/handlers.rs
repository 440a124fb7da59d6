use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::voting::CastBallotRequest,
    models::{Ballot, SpecialtyContest},
};
use uuid::Uuid;

use crate::error::{ApiResult, WebError};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/specialty",
    responses(
        (status = 200, description = "Active specialty contests", body = Vec<SpecialtyContest>)
    ),
    tag = "ballots"
)]
pub async fn list_specialty_contests(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SpecialtyContest>>> {
    let contests = services::list_specialty_contests(&state.engine).await?;

    Ok(Json(contests))
}

#[utoipa::path(
    post,
    path = "/api/specialty/{contest_id}/ballots",
    params(
        ("contest_id" = Uuid, Path, description = "Specialty contest ID")
    ),
    request_body = CastBallotRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Ballot recorded", body = Ballot),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "User is not eligible for this contest"),
        (status = 404, description = "Contest, user or car not found"),
        (status = 409, description = "Voting closed, contest inactive or user already voted")
    ),
    tag = "ballots"
)]
pub async fn cast_ballot(
    State(state): State<AppState>,
    Path(contest_id): Path<Uuid>,
    Json(req): Json<CastBallotRequest>,
) -> Result<Response, WebError> {
    let ballot = services::cast_ballot(&state.engine, contest_id, req.user_id, req.car_id).await?;

    Ok((StatusCode::CREATED, Json(ballot)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/specialty/{contest_id}/ballots",
    params(
        ("contest_id" = Uuid, Path, description = "Specialty contest ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Ballots in the contest", body = Vec<Ballot>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "ballots"
)]
pub async fn list_ballots(
    State(state): State<AppState>,
    Path(contest_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Ballot>>> {
    let ballots = services::list_ballots(&state.engine, contest_id).await?;

    Ok(Json(ballots))
}

#[utoipa::path(
    get,
    path = "/api/specialty/{contest_id}/ballots/{user_id}",
    params(
        ("contest_id" = Uuid, Path, description = "Specialty contest ID"),
        ("user_id" = Uuid, Path, description = "Voter user ID")
    ),
    responses(
        (status = 200, description = "The user's ballot", body = Ballot),
        (status = 404, description = "User has not voted in this contest")
    ),
    tag = "ballots"
)]
pub async fn get_user_ballot(
    State(state): State<AppState>,
    Path((contest_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Ballot>> {
    let ballot = services::get_user_ballot(&state.engine, contest_id, user_id).await?;

    Ok(Json(ballot))
}

#[utoipa::path(
    delete,
    path = "/api/ballots/{ballot_id}",
    params(
        ("ballot_id" = Uuid, Path, description = "Ballot ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Ballot deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Ballot not found")
    ),
    tag = "ballots"
)]
pub async fn delete_ballot(
    State(state): State<AppState>,
    Path(ballot_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_ballot(&state.engine, ballot_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
