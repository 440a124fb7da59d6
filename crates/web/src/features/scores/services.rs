use storage::{
    dto::voting::{JudgeProgressResponse, SubmitScoresRequest},
    models::ScoreWithJudge,
};
use uuid::Uuid;
use voting::{Result, VotingEngine};

/// All judges' scores for a car
pub async fn get_scores(engine: &VotingEngine, car_id: Uuid) -> Result<Vec<ScoreWithJudge>> {
    engine.scores_for_car(car_id).await
}

/// Replace a judge's sheet for a car and return the car's updated scores
pub async fn submit_scores(
    engine: &VotingEngine,
    car_id: Uuid,
    request: &SubmitScoresRequest,
) -> Result<Vec<ScoreWithJudge>> {
    engine
        .submit_scores(car_id, request.judge_id, request.submitted_by, &request.entries)
        .await?;
    engine.scores_for_car(car_id).await
}

pub async fn get_judge_progress(
    engine: &VotingEngine,
    judge_id: Uuid,
) -> Result<JudgeProgressResponse> {
    let scored_car_ids = engine.judge_progress(judge_id).await?;
    Ok(JudgeProgressResponse {
        judge_id,
        scored_car_ids,
    })
}
