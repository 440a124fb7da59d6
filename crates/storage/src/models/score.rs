use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JudgeScore {
    pub judge_id: Uuid,
    pub car_id: Uuid,
    pub question_id: Uuid,
    pub score: i32,
    pub scored_at: DateTime<Utc>,
}

/// Score row joined with the judge and question it belongs to, for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoreWithJudge {
    pub judge_id: Uuid,
    pub judge_name: String,
    pub car_id: Uuid,
    pub question_id: Uuid,
    pub question_name: String,
    pub category_name: String,
    pub score: i32,
    pub scored_at: DateTime<Utc>,
}
