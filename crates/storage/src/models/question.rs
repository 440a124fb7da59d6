use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A judging question with its inclusive score bounds, flattened with the
/// category it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JudgeQuestion {
    pub question_id: Uuid,
    pub category_id: Uuid,
    pub class_id: Uuid,
    pub category_name: String,
    pub name: String,
    pub min_score: i32,
    pub max_score: i32,
}

impl JudgeQuestion {
    pub fn accepts(&self, value: i32) -> bool {
        (self.min_score..=self.max_score).contains(&value)
    }
}
