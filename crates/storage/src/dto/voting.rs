use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{ContestType, VoteState};

use super::results::PublishSummary;

/// Request payload for changing a contest's voting state
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetStateRequest {
    pub state: VoteState,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContestStateResponse {
    pub contest_type: ContestType,
    pub state: VoteState,
}

/// Outcome of an accepted state change. `published` is set when the change
/// locked the contest and froze a new snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StateTransitionResponse {
    pub contest_type: ContestType,
    pub from: VoteState,
    pub to: VoteState,
    pub published: Option<PublishSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreEntry {
    pub question_id: Uuid,
    pub value: i32,
}

/// Full score sheet from one judge for one car.
///
/// Replaces every score the judge previously gave the car. `submitted_by`
/// is set when an admin re-scores on the judge's behalf.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitScoresRequest {
    pub judge_id: Uuid,

    pub submitted_by: Option<Uuid>,

    #[validate(custom(function = "validate_unique_questions"))]
    pub entries: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CastBallotRequest {
    pub user_id: Uuid,
    pub car_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeProgressResponse {
    pub judge_id: Uuid,
    pub scored_car_ids: Vec<Uuid>,
}

#[allow(clippy::ptr_arg)]
fn validate_unique_questions(entries: &Vec<ScoreEntry>) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(entries.len());
    if entries.iter().all(|entry| seen.insert(entry.question_id)) {
        Ok(())
    } else {
        let mut error = ValidationError::new("duplicate_question");
        error.message = Some("Each question may only be scored once per submission".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_questions_rejected() {
        let question_id = Uuid::new_v4();
        let req = SubmitScoresRequest {
            judge_id: Uuid::new_v4(),
            submitted_by: None,
            entries: vec![
                ScoreEntry { question_id, value: 5 },
                ScoreEntry { question_id, value: 7 },
            ],
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_sheet_is_valid() {
        let req = SubmitScoresRequest {
            judge_id: Uuid::new_v4(),
            submitted_by: None,
            entries: Vec::new(),
        };

        assert!(req.validate().is_ok());
    }
}
