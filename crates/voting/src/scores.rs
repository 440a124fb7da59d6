//! Judge score ledger.

use std::collections::HashSet;

use storage::dto::voting::ScoreEntry;
use storage::models::{ContestType, JudgeQuestion, ScoreWithJudge, UserRole};
use uuid::Uuid;

use crate::engine::VotingEngine;
use crate::error::{Result, VoteError};

impl VotingEngine {
    /// Replace the judge's full score sheet for a car.
    ///
    /// Questions left out of `entries` lose their previous score. When
    /// `submitted_by` names someone other than the judge, that user must be
    /// an admin re-scoring on the judge's behalf.
    pub async fn submit_scores(
        &self,
        car_id: Uuid,
        judge_id: Uuid,
        submitted_by: Option<Uuid>,
        entries: &[ScoreEntry],
    ) -> Result<()> {
        let _open = self.ensure_open(ContestType::Judge).await?;

        let car = self
            .stores
            .directory
            .car(car_id)
            .await?
            .ok_or(VoteError::NotFound("Car"))?;

        self.authorize_scorer(judge_id, submitted_by).await?;

        let questions = self.stores.directory.questions_for_class(car.class_id).await?;
        validate_sheet(&questions, entries)?;

        self.stores
            .scores
            .replace_scores(car_id, judge_id, entries)
            .await?;

        tracing::debug!(
            car_id = %car_id,
            judge_id = %judge_id,
            entries = entries.len(),
            "Judge scores replaced"
        );

        Ok(())
    }

    pub async fn scores_for_car(&self, car_id: Uuid) -> Result<Vec<ScoreWithJudge>> {
        self.stores
            .directory
            .car(car_id)
            .await?
            .ok_or(VoteError::NotFound("Car"))?;

        self.stores.scores.scores_for_car(car_id).await
    }

    /// Cars the judge has already scored
    pub async fn judge_progress(&self, judge_id: Uuid) -> Result<Vec<Uuid>> {
        self.stores
            .directory
            .user(judge_id)
            .await?
            .ok_or(VoteError::NotFound("Judge"))?;

        self.stores.scores.scored_cars(judge_id).await
    }

    async fn authorize_scorer(&self, judge_id: Uuid, submitted_by: Option<Uuid>) -> Result<()> {
        let judge = self
            .stores
            .directory
            .user(judge_id)
            .await?
            .ok_or(VoteError::NotFound("Judge"))?;

        if !matches!(judge.role, UserRole::Judge | UserRole::Admin) {
            return Err(VoteError::NotAuthorized);
        }

        if let Some(actor_id) = submitted_by
            && actor_id != judge_id
        {
            let actor = self
                .stores
                .directory
                .user(actor_id)
                .await?
                .ok_or(VoteError::NotFound("User"))?;

            if actor.role != UserRole::Admin {
                return Err(VoteError::NotAuthorized);
            }

            tracing::info!(
                judge_id = %judge_id,
                admin_id = %actor_id,
                "Admin re-scoring on behalf of judge"
            );
        }

        Ok(())
    }
}

fn validate_sheet(questions: &[JudgeQuestion], entries: &[ScoreEntry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());

    for entry in entries {
        if !seen.insert(entry.question_id) {
            return Err(VoteError::InvalidSubmission(format!(
                "question {} scored more than once",
                entry.question_id
            )));
        }

        let question = questions
            .iter()
            .find(|q| q.question_id == entry.question_id)
            .ok_or(VoteError::NotFound("Question"))?;

        if !question.accepts(entry.value) {
            return Err(VoteError::OutOfRange {
                question_id: entry.question_id,
                value: entry.value,
                min: question.min_score,
                max: question.max_score,
            });
        }
    }

    Ok(())
}
