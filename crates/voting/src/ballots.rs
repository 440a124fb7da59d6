//! Specialty ballot ledger.

use storage::models::{Ballot, ContestType, NewBallot, SpecialtyContest};
use uuid::Uuid;

use crate::engine::VotingEngine;
use crate::error::{Result, VoteError};

impl VotingEngine {
    /// Record a user's single vote in a specialty contest.
    ///
    /// Checks run in order: contest exists and is active, specialty voting
    /// is open, the user is eligible, the car is in the contest's scope,
    /// and finally the ledger's own one-ballot-per-user guard.
    pub async fn cast_ballot(&self, contest_id: Uuid, user_id: Uuid, car_id: Uuid) -> Result<Ballot> {
        let contest = self.specialty_contest(contest_id).await?;
        if !contest.is_active {
            return Err(VoteError::InactiveContest);
        }

        let _open = self.ensure_open(ContestType::Specialty).await?;

        self.stores
            .directory
            .user(user_id)
            .await?
            .ok_or(VoteError::NotFound("User"))?;

        if !contest.allow_all_users
            && !self
                .stores
                .directory
                .is_listed_voter(contest_id, user_id)
                .await?
        {
            tracing::warn!(contest_id = %contest_id, user_id = %user_id, "Ineligible ballot rejected");
            return Err(VoteError::NotEligible);
        }

        let car = self
            .stores
            .directory
            .car(car_id)
            .await?
            .ok_or(VoteError::NotFound("Car"))?;
        if !contest.covers(&car) {
            return Err(VoteError::NotFound("Car in contest scope"));
        }

        let ballot = self
            .stores
            .ballots
            .insert_ballot(NewBallot {
                contest_id,
                user_id,
                car_id,
            })
            .await?;

        tracing::debug!(
            contest_id = %contest_id,
            user_id = %user_id,
            car_id = %car_id,
            "Ballot cast"
        );

        Ok(ballot)
    }

    /// Remove a mistaken ballot. The user may vote again afterwards.
    pub async fn delete_ballot(&self, ballot_id: Uuid) -> Result<Ballot> {
        let ballot = self.stores.ballots.delete_ballot(ballot_id).await?;

        tracing::info!(
            ballot_id = %ballot_id,
            contest_id = %ballot.contest_id,
            user_id = %ballot.user_id,
            "Ballot deleted"
        );

        Ok(ballot)
    }

    pub async fn ballots_for_contest(&self, contest_id: Uuid) -> Result<Vec<Ballot>> {
        self.specialty_contest(contest_id).await?;
        self.stores.ballots.ballots_for_contest(contest_id).await
    }

    pub async fn ballot_for_user(&self, contest_id: Uuid, user_id: Uuid) -> Result<Option<Ballot>> {
        self.specialty_contest(contest_id).await?;
        self.stores.ballots.find_ballot(contest_id, user_id).await
    }

    /// Active specialty contests
    pub async fn specialty_contests(&self) -> Result<Vec<SpecialtyContest>> {
        let contests = self.stores.directory.specialty_contests().await?;
        Ok(contests.into_iter().filter(|c| c.is_active).collect())
    }

    async fn specialty_contest(&self, contest_id: Uuid) -> Result<SpecialtyContest> {
        self.stores
            .directory
            .specialty_contest(contest_id)
            .await?
            .ok_or(VoteError::NotFound("Specialty contest"))
    }
}
