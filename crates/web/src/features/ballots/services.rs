use storage::models::{Ballot, SpecialtyContest};
use uuid::Uuid;
use voting::{Result, VoteError, VotingEngine};

/// Active specialty contests
pub async fn list_specialty_contests(engine: &VotingEngine) -> Result<Vec<SpecialtyContest>> {
    engine.specialty_contests().await
}

pub async fn cast_ballot(
    engine: &VotingEngine,
    contest_id: Uuid,
    user_id: Uuid,
    car_id: Uuid,
) -> Result<Ballot> {
    engine.cast_ballot(contest_id, user_id, car_id).await
}

/// Every ballot cast in a contest, oldest first
pub async fn list_ballots(engine: &VotingEngine, contest_id: Uuid) -> Result<Vec<Ballot>> {
    engine.ballots_for_contest(contest_id).await
}

/// The ballot a user cast in a contest
pub async fn get_user_ballot(
    engine: &VotingEngine,
    contest_id: Uuid,
    user_id: Uuid,
) -> Result<Ballot> {
    engine
        .ballot_for_user(contest_id, user_id)
        .await?
        .ok_or(VoteError::NotFound("Ballot"))
}

pub async fn delete_ballot(engine: &VotingEngine, ballot_id: Uuid) -> Result<Ballot> {
    engine.delete_ballot(ballot_id).await
}
