//! Persistence seams of the engine.
//!
//! The engine never talks to a database directly. Each trait below is
//! implemented by the Postgres backend ([`crate::postgres::PgStore`]) and
//! the in-memory backend ([`crate::memory::MemoryStore`]).

use std::sync::Arc;

use async_trait::async_trait;
use storage::dto::voting::ScoreEntry;
use storage::models::{
    Ballot, Car, ContestType, JudgeQuestion, JudgeScore, NewBallot, NewSnapshotEntry,
    ScoreWithJudge, SnapshotEntry, SpecialtyContest, User, VehicleClass, VoteState,
};
use uuid::Uuid;

use crate::error::Result;

/// Current voting state per contest type
#[async_trait]
pub trait ContestStateStore: Send + Sync {
    async fn get_state(&self, contest_type: ContestType) -> Result<VoteState>;

    async fn set_state(&self, contest_type: ContestType, state: VoteState) -> Result<()>;
}

#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Delete every row for `(car_id, judge_id)` and insert `entries`.
    async fn replace_scores(
        &self,
        car_id: Uuid,
        judge_id: Uuid,
        entries: &[ScoreEntry],
    ) -> Result<()>;

    async fn scores_for_car(&self, car_id: Uuid) -> Result<Vec<ScoreWithJudge>>;

    /// Raw rows for every car of the class, in storage order.
    async fn scores_in_class(&self, class_id: Uuid) -> Result<Vec<JudgeScore>>;

    async fn scored_cars(&self, judge_id: Uuid) -> Result<Vec<Uuid>>;
}

#[async_trait]
pub trait BallotStore: Send + Sync {
    /// Insert a ballot, failing with `AlreadyVoted` if the user already has
    /// one in the contest. Must be atomic with respect to concurrent
    /// inserts for the same pair.
    async fn insert_ballot(&self, ballot: NewBallot) -> Result<Ballot>;

    async fn delete_ballot(&self, ballot_id: Uuid) -> Result<Ballot>;

    /// Ballots of a contest in the order they were cast.
    async fn ballots_for_contest(&self, contest_id: Uuid) -> Result<Vec<Ballot>>;

    async fn find_ballot(&self, contest_id: Uuid, user_id: Uuid) -> Result<Option<Ballot>>;
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Replace all rows of `result_type` with `entries` as a single unit.
    async fn replace_snapshot(
        &self,
        result_type: ContestType,
        entries: &[NewSnapshotEntry],
    ) -> Result<()>;

    async fn snapshot(
        &self,
        result_type: ContestType,
        scope_id: Uuid,
    ) -> Result<Vec<SnapshotEntry>>;
}

/// Identity, catalog and question configuration owned outside the engine.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn user(&self, user_id: Uuid) -> Result<Option<User>>;

    async fn car(&self, car_id: Uuid) -> Result<Option<Car>>;

    async fn classes(&self) -> Result<Vec<VehicleClass>>;

    async fn class(&self, class_id: Uuid) -> Result<Option<VehicleClass>>;

    async fn questions_for_class(&self, class_id: Uuid) -> Result<Vec<JudgeQuestion>>;

    async fn specialty_contests(&self) -> Result<Vec<SpecialtyContest>>;

    async fn specialty_contest(&self, contest_id: Uuid) -> Result<Option<SpecialtyContest>>;

    async fn is_listed_voter(&self, contest_id: Uuid, user_id: Uuid) -> Result<bool>;
}

/// The set of stores an engine runs against.
#[derive(Clone)]
pub struct Stores {
    pub states: Arc<dyn ContestStateStore>,
    pub scores: Arc<dyn ScoreStore>,
    pub ballots: Arc<dyn BallotStore>,
    pub snapshots: Arc<dyn SnapshotStore>,
    pub directory: Arc<dyn Directory>,
}

impl Stores {
    /// Use one backend for every store.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: ContestStateStore + ScoreStore + BallotStore + SnapshotStore + Directory + 'static,
    {
        Self {
            states: store.clone(),
            scores: store.clone(),
            ballots: store.clone(),
            snapshots: store.clone(),
            directory: store,
        }
    }
}
