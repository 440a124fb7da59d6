use async_trait::async_trait;
use storage::Database;
use storage::dto::voting::ScoreEntry;
use storage::error::StorageError;
use storage::models::{
    Ballot, Car, ContestType, JudgeQuestion, JudgeScore, NewBallot, NewSnapshotEntry,
    ScoreWithJudge, SnapshotEntry, SpecialtyContest, User, VehicleClass, VoteState,
};
use storage::repository::{
    ballot::BallotRepository, contest_state::ContestStateRepository,
    directory::DirectoryRepository, score::ScoreRepository, snapshot::SnapshotRepository,
};
use uuid::Uuid;

use crate::error::{Result, VoteError};
use crate::store::{BallotStore, ContestStateStore, Directory, ScoreStore, SnapshotStore};

/// Postgres backend over the `storage` repositories
#[derive(Debug, Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContestStateStore for PgStore {
    async fn get_state(&self, contest_type: ContestType) -> Result<VoteState> {
        let repo = ContestStateRepository::new(self.db.pool());
        match repo.get_state(contest_type).await {
            Ok(state) => Ok(state),
            // A missing row means the contest was never opened.
            Err(StorageError::NotFound) => Ok(VoteState::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_state(&self, contest_type: ContestType, state: VoteState) -> Result<()> {
        let repo = ContestStateRepository::new(self.db.pool());
        Ok(repo.set_state(contest_type, state).await?)
    }
}

#[async_trait]
impl ScoreStore for PgStore {
    async fn replace_scores(
        &self,
        car_id: Uuid,
        judge_id: Uuid,
        entries: &[ScoreEntry],
    ) -> Result<()> {
        let repo = ScoreRepository::new(self.db.pool());
        repo.replace_for_judge(car_id, judge_id, entries)
            .await
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    VoteError::NotFound("Car or question")
                } else {
                    VoteError::from(e)
                }
            })
    }

    async fn scores_for_car(&self, car_id: Uuid) -> Result<Vec<ScoreWithJudge>> {
        let repo = ScoreRepository::new(self.db.pool());
        Ok(repo.list_for_car(car_id).await?)
    }

    async fn scores_in_class(&self, class_id: Uuid) -> Result<Vec<JudgeScore>> {
        let repo = ScoreRepository::new(self.db.pool());
        Ok(repo.list_for_class(class_id).await?)
    }

    async fn scored_cars(&self, judge_id: Uuid) -> Result<Vec<Uuid>> {
        let repo = ScoreRepository::new(self.db.pool());
        Ok(repo.scored_car_ids(judge_id).await?)
    }
}

#[async_trait]
impl BallotStore for PgStore {
    async fn insert_ballot(&self, ballot: NewBallot) -> Result<Ballot> {
        let repo = BallotRepository::new(self.db.pool());
        repo.insert(&ballot).await.map_err(|e| {
            if e.is_unique_violation() {
                VoteError::AlreadyVoted
            } else if e.is_foreign_key_violation() {
                VoteError::NotFound("Car or contest")
            } else {
                VoteError::from(e)
            }
        })
    }

    async fn delete_ballot(&self, ballot_id: Uuid) -> Result<Ballot> {
        let repo = BallotRepository::new(self.db.pool());
        repo.delete(ballot_id).await.map_err(|e| match e {
            StorageError::NotFound => VoteError::NotFound("Ballot"),
            e => VoteError::from(e),
        })
    }

    async fn ballots_for_contest(&self, contest_id: Uuid) -> Result<Vec<Ballot>> {
        let repo = BallotRepository::new(self.db.pool());
        Ok(repo.list_for_contest(contest_id).await?)
    }

    async fn find_ballot(&self, contest_id: Uuid, user_id: Uuid) -> Result<Option<Ballot>> {
        let repo = BallotRepository::new(self.db.pool());
        Ok(repo.find(contest_id, user_id).await?)
    }
}

#[async_trait]
impl SnapshotStore for PgStore {
    async fn replace_snapshot(
        &self,
        result_type: ContestType,
        entries: &[NewSnapshotEntry],
    ) -> Result<()> {
        let repo = SnapshotRepository::new(self.db.pool());
        Ok(repo.replace(result_type, entries).await?)
    }

    async fn snapshot(
        &self,
        result_type: ContestType,
        scope_id: Uuid,
    ) -> Result<Vec<SnapshotEntry>> {
        let repo = SnapshotRepository::new(self.db.pool());
        Ok(repo.list(result_type, scope_id).await?)
    }
}

#[async_trait]
impl Directory for PgStore {
    async fn user(&self, user_id: Uuid) -> Result<Option<User>> {
        let repo = DirectoryRepository::new(self.db.pool());
        Ok(repo.find_user(user_id).await?)
    }

    async fn car(&self, car_id: Uuid) -> Result<Option<Car>> {
        let repo = DirectoryRepository::new(self.db.pool());
        Ok(repo.find_car(car_id).await?)
    }

    async fn classes(&self) -> Result<Vec<VehicleClass>> {
        let repo = DirectoryRepository::new(self.db.pool());
        Ok(repo.list_classes().await?)
    }

    async fn class(&self, class_id: Uuid) -> Result<Option<VehicleClass>> {
        let repo = DirectoryRepository::new(self.db.pool());
        Ok(repo.find_class(class_id).await?)
    }

    async fn questions_for_class(&self, class_id: Uuid) -> Result<Vec<JudgeQuestion>> {
        let repo = DirectoryRepository::new(self.db.pool());
        Ok(repo.list_questions_for_class(class_id).await?)
    }

    async fn specialty_contests(&self) -> Result<Vec<SpecialtyContest>> {
        let repo = DirectoryRepository::new(self.db.pool());
        Ok(repo.list_specialty_contests().await?)
    }

    async fn specialty_contest(&self, contest_id: Uuid) -> Result<Option<SpecialtyContest>> {
        let repo = DirectoryRepository::new(self.db.pool());
        Ok(repo.find_specialty_contest(contest_id).await?)
    }

    async fn is_listed_voter(&self, contest_id: Uuid, user_id: Uuid) -> Result<bool> {
        let repo = DirectoryRepository::new(self.db.pool());
        Ok(repo.is_listed_voter(contest_id, user_id).await?)
    }
}
