//! Volatile backend for development and tests.
//!
//! Every store operation takes the single lock once, so check-and-insert
//! (ballots) and delete-then-insert (scores, snapshots) are atomic with
//! respect to each other.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde::Deserialize;
use storage::dto::voting::ScoreEntry;
use storage::models::{
    Ballot, Car, ContestType, JudgeQuestion, JudgeScore, NewBallot, NewSnapshotEntry,
    ScoreWithJudge, SnapshotEntry, SpecialtyContest, User, VehicleClass, VoteState,
};
use uuid::Uuid;

use crate::error::{Result, VoteError};
use crate::store::{BallotStore, ContestStateStore, Directory, ScoreStore, SnapshotStore};

/// Directory contents and initial states loaded into a [`MemoryStore`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub users: Vec<User>,
    pub classes: Vec<VehicleClass>,
    pub cars: Vec<Car>,
    pub questions: Vec<JudgeQuestion>,
    pub specialty_contests: Vec<SpecialtyContest>,
    pub allowed_voters: Vec<AllowedVoter>,
    pub states: HashMap<ContestType, VoteState>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AllowedVoter {
    pub contest_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Default)]
struct Inner {
    states: HashMap<ContestType, VoteState>,
    scores: Vec<JudgeScore>,
    ballots: Vec<Ballot>,
    snapshots: Vec<SnapshotEntry>,
    users: HashMap<Uuid, User>,
    classes: Vec<VehicleClass>,
    cars: HashMap<Uuid, Car>,
    questions: Vec<JudgeQuestion>,
    contests: Vec<SpecialtyContest>,
    voters: HashSet<(Uuid, Uuid)>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            inner.states = seed.states;
            inner.users = seed.users.into_iter().map(|u| (u.user_id, u)).collect();
            inner.classes = seed.classes;
            inner.cars = seed.cars.into_iter().map(|c| (c.car_id, c)).collect();
            inner.questions = seed.questions;
            inner.contests = seed.specialty_contests;
            inner.voters = seed
                .allowed_voters
                .into_iter()
                .map(|v| (v.contest_id, v.user_id))
                .collect();
        }
        store
    }

    pub fn add_user(&self, user: User) {
        self.inner.write().users.insert(user.user_id, user);
    }

    pub fn add_class(&self, class: VehicleClass) {
        self.inner.write().classes.push(class);
    }

    pub fn add_car(&self, car: Car) {
        self.inner.write().cars.insert(car.car_id, car);
    }

    pub fn add_question(&self, question: JudgeQuestion) {
        self.inner.write().questions.push(question);
    }

    pub fn add_specialty_contest(&self, contest: SpecialtyContest) {
        self.inner.write().contests.push(contest);
    }

    pub fn allow_voter(&self, contest_id: Uuid, user_id: Uuid) {
        self.inner.write().voters.insert((contest_id, user_id));
    }
}

#[async_trait]
impl ContestStateStore for MemoryStore {
    async fn get_state(&self, contest_type: ContestType) -> Result<VoteState> {
        Ok(self
            .inner
            .read()
            .states
            .get(&contest_type)
            .copied()
            .unwrap_or_default())
    }

    async fn set_state(&self, contest_type: ContestType, state: VoteState) -> Result<()> {
        self.inner.write().states.insert(contest_type, state);
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for MemoryStore {
    async fn replace_scores(
        &self,
        car_id: Uuid,
        judge_id: Uuid,
        entries: &[ScoreEntry],
    ) -> Result<()> {
        let scored_at = Utc::now();
        let mut inner = self.inner.write();

        inner
            .scores
            .retain(|s| !(s.car_id == car_id && s.judge_id == judge_id));
        inner.scores.extend(entries.iter().map(|entry| JudgeScore {
            judge_id,
            car_id,
            question_id: entry.question_id,
            score: entry.value,
            scored_at,
        }));

        Ok(())
    }

    async fn scores_for_car(&self, car_id: Uuid) -> Result<Vec<ScoreWithJudge>> {
        let inner = self.inner.read();

        let mut rows: Vec<(usize, ScoreWithJudge)> = inner
            .scores
            .iter()
            .filter(|s| s.car_id == car_id)
            .filter_map(|s| {
                let judge = inner.users.get(&s.judge_id)?;
                let (position, question) = inner
                    .questions
                    .iter()
                    .enumerate()
                    .find(|(_, q)| q.question_id == s.question_id)?;

                Some((
                    position,
                    ScoreWithJudge {
                        judge_id: s.judge_id,
                        judge_name: judge.name.clone(),
                        car_id: s.car_id,
                        question_id: s.question_id,
                        question_name: question.name.clone(),
                        category_name: question.category_name.clone(),
                        score: s.score,
                        scored_at: s.scored_at,
                    },
                ))
            })
            .collect();

        rows.sort_by(|(pa, a), (pb, b)| a.judge_name.cmp(&b.judge_name).then(pa.cmp(pb)));

        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn scores_in_class(&self, class_id: Uuid) -> Result<Vec<JudgeScore>> {
        let inner = self.inner.read();

        Ok(inner
            .scores
            .iter()
            .filter(|s| {
                inner
                    .cars
                    .get(&s.car_id)
                    .is_some_and(|car| car.class_id == class_id)
            })
            .cloned()
            .collect())
    }

    async fn scored_cars(&self, judge_id: Uuid) -> Result<Vec<Uuid>> {
        let inner = self.inner.read();

        let mut car_ids: Vec<Uuid> = inner
            .scores
            .iter()
            .filter(|s| s.judge_id == judge_id)
            .map(|s| s.car_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        car_ids.sort();

        Ok(car_ids)
    }
}

#[async_trait]
impl BallotStore for MemoryStore {
    async fn insert_ballot(&self, ballot: NewBallot) -> Result<Ballot> {
        let mut inner = self.inner.write();

        if inner
            .ballots
            .iter()
            .any(|b| b.contest_id == ballot.contest_id && b.user_id == ballot.user_id)
        {
            return Err(VoteError::AlreadyVoted);
        }

        let stored = Ballot {
            ballot_id: Uuid::new_v4(),
            contest_id: ballot.contest_id,
            user_id: ballot.user_id,
            car_id: ballot.car_id,
            cast_at: Utc::now(),
        };
        inner.ballots.push(stored.clone());

        Ok(stored)
    }

    async fn delete_ballot(&self, ballot_id: Uuid) -> Result<Ballot> {
        let mut inner = self.inner.write();

        let position = inner
            .ballots
            .iter()
            .position(|b| b.ballot_id == ballot_id)
            .ok_or(VoteError::NotFound("Ballot"))?;

        Ok(inner.ballots.remove(position))
    }

    async fn ballots_for_contest(&self, contest_id: Uuid) -> Result<Vec<Ballot>> {
        Ok(self
            .inner
            .read()
            .ballots
            .iter()
            .filter(|b| b.contest_id == contest_id)
            .cloned()
            .collect())
    }

    async fn find_ballot(&self, contest_id: Uuid, user_id: Uuid) -> Result<Option<Ballot>> {
        Ok(self
            .inner
            .read()
            .ballots
            .iter()
            .find(|b| b.contest_id == contest_id && b.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn replace_snapshot(
        &self,
        result_type: ContestType,
        entries: &[NewSnapshotEntry],
    ) -> Result<()> {
        let published_at = Utc::now();
        let mut inner = self.inner.write();

        inner.snapshots.retain(|e| e.result_type != result_type);
        inner
            .snapshots
            .extend(entries.iter().map(|entry| SnapshotEntry {
                result_type: entry.result_type,
                scope_id: entry.scope_id,
                car_id: entry.car_id,
                place: entry.place,
                total: entry.total,
                published_at,
            }));

        Ok(())
    }

    async fn snapshot(
        &self,
        result_type: ContestType,
        scope_id: Uuid,
    ) -> Result<Vec<SnapshotEntry>> {
        let mut entries: Vec<SnapshotEntry> = self
            .inner
            .read()
            .snapshots
            .iter()
            .filter(|e| e.result_type == result_type && e.scope_id == scope_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.place);

        Ok(entries)
    }
}

#[async_trait]
impl Directory for MemoryStore {
    async fn user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.inner.read().users.get(&user_id).cloned())
    }

    async fn car(&self, car_id: Uuid) -> Result<Option<Car>> {
        Ok(self.inner.read().cars.get(&car_id).cloned())
    }

    async fn classes(&self) -> Result<Vec<VehicleClass>> {
        let mut classes = self.inner.read().classes.clone();
        classes.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        Ok(classes)
    }

    async fn class(&self, class_id: Uuid) -> Result<Option<VehicleClass>> {
        Ok(self
            .inner
            .read()
            .classes
            .iter()
            .find(|c| c.class_id == class_id)
            .cloned())
    }

    async fn questions_for_class(&self, class_id: Uuid) -> Result<Vec<JudgeQuestion>> {
        Ok(self
            .inner
            .read()
            .questions
            .iter()
            .filter(|q| q.class_id == class_id)
            .cloned()
            .collect())
    }

    async fn specialty_contests(&self) -> Result<Vec<SpecialtyContest>> {
        let mut contests = self.inner.read().contests.clone();
        contests.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(contests)
    }

    async fn specialty_contest(&self, contest_id: Uuid) -> Result<Option<SpecialtyContest>> {
        Ok(self
            .inner
            .read()
            .contests
            .iter()
            .find(|c| c.contest_id == contest_id)
            .cloned())
    }

    async fn is_listed_voter(&self, contest_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.inner.read().voters.contains(&(contest_id, user_id)))
    }
}
