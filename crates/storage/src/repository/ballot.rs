use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Ballot, NewBallot};

/// Repository for the specialty ballot ledger
pub struct BallotRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BallotRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a ballot. A second ballot for the same contest and user fails
    /// on the `(contest_id, user_id)` unique constraint; check
    /// [`StorageError::is_unique_violation`] to detect it.
    pub async fn insert(&self, ballot: &NewBallot) -> Result<Ballot> {
        let ballot = sqlx::query_as::<_, Ballot>(
            r#"
            INSERT INTO specialty_ballots (contest_id, user_id, car_id)
            VALUES ($1, $2, $3)
            RETURNING ballot_id, contest_id, user_id, car_id, cast_at
            "#,
        )
        .bind(ballot.contest_id)
        .bind(ballot.user_id)
        .bind(ballot.car_id)
        .fetch_one(self.pool)
        .await?;

        Ok(ballot)
    }

    pub async fn delete(&self, ballot_id: Uuid) -> Result<Ballot> {
        let ballot = sqlx::query_as::<_, Ballot>(
            r#"
            DELETE FROM specialty_ballots
            WHERE ballot_id = $1
            RETURNING ballot_id, contest_id, user_id, car_id, cast_at
            "#,
        )
        .bind(ballot_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(ballot)
    }

    /// Every ballot of a contest in the order they were cast
    pub async fn list_for_contest(&self, contest_id: Uuid) -> Result<Vec<Ballot>> {
        let ballots = sqlx::query_as::<_, Ballot>(
            r#"
            SELECT ballot_id, contest_id, user_id, car_id, cast_at
            FROM specialty_ballots
            WHERE contest_id = $1
            ORDER BY cast_at, ballot_id
            "#,
        )
        .bind(contest_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ballots)
    }

    pub async fn find(&self, contest_id: Uuid, user_id: Uuid) -> Result<Option<Ballot>> {
        let ballot = sqlx::query_as::<_, Ballot>(
            r#"
            SELECT ballot_id, contest_id, user_id, car_id, cast_at
            FROM specialty_ballots
            WHERE contest_id = $1 AND user_id = $2
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(ballot)
    }
}
