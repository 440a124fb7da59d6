use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{ContestType, VoteState};

/// Repository for the per-contest voting state flags
pub struct ContestStateRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContestStateRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_state(&self, contest_type: ContestType) -> Result<VoteState> {
        let state = sqlx::query_scalar::<_, String>(
            r#"
            SELECT state
            FROM contest_states
            WHERE contest_type = $1
            "#,
        )
        .bind(contest_type.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        state.parse()
    }

    pub async fn set_state(&self, contest_type: ContestType, state: VoteState) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contest_states (contest_type, state)
            VALUES ($1, $2)
            ON CONFLICT (contest_type)
            DO UPDATE SET
                state = EXCLUDED.state,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(contest_type.as_str())
        .bind(state.as_str())
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
