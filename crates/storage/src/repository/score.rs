use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::voting::ScoreEntry;
use crate::error::Result;
use crate::models::{JudgeScore, ScoreWithJudge};

/// Repository for the judge score ledger
pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Replace every score `judge_id` gave `car_id` with `entries`.
    ///
    /// Delete and insert share one transaction, so readers see either the
    /// old sheet or the new one.
    pub async fn replace_for_judge(
        &self,
        car_id: Uuid,
        judge_id: Uuid,
        entries: &[ScoreEntry],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM judge_scores
            WHERE car_id = $1 AND judge_id = $2
            "#,
        )
        .bind(car_id)
        .bind(judge_id)
        .execute(&mut *tx)
        .await?;

        if !entries.is_empty() {
            let mut query: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO judge_scores (judge_id, car_id, question_id, score) ");
            query.push_values(entries, |mut row, entry| {
                row.push_bind(judge_id)
                    .push_bind(car_id)
                    .push_bind(entry.question_id)
                    .push_bind(entry.value);
            });
            query.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Scores for a car with judge and question names, for display
    pub async fn list_for_car(&self, car_id: Uuid) -> Result<Vec<ScoreWithJudge>> {
        let scores = sqlx::query_as::<_, ScoreWithJudge>(
            r#"
            SELECT s.judge_id, u.name AS judge_name, s.car_id, s.question_id,
                   q.name AS question_name, c.name AS category_name,
                   s.score, s.scored_at
            FROM judge_scores s
            INNER JOIN users u ON s.judge_id = u.user_id
            INNER JOIN judge_questions q ON s.question_id = q.question_id
            INNER JOIN judge_categories c ON q.category_id = c.category_id
            WHERE s.car_id = $1
            ORDER BY u.name, c.sort_order, q.sort_order
            "#,
        )
        .bind(car_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    /// Raw score rows for every car in a class, oldest first
    pub async fn list_for_class(&self, class_id: Uuid) -> Result<Vec<JudgeScore>> {
        let scores = sqlx::query_as::<_, JudgeScore>(
            r#"
            SELECT s.judge_id, s.car_id, s.question_id, s.score, s.scored_at
            FROM judge_scores s
            INNER JOIN cars c ON s.car_id = c.car_id
            WHERE c.class_id = $1
            ORDER BY s.scored_at, s.car_id, s.judge_id, s.question_id
            "#,
        )
        .bind(class_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    /// Cars the judge has at least one score for
    pub async fn scored_car_ids(&self, judge_id: Uuid) -> Result<Vec<Uuid>> {
        let car_ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT car_id
            FROM judge_scores
            WHERE judge_id = $1
            ORDER BY car_id
            "#,
        )
        .bind(judge_id)
        .fetch_all(self.pool)
        .await?;

        Ok(car_ids)
    }
}
