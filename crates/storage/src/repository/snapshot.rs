use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ContestType, NewSnapshotEntry, SnapshotEntry};

#[derive(FromRow)]
struct SnapshotRow {
    result_type: String,
    scope_id: Uuid,
    car_id: Uuid,
    place: i32,
    total: i64,
    published_at: DateTime<Utc>,
}

impl TryFrom<SnapshotRow> for SnapshotEntry {
    type Error = crate::error::StorageError;

    fn try_from(row: SnapshotRow) -> Result<Self> {
        Ok(SnapshotEntry {
            result_type: row.result_type.parse()?,
            scope_id: row.scope_id,
            car_id: row.car_id,
            place: row.place,
            total: row.total,
            published_at: row.published_at,
        })
    }
}

/// Repository for published result snapshots
pub struct SnapshotRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SnapshotRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Drop every row of `result_type` and insert `entries` in its place,
    /// all in one transaction. Any failure rolls back to the previous
    /// snapshot.
    pub async fn replace(
        &self,
        result_type: ContestType,
        entries: &[NewSnapshotEntry],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM result_snapshots
            WHERE result_type = $1
            "#,
        )
        .bind(result_type.as_str())
        .execute(&mut *tx)
        .await?;

        if !entries.is_empty() {
            let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO result_snapshots (result_type, scope_id, car_id, place, total) ",
            );
            query.push_values(entries, |mut row, entry| {
                row.push_bind(entry.result_type.as_str())
                    .push_bind(entry.scope_id)
                    .push_bind(entry.car_id)
                    .push_bind(entry.place)
                    .push_bind(entry.total);
            });
            query.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    pub async fn list(&self, result_type: ContestType, scope_id: Uuid) -> Result<Vec<SnapshotEntry>> {
        let rows = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT result_type, scope_id, car_id, place, total, published_at
            FROM result_snapshots
            WHERE result_type = $1 AND scope_id = $2
            ORDER BY place, total DESC, car_id
            "#,
        )
        .bind(result_type.as_str())
        .bind(scope_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(SnapshotEntry::try_from).collect()
    }
}
