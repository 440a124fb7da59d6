use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ContestType;

/// One frozen row of published results. Rows are only ever written by a
/// lock, and all rows of a result type are replaced together.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SnapshotEntry {
    pub result_type: ContestType,
    pub scope_id: Uuid,
    pub car_id: Uuid,
    pub place: i32,
    pub total: i64,
    pub published_at: DateTime<Utc>,
}

/// Row to insert when replacing a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnapshotEntry {
    pub result_type: ContestType,
    pub scope_id: Uuid,
    pub car_id: Uuid,
    pub place: i32,
    pub total: i64,
}
