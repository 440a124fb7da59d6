use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ContestType, SnapshotEntry};

/// A car's position in a ranking. `total` is the summed judge score or the
/// ballot count, depending on the contest type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RankedEntry {
    pub car_id: Uuid,
    pub place: i32,
    pub total: i64,
}

/// Live results for one scope (a vehicle class or a specialty contest).
///
/// `winners` is what a lock would freeze: the podium for judge results,
/// every car sharing the top count for specialty results.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AggregatedResults {
    pub result_type: ContestType,
    pub scope_id: Uuid,
    pub ranking: Vec<RankedEntry>,
    pub winners: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublishSummary {
    pub result_type: ContestType,
    pub scope_count: usize,
    pub entry_count: usize,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublishedResultsResponse {
    pub result_type: ContestType,
    pub scope_id: Uuid,
    pub entries: Vec<SnapshotEntry>,
}
