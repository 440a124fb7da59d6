//! Freezing of results into published snapshots.

use chrono::Utc;
use storage::dto::results::{AggregatedResults, PublishSummary};
use storage::models::{ContestType, NewSnapshotEntry, SnapshotEntry};
use uuid::Uuid;

use crate::engine::VotingEngine;
use crate::error::Result;
use crate::notifier::{Notification, RoleFilter, VoteEvent};

fn frozen_entries(results: &AggregatedResults) -> impl Iterator<Item = NewSnapshotEntry> + '_ {
    results.winners.iter().map(|winner| NewSnapshotEntry {
        result_type: results.result_type,
        scope_id: results.scope_id,
        car_id: winner.car_id,
        place: winner.place,
        total: winner.total,
    })
}

impl VotingEngine {
    /// Recompute every scope of `contest_type` and replace its snapshot.
    ///
    /// The previous snapshot is replaced as a whole, never merged. Scopes
    /// without scores or ballots contribute no rows.
    pub(crate) async fn lock(&self, contest_type: ContestType) -> Result<PublishSummary> {
        let results = self.results_for_all_scopes(contest_type).await?;
        let entries: Vec<NewSnapshotEntry> = results.iter().flat_map(frozen_entries).collect();

        self.stores
            .snapshots
            .replace_snapshot(contest_type, &entries)
            .await?;

        tracing::info!(
            result_type = %contest_type,
            scopes = results.len(),
            entries = entries.len(),
            "Results published"
        );

        Ok(PublishSummary {
            result_type: contest_type,
            scope_count: results.len(),
            entry_count: entries.len(),
            published_at: Utc::now(),
        })
    }

    /// What the last lock froze for one scope. Empty if nothing was
    /// published for it.
    pub async fn published_snapshot(
        &self,
        result_type: ContestType,
        scope_id: Uuid,
    ) -> Result<Vec<SnapshotEntry>> {
        self.stores.snapshots.snapshot(result_type, scope_id).await
    }

    pub(crate) fn notify_published(&self, summary: &PublishSummary) {
        let subject = match summary.result_type {
            ContestType::Judge => "Judging results",
            ContestType::Specialty => "Specialty results",
        };

        self.notify(Notification::new(
            RoleFilter::All,
            format!("{subject} have been published"),
            "success",
            VoteEvent::ResultsPublished {
                result_type: summary.result_type,
                scope_count: summary.scope_count,
                entry_count: summary.entry_count,
            },
        ));
    }
}
