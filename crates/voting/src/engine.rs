use std::sync::Arc;

use storage::models::ContestType;
use tokio::sync::RwLock;

use crate::notifier::{Notification, Notifier};
use crate::store::Stores;

/// Voting & scoring engine.
///
/// Gates ledger writes on contest state, aggregates results on demand and
/// freezes them into snapshots when a contest is locked. Operations are
/// split across the `state`, `scores`, `ballots`, `aggregation` and
/// `publisher` modules.
#[derive(Clone)]
pub struct VotingEngine {
    pub(crate) stores: Stores,
    notifier: Arc<dyn Notifier>,
    gates: Arc<ContestGates>,
}

/// One guard per contest type. Ledger writes hold it shared from the state
/// check until the row is stored; state transitions hold it exclusively.
#[derive(Default)]
struct ContestGates {
    judge: RwLock<()>,
    specialty: RwLock<()>,
}

impl VotingEngine {
    pub fn new(stores: Stores, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            stores,
            notifier,
            gates: Arc::new(ContestGates::default()),
        }
    }

    pub(crate) fn gate(&self, contest_type: ContestType) -> &RwLock<()> {
        match contest_type {
            ContestType::Judge => &self.gates.judge,
            ContestType::Specialty => &self.gates.specialty,
        }
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.publish(notification);
    }
}
