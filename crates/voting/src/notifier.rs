//! Best-effort fan-out of state changes and publications.
//!
//! Publishing never waits for subscribers and nothing is retried or
//! persisted; a subscriber that is not listening simply misses the event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::models::{ContestType, UserRole, VoteState};
use tokio::sync::broadcast;

/// Which connected roles should see a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleFilter {
    All,
    Admins,
    Judges,
    Voters,
}

impl RoleFilter {
    /// Admins see everything addressed to any group.
    pub fn admits(&self, role: UserRole) -> bool {
        match self {
            Self::All => true,
            Self::Admins => role == UserRole::Admin,
            Self::Judges => matches!(role, UserRole::Judge | UserRole::Admin),
            Self::Voters => matches!(role, UserRole::User | UserRole::Admin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoteEvent {
    StateChanged {
        contest_type: ContestType,
        from: VoteState,
        to: VoteState,
    },
    ResultsPublished {
        result_type: ContestType,
        scope_count: usize,
        entry_count: usize,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub audience: RoleFilter,
    pub message: String,
    pub icon: String,
    pub event: VoteEvent,
    pub sent_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(audience: RoleFilter, message: impl Into<String>, icon: &str, event: VoteEvent) -> Self {
        Self {
            audience,
            message: message.into(),
            icon: icon.to_string(),
            event,
            sent_at: Utc::now(),
        }
    }
}

pub trait Notifier: Send + Sync {
    /// Hand the notification to the transport without waiting for delivery.
    fn publish(&self, notification: Notification);
}

/// In-process broadcast channel; transports subscribe and forward.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Arc<Notification>>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Notification>> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Notifier for BroadcastNotifier {
    fn publish(&self, notification: Notification) {
        if self.tx.send(Arc::new(notification)).is_err() {
            tracing::debug!("Notification dropped, no subscribers");
        }
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn publish(&self, _notification: Notification) {}
}
