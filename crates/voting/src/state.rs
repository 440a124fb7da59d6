//! Vote state controller: one `Closed → Open → Locked` machine per contest
//! type, driven only by admin requests.

use storage::dto::voting::StateTransitionResponse;
use storage::models::{ContestType, VoteState};
use tokio::sync::RwLockReadGuard;

use crate::engine::VotingEngine;
use crate::error::{Result, VoteError};
use crate::notifier::{Notification, RoleFilter, VoteEvent};

impl VotingEngine {
    pub async fn contest_state(&self, contest_type: ContestType) -> Result<VoteState> {
        self.stores.states.get_state(contest_type).await
    }

    /// Move a contest to `new_state`.
    ///
    /// Transitions of one contest type run one at a time and wait for
    /// in-flight ledger writes to finish; new writes wait for the
    /// transition. Locking publishes fresh results before the state is
    /// stored; if the publication fails the contest stays open. Unlocking
    /// leaves the last snapshot in place until the next lock replaces it.
    pub async fn set_contest_state(
        &self,
        contest_type: ContestType,
        new_state: VoteState,
    ) -> Result<StateTransitionResponse> {
        let _transition = self.gate(contest_type).write().await;

        let current = self.contest_state(contest_type).await?;

        if !current.can_transition_to(new_state) {
            tracing::warn!(
                contest = %contest_type,
                from = %current,
                to = %new_state,
                "Rejected contest state transition"
            );
            return Err(VoteError::InvalidTransition {
                contest_type,
                from: current,
                to: new_state,
            });
        }

        let published = if new_state == VoteState::Locked {
            Some(self.lock(contest_type).await?)
        } else {
            None
        };

        self.stores.states.set_state(contest_type, new_state).await?;

        tracing::info!(
            contest = %contest_type,
            from = %current,
            to = %new_state,
            "Contest state changed"
        );

        if let Some(summary) = &published {
            self.notify_published(summary);
        }
        self.notify(state_notification(contest_type, current, new_state));

        Ok(StateTransitionResponse {
            contest_type,
            from: current,
            to: new_state,
            published,
        })
    }

    /// Gate for every ledger write. Keep the returned guard until the write
    /// is stored so no transition can slip in between.
    pub(crate) async fn ensure_open(
        &self,
        contest_type: ContestType,
    ) -> Result<RwLockReadGuard<'_, ()>> {
        let guard = self.gate(contest_type).read().await;
        let state = self.contest_state(contest_type).await?;
        if state.accepts_writes() {
            Ok(guard)
        } else {
            tracing::warn!(contest = %contest_type, state = %state, "Write rejected, voting not open");
            Err(VoteError::NotOpen(contest_type))
        }
    }
}

fn state_notification(contest_type: ContestType, from: VoteState, to: VoteState) -> Notification {
    let (audience, subject) = match contest_type {
        ContestType::Judge => (RoleFilter::Judges, "Judging"),
        ContestType::Specialty => (RoleFilter::All, "Specialty voting"),
    };
    let (verb, icon) = match to {
        VoteState::Open => ("is now open", "success"),
        VoteState::Closed => ("has been closed", "warning"),
        VoteState::Locked => ("has been locked", "info"),
    };

    Notification::new(
        audience,
        format!("{subject} {verb}"),
        icon,
        VoteEvent::StateChanged {
            contest_type,
            from,
            to,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[tokio::test]
    async fn test_contests_start_closed_and_move_independently() {
        let show = Fixture::new();

        assert_eq!(show.engine.contest_state(ContestType::Judge).await.unwrap(), VoteState::Closed);

        show.open(ContestType::Specialty).await;

        assert_eq!(show.engine.contest_state(ContestType::Judge).await.unwrap(), VoteState::Closed);
        assert_eq!(
            show.engine.contest_state(ContestType::Specialty).await.unwrap(),
            VoteState::Open
        );
    }

    #[tokio::test]
    async fn test_invalid_transition_changes_nothing() {
        let show = Fixture::new();

        let err = show
            .engine
            .set_contest_state(ContestType::Judge, VoteState::Locked)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VoteError::InvalidTransition { from: VoteState::Closed, to: VoteState::Locked, .. }
        ));
        assert_eq!(show.engine.contest_state(ContestType::Judge).await.unwrap(), VoteState::Closed);
    }

    #[tokio::test]
    async fn test_only_lock_publishes() {
        let show = Fixture::new();

        let opened = show
            .engine
            .set_contest_state(ContestType::Judge, VoteState::Open)
            .await
            .unwrap();
        assert!(opened.published.is_none());

        let locked = show
            .engine
            .set_contest_state(ContestType::Judge, VoteState::Locked)
            .await
            .unwrap();
        assert_eq!(locked.from, VoteState::Open);
        assert!(locked.published.is_some());

        let reopened = show
            .engine
            .set_contest_state(ContestType::Judge, VoteState::Open)
            .await
            .unwrap();
        assert!(reopened.published.is_none());
    }

    #[tokio::test]
    async fn test_transition_notifies_audience() {
        let show = Fixture::new();
        let mut rx = show.notifier.subscribe();

        show.open(ContestType::Judge).await;

        let notification = rx.recv().await.unwrap();
        assert_eq!(notification.audience, RoleFilter::Judges);
        assert_eq!(
            notification.event,
            VoteEvent::StateChanged {
                contest_type: ContestType::Judge,
                from: VoteState::Closed,
                to: VoteState::Open,
            }
        );
    }
}
