use voting::VotingEngine;
use voting::notifier::BroadcastNotifier;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub engine: VotingEngine,
    pub notifier: BroadcastNotifier,
}
