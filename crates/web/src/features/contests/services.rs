use storage::{
    dto::voting::{ContestStateResponse, StateTransitionResponse},
    models::{ContestType, VoteState},
};
use voting::{Result, VotingEngine};

/// Current state of one contest
pub async fn get_contest_state(
    engine: &VotingEngine,
    contest_type: ContestType,
) -> Result<ContestStateResponse> {
    let state = engine.contest_state(contest_type).await?;
    Ok(ContestStateResponse {
        contest_type,
        state,
    })
}

/// Move a contest to a new state, publishing results when it locks
pub async fn set_contest_state(
    engine: &VotingEngine,
    contest_type: ContestType,
    state: VoteState,
) -> Result<StateTransitionResponse> {
    engine.set_contest_state(contest_type, state).await
}
