use storage::{
    dto::results::{AggregatedResults, PublishedResultsResponse},
    models::ContestType,
};
use uuid::Uuid;
use voting::{Result, VotingEngine};

/// Live ranking and would-be winners for one scope
pub async fn get_aggregated_results(
    engine: &VotingEngine,
    contest_type: ContestType,
    scope_id: Uuid,
) -> Result<AggregatedResults> {
    engine.aggregated_results(contest_type, scope_id).await
}

/// Rows frozen by the last lock for one scope
pub async fn get_published_results(
    engine: &VotingEngine,
    result_type: ContestType,
    scope_id: Uuid,
) -> Result<PublishedResultsResponse> {
    let entries = engine.published_snapshot(result_type, scope_id).await?;
    Ok(PublishedResultsResponse {
        result_type,
        scope_id,
        entries,
    })
}
