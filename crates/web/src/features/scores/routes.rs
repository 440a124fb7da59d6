use axum::{
    Router, middleware,
    routing::{get, put},
};

use super::handlers::{get_judge_progress, get_scores, submit_scores};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/cars/:car_id/scores", put(submit_scores))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/cars/:car_id/scores", get(get_scores))
        .route("/judges/:judge_id/progress", get(get_judge_progress))
        .merge(protected)
}
