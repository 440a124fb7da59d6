use axum::{
    Router, middleware,
    routing::{get, put},
};

use super::handlers::{get_contest_state, set_contest_state};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/:contest_type/state", put(set_contest_state))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:contest_type/state", get(get_contest_state))
        .merge(protected)
}
