use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::handlers::{
    cast_ballot, delete_ballot, get_user_ballot, list_ballots, list_specialty_contests,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/specialty/:contest_id/ballots", post(cast_ballot))
        .route("/specialty/:contest_id/ballots", get(list_ballots))
        .route("/ballots/:ballot_id", delete(delete_ballot))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/specialty", get(list_specialty_contests))
        .route("/specialty/:contest_id/ballots/:user_id", get(get_user_ballot))
        .merge(protected)
}
