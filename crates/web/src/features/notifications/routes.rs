use axum::{Router, routing::get};

use super::handlers::subscribe;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/ws", get(subscribe))
}
