use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use storage::models::UserRole;
use tokio::sync::broadcast::{self, error::RecvError};
use utoipa::IntoParams;
use voting::notifier::{Notification, RoleFilter};

use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscribeParams {
    /// Role of the connecting client; without it only notifications for
    /// everyone are delivered.
    pub role: Option<UserRole>,
}

#[utoipa::path(
    get,
    path = "/ws",
    params(SubscribeParams),
    responses(
        (status = 101, description = "Switching to a WebSocket streaming JSON notifications")
    ),
    tag = "notifications"
)]
pub async fn subscribe(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<SubscribeParams>,
) -> impl IntoResponse {
    let rx = state.notifier.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx, params.role))
}

async fn handle_socket(
    socket: WebSocket,
    mut rx: broadcast::Receiver<Arc<Notification>>,
    role: Option<UserRole>,
) {
    let (mut sender, mut receiver) = socket.split();

    tracing::debug!(role = ?role, "Notification subscriber connected");

    loop {
        tokio::select! {
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    tracing::warn!("WebSocket receive error: {}", e);
                    break;
                }
                Some(Ok(_)) => {}
            },
            received = rx.recv() => match received {
                Ok(notification) => {
                    if !delivers_to(&notification, role) {
                        continue;
                    }

                    let text = match serde_json::to_string(notification.as_ref()) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::warn!("Failed to encode notification: {}", e);
                            continue;
                        }
                    };

                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notification subscriber lagged, messages dropped");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    tracing::debug!(role = ?role, "Notification subscriber disconnected");
}

fn delivers_to(notification: &Notification, role: Option<UserRole>) -> bool {
    match role {
        Some(role) => notification.audience.admits(role),
        None => notification.audience == RoleFilter::All,
    }
}

#[cfg(test)]
mod tests {
    use storage::models::{ContestType, VoteState};
    use voting::notifier::VoteEvent;

    use super::*;

    fn addressed_to(audience: RoleFilter) -> Notification {
        Notification::new(
            audience,
            "Judging is now open",
            "success",
            VoteEvent::StateChanged {
                contest_type: ContestType::Judge,
                from: VoteState::Closed,
                to: VoteState::Open,
            },
        )
    }

    #[test]
    fn test_anonymous_subscribers_only_get_broadcasts() {
        assert!(delivers_to(&addressed_to(RoleFilter::All), None));
        assert!(!delivers_to(&addressed_to(RoleFilter::Judges), None));
    }

    #[test]
    fn test_role_filtering() {
        let judges = addressed_to(RoleFilter::Judges);

        assert!(delivers_to(&judges, Some(UserRole::Judge)));
        assert!(delivers_to(&judges, Some(UserRole::Admin)));
        assert!(!delivers_to(&judges, Some(UserRole::User)));
    }
}
