use axum::Router;

use crate::features::{ballots, contests, notifications, results, scores};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

/// API and WebSocket routes. Documentation and CORS are layered on in `main`.
pub fn router(state: AppState, api_keys: ApiKeys) -> Router {
    let api = Router::new()
        .nest("/contests", contests::routes::routes(api_keys.clone()))
        .nest("/results", results::routes::routes())
        .merge(scores::routes::routes(api_keys.clone()))
        .merge(ballots::routes::routes(api_keys));

    Router::new()
        .nest("/api", api)
        .merge(notifications::routes::routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use storage::models::{
        Car, JudgeQuestion, SpecialtyContest, User, UserRole, VehicleClass,
    };
    use tower::ServiceExt;
    use uuid::Uuid;
    use voting::VotingEngine;
    use voting::memory::MemoryStore;
    use voting::notifier::BroadcastNotifier;
    use voting::store::Stores;

    use super::*;

    const API_KEY: &str = "test-key";

    struct Show {
        router: Router,
        judge: Uuid,
        voter: Uuid,
        car: Uuid,
        class_id: Uuid,
        question: Uuid,
        contest: Uuid,
    }

    impl Show {
        fn new() -> Self {
            let store = MemoryStore::new();
            let (judge, voter) = (Uuid::new_v4(), Uuid::new_v4());
            let (class_id, vehicle_type_id) = (Uuid::new_v4(), Uuid::new_v4());
            let (car, question, contest) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

            store.add_user(User {
                user_id: judge,
                name: "Judge Reinhold".to_string(),
                role: UserRole::Judge,
            });
            store.add_user(User {
                user_id: voter,
                name: "Pat Public".to_string(),
                role: UserRole::User,
            });
            store.add_class(VehicleClass {
                class_id,
                vehicle_type_id,
                name: "Hot Rod".to_string(),
                sort_order: 1,
            });
            store.add_car(Car {
                car_id: car,
                owner_id: voter,
                class_id,
                vehicle_type_id,
                year: Some(1932),
                make: "Ford".to_string(),
                model: "Roadster".to_string(),
            });
            store.add_question(JudgeQuestion {
                question_id: question,
                category_id: Uuid::new_v4(),
                class_id,
                category_name: "Exterior".to_string(),
                name: "Paint".to_string(),
                min_score: 0,
                max_score: 10,
            });
            store.add_specialty_contest(SpecialtyContest {
                contest_id: contest,
                name: "People's Choice".to_string(),
                is_active: true,
                allow_all_users: true,
                vehicle_type_id: None,
                class_id: None,
            });

            let notifier = BroadcastNotifier::new(8);
            let engine =
                VotingEngine::new(Stores::shared(Arc::new(store)), Arc::new(notifier.clone()));
            let state = AppState { engine, notifier };

            Self {
                router: router(state, ApiKeys::from_comma_separated(API_KEY)),
                judge,
                voter,
                car,
                class_id,
                question,
                contest,
            }
        }

        async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            self.request(method, uri, body, Some(API_KEY)).await
        }

        async fn request(
            &self,
            method: &str,
            uri: &str,
            body: Option<Value>,
            api_key: Option<&str>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(key) = api_key {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {key}"));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn set_state(&self, contest_type: &str, state: &str) -> (StatusCode, Value) {
            self.send(
                "PUT",
                &format!("/api/contests/{contest_type}/state"),
                Some(json!({ "state": state })),
            )
            .await
        }

        async fn vote(&self, user_id: Uuid) -> (StatusCode, Value) {
            self.send(
                "POST",
                &format!("/api/specialty/{}/ballots", self.contest),
                Some(json!({ "user_id": user_id, "car_id": self.car })),
            )
            .await
        }

        async fn score(&self, value: i32) -> (StatusCode, Value) {
            self.send(
                "PUT",
                &format!("/api/cars/{}/scores", self.car),
                Some(json!({
                    "judge_id": self.judge,
                    "entries": [{ "question_id": self.question, "value": value }]
                })),
            )
            .await
        }
    }

    #[tokio::test]
    async fn test_contests_start_closed() {
        let show = Show::new();

        let (status, body) = show.request("GET", "/api/contests/judge/state", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "contest_type": "judge", "state": "closed" }));
    }

    #[tokio::test]
    async fn test_writes_require_api_key() {
        let show = Show::new();

        let (status, body) = show
            .request(
                "PUT",
                "/api/contests/judge/state",
                Some(json!({ "state": "open" })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "unauthorized");

        let (status, _) = show
            .request(
                "PUT",
                "/api/contests/judge/state",
                Some(json!({ "state": "open" })),
                Some("wrong-key"),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, body) = show.request("GET", "/api/contests/judge/state", None, None).await;
        assert_eq!(body["state"], "closed");
    }

    #[tokio::test]
    async fn test_invalid_transition_is_conflict() {
        let show = Show::new();

        let (status, body) = show.set_state("specialty", "locked").await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "invalid_transition");
    }

    #[tokio::test]
    async fn test_scoring_is_gated_and_range_checked() {
        let show = Show::new();

        let (status, body) = show.score(7).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "not_open");

        show.set_state("judge", "open").await;

        let (status, body) = show.score(11).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "out_of_range");

        let (status, body) = show.score(7).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["judge_name"], "Judge Reinhold");
        assert_eq!(body[0]["score"], 7);

        let (status, body) = show
            .request("GET", &format!("/api/judges/{}/progress", show.judge), None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scored_car_ids"], json!([show.car]));
    }

    #[tokio::test]
    async fn test_duplicate_questions_fail_validation() {
        let show = Show::new();
        show.set_state("judge", "open").await;

        let (status, body) = show
            .send(
                "PUT",
                &format!("/api/cars/{}/scores", show.car),
                Some(json!({
                    "judge_id": show.judge,
                    "entries": [
                        { "question_id": show.question, "value": 3 },
                        { "question_id": show.question, "value": 4 }
                    ]
                })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_failed");
    }

    #[tokio::test]
    async fn test_unknown_car_is_not_found() {
        let show = Show::new();

        let (status, body) = show
            .request("GET", &format!("/api/cars/{}/scores", Uuid::new_v4()), None, None)
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_second_ballot_conflicts() {
        let show = Show::new();
        show.set_state("specialty", "open").await;

        let (status, ballot) = show.vote(show.voter).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(ballot["car_id"], json!(show.car));

        let (status, body) = show.vote(show.voter).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "already_voted");

        let (status, mine) = show
            .request(
                "GET",
                &format!("/api/specialty/{}/ballots/{}", show.contest, show.voter),
                None,
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine["ballot_id"], ballot["ballot_id"]);
    }

    #[tokio::test]
    async fn test_deleted_ballot_frees_the_vote() {
        let show = Show::new();
        show.set_state("specialty", "open").await;

        let (_, ballot) = show.vote(show.voter).await;
        let ballot_id = ballot["ballot_id"].as_str().unwrap().to_string();

        let (status, _) = show.send("DELETE", &format!("/api/ballots/{ballot_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = show.send("DELETE", &format!("/api/ballots/{ballot_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");

        let (status, _) = show.vote(show.voter).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, ballots) = show
            .send("GET", &format!("/api/specialty/{}/ballots", show.contest), None)
            .await;
        assert_eq!(ballots.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lock_publishes_snapshot() {
        let show = Show::new();
        show.set_state("specialty", "open").await;
        show.vote(show.voter).await;

        let (status, body) = show.set_state("specialty", "locked").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["from"], "open");
        assert_eq!(body["to"], "locked");
        assert_eq!(body["published"]["scope_count"], 1);
        assert_eq!(body["published"]["entry_count"], 1);

        let (status, body) = show
            .request(
                "GET",
                &format!("/api/results/specialty/{}/published", show.contest),
                None,
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["car_id"], json!(show.car));
        assert_eq!(entries[0]["place"], 1);
        assert_eq!(entries[0]["total"], 1);

        let (status, body) = show.vote(Uuid::new_v4()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "not_open");
    }

    #[tokio::test]
    async fn test_live_results_for_class() {
        let show = Show::new();
        show.set_state("judge", "open").await;
        show.score(9).await;

        let (status, body) = show
            .request("GET", &format!("/api/results/judge/{}", show.class_id), None, None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ranking"][0]["car_id"], json!(show.car));
        assert_eq!(body["ranking"][0]["total"], 9);
        assert_eq!(body["winners"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_specialty_listing_is_public() {
        let show = Show::new();

        let (status, body) = show.request("GET", "/api/specialty", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "People's Choice");
    }
}
