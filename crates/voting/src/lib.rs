pub mod aggregation;
pub mod ballots;
pub mod engine;
pub mod error;
pub mod memory;
pub mod notifier;
pub mod postgres;
pub mod publisher;
pub mod scores;
pub mod state;
pub mod store;

pub use engine::VotingEngine;
pub use error::{Result, VoteError};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use storage::dto::voting::ScoreEntry;
    use storage::models::{
        Car, ContestType, JudgeQuestion, SpecialtyContest, User, UserRole, VehicleClass, VoteState,
    };
    use uuid::Uuid;

    use crate::engine::VotingEngine;
    use crate::memory::MemoryStore;
    use crate::notifier::BroadcastNotifier;
    use crate::store::Stores;

    /// One class with a three-question sheet (0-10, 0-10, 1-5), two judges,
    /// an admin, a voter and an open-to-all specialty contest.
    pub struct Fixture {
        pub engine: VotingEngine,
        pub store: Arc<MemoryStore>,
        pub notifier: BroadcastNotifier,
        pub admin: Uuid,
        pub judge: Uuid,
        pub second_judge: Uuid,
        pub voter: Uuid,
        pub vehicle_type_id: Uuid,
        pub class_id: Uuid,
        pub questions: Vec<Uuid>,
        pub contest_id: Uuid,
    }

    impl Fixture {
        pub fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let notifier = BroadcastNotifier::new(16);
            let engine = VotingEngine::new(Stores::shared(store.clone()), Arc::new(notifier.clone()));

            let vehicle_type_id = Uuid::new_v4();
            let class_id = Uuid::new_v4();
            store.add_class(VehicleClass {
                class_id,
                vehicle_type_id,
                name: "Muscle 1964-1972".to_string(),
                sort_order: 1,
            });

            let category_id = Uuid::new_v4();
            let questions: Vec<Uuid> = [("Paint", 0, 10), ("Interior", 0, 10), ("Originality", 1, 5)]
                .into_iter()
                .map(|(name, min_score, max_score)| {
                    let question_id = Uuid::new_v4();
                    store.add_question(JudgeQuestion {
                        question_id,
                        category_id,
                        class_id,
                        category_name: "Condition".to_string(),
                        name: name.to_string(),
                        min_score,
                        max_score,
                    });
                    question_id
                })
                .collect();

            let fixture = Self {
                engine,
                notifier,
                admin: add_user(&store, "Ada Admin", UserRole::Admin),
                judge: add_user(&store, "Judge Dredd", UserRole::Judge),
                second_judge: add_user(&store, "Judge Judy", UserRole::Judge),
                voter: add_user(&store, "Vic Voter", UserRole::User),
                store,
                vehicle_type_id,
                class_id,
                questions,
                contest_id: Uuid::nil(),
            };

            let contest_id = fixture.add_contest(true, None);
            Self {
                contest_id,
                ..fixture
            }
        }

        pub fn add_car(&self) -> Uuid {
            self.add_car_in(self.class_id)
        }

        pub fn add_car_in(&self, class_id: Uuid) -> Uuid {
            let car_id = Uuid::new_v4();
            self.store.add_car(Car {
                car_id,
                owner_id: self.voter,
                class_id,
                vehicle_type_id: self.vehicle_type_id,
                year: Some(1970),
                make: "Plymouth".to_string(),
                model: "Barracuda".to_string(),
            });
            car_id
        }

        pub fn add_voter(&self) -> Uuid {
            add_user(&self.store, "Fan", UserRole::User)
        }

        pub fn add_contest(&self, allow_all_users: bool, class_id: Option<Uuid>) -> Uuid {
            self.insert_contest(true, allow_all_users, class_id)
        }

        pub fn add_inactive_contest(&self) -> Uuid {
            self.insert_contest(false, true, None)
        }

        fn insert_contest(&self, is_active: bool, allow_all_users: bool, class_id: Option<Uuid>) -> Uuid {
            let contest_id = Uuid::new_v4();
            self.store.add_specialty_contest(SpecialtyContest {
                contest_id,
                name: format!("Contest {contest_id}"),
                is_active,
                allow_all_users,
                vehicle_type_id: None,
                class_id,
            });
            contest_id
        }

        /// Score sheet answering the class questions in order.
        pub fn sheet(&self, values: &[i32]) -> Vec<ScoreEntry> {
            self.questions
                .iter()
                .zip(values)
                .map(|(&question_id, &value)| ScoreEntry { question_id, value })
                .collect()
        }

        pub async fn open(&self, contest_type: ContestType) {
            self.engine
                .set_contest_state(contest_type, VoteState::Open)
                .await
                .unwrap();
        }
    }

    fn add_user(store: &MemoryStore, name: &str, role: UserRole) -> Uuid {
        let user_id = Uuid::new_v4();
        store.add_user(User {
            user_id,
            name: name.to_string(),
            role,
        });
        user_id
    }
}
