use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Car;

/// A fan-voted contest such as "People's Choice".
///
/// When `allow_all_users` is false only users on the contest's allow-list
/// may vote. The optional vehicle type and class restrict which cars can
/// receive ballots.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SpecialtyContest {
    pub contest_id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub allow_all_users: bool,
    pub vehicle_type_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
}

impl SpecialtyContest {
    pub fn covers(&self, car: &Car) -> bool {
        self.vehicle_type_id
            .is_none_or(|vehicle_type_id| vehicle_type_id == car.vehicle_type_id)
            && self.class_id.is_none_or(|class_id| class_id == car.class_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ballot {
    pub ballot_id: Uuid,
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub cast_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewBallot {
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(vehicle_type_id: Uuid, class_id: Uuid) -> Car {
        Car {
            car_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            class_id,
            vehicle_type_id,
            year: Some(1969),
            make: "Chevrolet".to_string(),
            model: "Camaro".to_string(),
        }
    }

    fn contest(vehicle_type_id: Option<Uuid>, class_id: Option<Uuid>) -> SpecialtyContest {
        SpecialtyContest {
            contest_id: Uuid::new_v4(),
            name: "People's Choice".to_string(),
            is_active: true,
            allow_all_users: true,
            vehicle_type_id,
            class_id,
        }
    }

    #[test]
    fn test_unscoped_contest_covers_every_car() {
        let c = car(Uuid::new_v4(), Uuid::new_v4());
        assert!(contest(None, None).covers(&c));
    }

    #[test]
    fn test_scope_filters_by_type_and_class() {
        let vehicle_type = Uuid::new_v4();
        let class = Uuid::new_v4();
        let c = car(vehicle_type, class);

        assert!(contest(Some(vehicle_type), None).covers(&c));
        assert!(contest(Some(vehicle_type), Some(class)).covers(&c));
        assert!(!contest(Some(Uuid::new_v4()), None).covers(&c));
        assert!(!contest(None, Some(Uuid::new_v4())).covers(&c));
    }
}
