use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A judged class; judge results are ranked per class.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VehicleClass {
    pub class_id: Uuid,
    pub vehicle_type_id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Car {
    pub car_id: Uuid,
    pub owner_id: Uuid,
    pub class_id: Uuid,
    pub vehicle_type_id: Uuid,
    pub year: Option<i32>,
    pub make: String,
    pub model: String,
}
