use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Car, JudgeQuestion, SpecialtyContest, User, VehicleClass};

#[derive(FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    role: String,
}

/// Read-only access to the show directory: users, classes, cars, judging
/// sheets and specialty contest configuration.
pub struct DirectoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DirectoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, name, role
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(User {
            user_id: row.user_id,
            name: row.name,
            role: row.role.parse()?,
        }))
    }

    pub async fn find_car(&self, car_id: Uuid) -> Result<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            SELECT car_id, owner_id, class_id, vehicle_type_id, year, make, model
            FROM cars
            WHERE car_id = $1
            "#,
        )
        .bind(car_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(car)
    }

    pub async fn list_classes(&self) -> Result<Vec<VehicleClass>> {
        let classes = sqlx::query_as::<_, VehicleClass>(
            r#"
            SELECT class_id, vehicle_type_id, name, sort_order
            FROM vehicle_classes
            ORDER BY sort_order, name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(classes)
    }

    pub async fn find_class(&self, class_id: Uuid) -> Result<Option<VehicleClass>> {
        let class = sqlx::query_as::<_, VehicleClass>(
            r#"
            SELECT class_id, vehicle_type_id, name, sort_order
            FROM vehicle_classes
            WHERE class_id = $1
            "#,
        )
        .bind(class_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(class)
    }

    /// Judging questions for a class in sheet order
    pub async fn list_questions_for_class(&self, class_id: Uuid) -> Result<Vec<JudgeQuestion>> {
        let questions = sqlx::query_as::<_, JudgeQuestion>(
            r#"
            SELECT q.question_id, q.category_id, c.class_id, c.name AS category_name,
                   q.name, q.min_score, q.max_score
            FROM judge_questions q
            INNER JOIN judge_categories c ON q.category_id = c.category_id
            WHERE c.class_id = $1
            ORDER BY c.sort_order, q.sort_order
            "#,
        )
        .bind(class_id)
        .fetch_all(self.pool)
        .await?;

        Ok(questions)
    }

    pub async fn list_specialty_contests(&self) -> Result<Vec<SpecialtyContest>> {
        let contests = sqlx::query_as::<_, SpecialtyContest>(
            r#"
            SELECT contest_id, name, is_active, allow_all_users, vehicle_type_id, class_id
            FROM specialty_contests
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(contests)
    }

    pub async fn find_specialty_contest(&self, contest_id: Uuid) -> Result<Option<SpecialtyContest>> {
        let contest = sqlx::query_as::<_, SpecialtyContest>(
            r#"
            SELECT contest_id, name, is_active, allow_all_users, vehicle_type_id, class_id
            FROM specialty_contests
            WHERE contest_id = $1
            "#,
        )
        .bind(contest_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(contest)
    }

    /// Whether the user is on the contest's allow-list
    pub async fn is_listed_voter(&self, contest_id: Uuid, user_id: Uuid) -> Result<bool> {
        let listed = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM specialty_contest_voters
                WHERE contest_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(listed)
    }
}
