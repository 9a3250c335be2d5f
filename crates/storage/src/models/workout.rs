use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A workout template: an ordered list of exercise references with a
/// planned set count each. Templates are shared, not per-user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Workout {
    pub workout_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkoutItem {
    pub workout_item_id: Uuid,
    pub workout_id: Uuid,
    pub exercise_id: Uuid,
    pub position: i64,
    pub set_count: i64,
}
