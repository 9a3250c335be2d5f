use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One exercise inside a tracked session. `user_id` is denormalized from
/// the parent session so ownership checks never need a join.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TrackedExercise {
    pub tracked_exercise_id: Uuid,
    pub tracked_workout_id: Uuid,
    pub exercise_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
