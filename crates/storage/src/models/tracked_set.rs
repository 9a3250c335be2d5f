use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One recorded set within a tracked exercise. `set_number` is a 1-based
/// display ordinal, unique within the parent; gaps are permitted after
/// deletion and siblings are never renumbered.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TrackedSet {
    pub set_id: Uuid,
    pub tracked_exercise_id: Uuid,
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
    pub is_completed: bool,
    pub user_id: Uuid,
}
