use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a tracked session: `started` until the user completes it.
/// Abandoned sessions simply stay `started`; there is no expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Started,
    Completed,
}

/// One user's attempt at a workout template.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TrackedWorkout {
    pub tracked_workout_id: Uuid,
    pub workout_id: Uuid,
    pub user_id: Uuid,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
