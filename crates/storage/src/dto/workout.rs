use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One template item: an exercise reference plus the planned set count.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WorkoutItemRequest {
    pub exercise_id: Uuid,

    #[validate(range(min = 1, max = 100, message = "Set count must be between 1 and 100"))]
    pub set_count: i64,
}

/// Request payload for creating a workout template with its ordered items
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateWorkoutRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<WorkoutItemRequest>,
}

/// Request payload for updating a workout template. Supplying `items`
/// replaces the whole ordered list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkoutRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(nested)]
    pub items: Option<Vec<WorkoutItemRequest>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkoutResponse {
    pub workout_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Template item enriched with the exercise name for display. The name is
/// optional because the catalog row may have been deleted since.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct WorkoutItemDetail {
    pub workout_item_id: Uuid,
    pub exercise_id: Uuid,
    pub exercise_name: Option<String>,
    pub position: i64,
    pub set_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkoutDetailResponse {
    pub workout_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<WorkoutItemDetail>,
}

impl From<crate::models::Workout> for WorkoutResponse {
    fn from(workout: crate::models::Workout) -> Self {
        Self {
            workout_id: workout.workout_id,
            name: workout.name,
            created_at: workout.created_at,
        }
    }
}
