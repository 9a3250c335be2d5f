use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating an exercise. Names are unique; posting an
/// existing name returns the stored row unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateExerciseRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub category_id: Uuid,

    pub muscle_group_id: Uuid,
}

/// Request payload for updating an existing exercise
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateExerciseRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub category_id: Option<Uuid>,

    pub muscle_group_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExerciseResponse {
    pub exercise_id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub muscle_group_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<crate::models::Exercise> for ExerciseResponse {
    fn from(exercise: crate::models::Exercise) -> Self {
        Self {
            exercise_id: exercise.exercise_id,
            name: exercise.name,
            category_id: exercise.category_id,
            muscle_group_id: exercise.muscle_group_id,
            created_at: exercise.created_at,
        }
    }
}
