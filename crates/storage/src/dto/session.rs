use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::SessionStatus;

/// Request payload for starting a tracked session from a workout template
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartSessionRequest {
    pub workout_id: Uuid,
}

/// One planned set supplied when adding an exercise to a session. The
/// 1-based `set_number` is assigned from the input position.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InitialSetRequest {
    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    #[serde(default)]
    pub weight: f64,

    #[validate(range(min = 0, message = "Reps must not be negative"))]
    #[serde(default)]
    pub reps: i64,

    #[serde(default)]
    pub is_completed: bool,
}

/// Request payload for adding an exercise to a tracked session
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddTrackedExerciseRequest {
    pub exercise_id: Uuid,

    #[validate(nested)]
    #[serde(default)]
    pub initial_sets: Vec<InitialSetRequest>,
}

/// Request payload for appending one set to a tracked exercise
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSetRequest {
    #[validate(range(min = 1, message = "Set number must be >= 1"))]
    pub set_number: i64,

    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    #[serde(default)]
    pub weight: f64,

    #[validate(range(min = 0, message = "Reps must not be negative"))]
    #[serde(default)]
    pub reps: i64,

    #[serde(default)]
    pub is_completed: bool,
}

/// Partial update for one set; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSetRequest {
    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    pub weight: Option<f64>,

    #[validate(range(min = 0, message = "Reps must not be negative"))]
    pub reps: Option<i64>,

    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub tracked_workout_id: Uuid,
    pub workout_id: Uuid,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrackedExerciseResponse {
    pub tracked_exercise_id: Uuid,
    pub tracked_workout_id: Uuid,
    pub exercise_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetResponse {
    pub set_id: Uuid,
    pub tracked_exercise_id: Uuid,
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
    pub is_completed: bool,
}

/// One tracked exercise with its sets, sorted ascending by `set_number`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrackedExerciseDetail {
    pub tracked_exercise_id: Uuid,
    pub exercise_id: Uuid,
    pub exercise_name: Option<String>,
    pub sets: Vec<SetResponse>,
}

/// Full session projection: the session row plus every tracked exercise
/// and its ordered sets, assembled in application code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDetailResponse {
    pub tracked_workout_id: Uuid,
    pub workout_id: Uuid,
    pub workout_name: Option<String>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub exercises: Vec<TrackedExerciseDetail>,
}

impl From<crate::models::TrackedWorkout> for SessionResponse {
    fn from(session: crate::models::TrackedWorkout) -> Self {
        Self {
            tracked_workout_id: session.tracked_workout_id,
            workout_id: session.workout_id,
            status: session.status,
            created_at: session.created_at,
            updated_at: session.updated_at,
            completed_at: session.completed_at,
        }
    }
}

impl From<crate::models::TrackedExercise> for TrackedExerciseResponse {
    fn from(exercise: crate::models::TrackedExercise) -> Self {
        Self {
            tracked_exercise_id: exercise.tracked_exercise_id,
            tracked_workout_id: exercise.tracked_workout_id,
            exercise_id: exercise.exercise_id,
            created_at: exercise.created_at,
        }
    }
}

impl From<crate::models::TrackedSet> for SetResponse {
    fn from(set: crate::models::TrackedSet) -> Self {
        Self {
            set_id: set.set_id,
            tracked_exercise_id: set.tracked_exercise_id,
            set_number: set.set_number,
            weight: set.weight,
            reps: set.reps,
            is_completed: set.is_completed,
        }
    }
}
