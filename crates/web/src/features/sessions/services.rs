use sqlx::SqlitePool;
use storage::{
    dto::common::PaginationParams,
    dto::session::{
        AddTrackedExerciseRequest, CreateSetRequest, SessionDetailResponse, UpdateSetRequest,
    },
    error::Result,
    models::{TrackedExercise, TrackedSet, TrackedWorkout},
    repository::session::SessionRepository,
};
use uuid::Uuid;

/// Start a session for a workout template
pub async fn start_session(
    pool: &SqlitePool,
    workout_id: Uuid,
    user_id: Uuid,
) -> Result<TrackedWorkout> {
    SessionRepository::new(pool).start(workout_id, user_id).await
}

/// List the caller's sessions with the total count
pub async fn list_sessions(
    pool: &SqlitePool,
    user_id: Uuid,
    pagination: &PaginationParams,
) -> Result<(Vec<TrackedWorkout>, i64)> {
    SessionRepository::new(pool)
        .list_for_user(user_id, pagination)
        .await
}

/// Full session projection, or `None` when the id is absent or foreign
pub async fn get_session(
    pool: &SqlitePool,
    tracked_workout_id: Uuid,
    user_id: Uuid,
) -> Result<Option<SessionDetailResponse>> {
    SessionRepository::new(pool)
        .find_detailed(tracked_workout_id, user_id)
        .await
}

/// Mark a session completed
pub async fn complete_session(
    pool: &SqlitePool,
    tracked_workout_id: Uuid,
    user_id: Uuid,
) -> Result<TrackedWorkout> {
    SessionRepository::new(pool)
        .complete(tracked_workout_id, user_id)
        .await
}

/// Add an exercise (with its initial sets) to a session
pub async fn add_tracked_exercise(
    pool: &SqlitePool,
    tracked_workout_id: Uuid,
    request: &AddTrackedExerciseRequest,
    user_id: Uuid,
) -> Result<TrackedExercise> {
    SessionRepository::new(pool)
        .add_tracked_exercise(tracked_workout_id, request, user_id)
        .await
}

/// Append one set to a tracked exercise
pub async fn create_set(
    pool: &SqlitePool,
    tracked_exercise_id: Uuid,
    request: &CreateSetRequest,
    user_id: Uuid,
) -> Result<TrackedSet> {
    SessionRepository::new(pool)
        .create_set(tracked_exercise_id, request, user_id)
        .await
}

/// Partially update one set
pub async fn update_set(
    pool: &SqlitePool,
    set_id: Uuid,
    request: &UpdateSetRequest,
    user_id: Uuid,
) -> Result<TrackedSet> {
    SessionRepository::new(pool)
        .update_set(set_id, request, user_id)
        .await
}

/// Delete one set
pub async fn remove_set(pool: &SqlitePool, set_id: Uuid, user_id: Uuid) -> Result<()> {
    SessionRepository::new(pool).remove_set(set_id, user_id).await
}
