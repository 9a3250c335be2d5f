use sqlx::SqlitePool;
use storage::{
    dto::workout::{CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutDetailResponse},
    error::Result,
    models::Workout,
    repository::workout::WorkoutRepository,
};
use uuid::Uuid;

pub async fn list_workouts(pool: &SqlitePool) -> Result<Vec<Workout>> {
    WorkoutRepository::new(pool).list().await
}

/// Get a workout template with its ordered items
pub async fn get_workout_detailed(pool: &SqlitePool, id: Uuid) -> Result<WorkoutDetailResponse> {
    WorkoutRepository::new(pool).find_with_items(id).await
}

/// Create a workout template with its items atomically
pub async fn create_workout(pool: &SqlitePool, request: &CreateWorkoutRequest) -> Result<Workout> {
    WorkoutRepository::new(pool).create(request).await
}

/// Update a workout template; supplying items replaces the list
pub async fn update_workout(
    pool: &SqlitePool,
    id: Uuid,
    request: &UpdateWorkoutRequest,
) -> Result<Workout> {
    let repo = WorkoutRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(id, &existing, request).await
}

pub async fn delete_workout(pool: &SqlitePool, id: Uuid) -> Result<()> {
    WorkoutRepository::new(pool).delete(id).await
}
