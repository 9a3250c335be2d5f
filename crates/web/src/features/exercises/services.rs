use sqlx::SqlitePool;
use storage::{
    dto::common::PaginationParams,
    dto::exercise::{CreateExerciseRequest, UpdateExerciseRequest},
    error::Result,
    models::Exercise,
    repository::exercise::ExerciseRepository,
};
use uuid::Uuid;

/// List exercises with the total count for pagination metadata
pub async fn list_exercises(
    pool: &SqlitePool,
    pagination: &PaginationParams,
) -> Result<(Vec<Exercise>, i64)> {
    ExerciseRepository::new(pool).list(pagination).await
}

pub async fn get_exercise(pool: &SqlitePool, id: Uuid) -> Result<Exercise> {
    ExerciseRepository::new(pool).find_by_id(id).await
}

/// Create an exercise, or return the existing one with the same name
pub async fn create_exercise(pool: &SqlitePool, request: &CreateExerciseRequest) -> Result<Exercise> {
    ExerciseRepository::new(pool).create(request).await
}

/// Update an exercise; absent fields keep their prior values
pub async fn update_exercise(
    pool: &SqlitePool,
    id: Uuid,
    request: &UpdateExerciseRequest,
) -> Result<Exercise> {
    let repo = ExerciseRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(id, &existing, request).await
}

/// Delete an exercise that nothing references
pub async fn delete_exercise(pool: &SqlitePool, id: Uuid) -> Result<()> {
    ExerciseRepository::new(pool).delete(id).await
}
