use sqlx::SqlitePool;
use storage::{error::Result, models::MuscleGroup, repository::muscle_group::MuscleGroupRepository};
use uuid::Uuid;

pub async fn list_muscle_groups(pool: &SqlitePool) -> Result<Vec<MuscleGroup>> {
    MuscleGroupRepository::new(pool).list().await
}

pub async fn get_muscle_group(pool: &SqlitePool, id: Uuid) -> Result<MuscleGroup> {
    MuscleGroupRepository::new(pool).find_by_id(id).await
}

pub async fn create_muscle_group(pool: &SqlitePool, name: &str) -> Result<MuscleGroup> {
    MuscleGroupRepository::new(pool).find_or_create(name).await
}

pub async fn delete_muscle_group(pool: &SqlitePool, id: Uuid) -> Result<()> {
    MuscleGroupRepository::new(pool).delete(id).await
}
