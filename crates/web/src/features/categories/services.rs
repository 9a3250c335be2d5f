use sqlx::SqlitePool;
use storage::{error::Result, models::Category, repository::category::CategoryRepository};
use uuid::Uuid;

/// List all categories
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>> {
    CategoryRepository::new(pool).list().await
}

/// Get a category by ID
pub async fn get_category(pool: &SqlitePool, id: Uuid) -> Result<Category> {
    CategoryRepository::new(pool).find_by_id(id).await
}

/// Create a category, or return the existing one with the same name
pub async fn create_category(pool: &SqlitePool, name: &str) -> Result<Category> {
    CategoryRepository::new(pool).find_or_create(name).await
}

/// Delete a category that no exercise references
pub async fn delete_category(pool: &SqlitePool, id: Uuid) -> Result<()> {
    CategoryRepository::new(pool).delete(id).await
}
