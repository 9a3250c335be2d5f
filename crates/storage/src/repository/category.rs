use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Category;

/// Repository for exercise category operations
pub struct CategoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT category_id, name, created_at FROM categories ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Find a category by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            "SELECT category_id, name, created_at FROM categories WHERE category_id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Find a category by name (case-insensitive)
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT category_id, name, created_at FROM categories WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Find a category by name or insert it. A second call with the same
    /// name is a no-op returning the existing row.
    pub async fn find_or_create(&self, name: &str) -> Result<Category> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }

        let category = Category {
            category_id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        let inserted =
            sqlx::query("INSERT INTO categories (category_id, name, created_at) VALUES (?1, ?2, ?3)")
                .bind(category.category_id)
                .bind(&category.name)
                .bind(category.created_at)
                .execute(self.pool)
                .await
                .map_err(StorageError::from);

        match inserted {
            Ok(_) => Ok(category),
            // Lost a create race: the row exists now, return it.
            Err(e) if e.is_unique_violation() => self.find_by_name(name).await?.ok_or(e),
            Err(e) => Err(e),
        }
    }

    /// Delete a category. Rejected while any exercise still references it,
    /// since the schema carries no foreign-key constraints.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let referents: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM exercises WHERE category_id = ?1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if referents > 0 {
            return Err(StorageError::ReferentialIntegrity(format!(
                "category is referenced by {referents} exercise(s)"
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE category_id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
