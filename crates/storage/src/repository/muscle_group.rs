use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::MuscleGroup;

/// Repository for muscle group operations
pub struct MuscleGroupRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MuscleGroupRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all muscle groups
    pub async fn list(&self) -> Result<Vec<MuscleGroup>> {
        let groups = sqlx::query_as::<_, MuscleGroup>(
            "SELECT muscle_group_id, name, created_at FROM muscle_groups ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(groups)
    }

    /// Find a muscle group by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<MuscleGroup> {
        sqlx::query_as::<_, MuscleGroup>(
            "SELECT muscle_group_id, name, created_at FROM muscle_groups WHERE muscle_group_id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Find a muscle group by name (case-insensitive)
    pub async fn find_by_name(&self, name: &str) -> Result<Option<MuscleGroup>> {
        let group = sqlx::query_as::<_, MuscleGroup>(
            "SELECT muscle_group_id, name, created_at FROM muscle_groups WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(group)
    }

    /// Find a muscle group by name or insert it. A second call with the
    /// same name is a no-op returning the existing row.
    pub async fn find_or_create(&self, name: &str) -> Result<MuscleGroup> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }

        let group = MuscleGroup {
            muscle_group_id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        let inserted = sqlx::query(
            "INSERT INTO muscle_groups (muscle_group_id, name, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(group.muscle_group_id)
        .bind(&group.name)
        .bind(group.created_at)
        .execute(self.pool)
        .await
        .map_err(StorageError::from);

        match inserted {
            Ok(_) => Ok(group),
            Err(e) if e.is_unique_violation() => self.find_by_name(name).await?.ok_or(e),
            Err(e) => Err(e),
        }
    }

    /// Delete a muscle group that no exercise references
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let referents: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM exercises WHERE muscle_group_id = ?1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if referents > 0 {
            return Err(StorageError::ReferentialIntegrity(format!(
                "muscle group is referenced by {referents} exercise(s)"
            )));
        }

        let result = sqlx::query("DELETE FROM muscle_groups WHERE muscle_group_id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
