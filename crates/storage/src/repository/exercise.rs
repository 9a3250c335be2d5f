use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::exercise::{CreateExerciseRequest, UpdateExerciseRequest};
use crate::error::{Result, StorageError};
use crate::models::Exercise;

const EXERCISE_COLUMNS: &str = "exercise_id, name, category_id, muscle_group_id, created_at";

/// Repository for exercise catalog operations
pub struct ExerciseRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ExerciseRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List exercises, paginated, with the total row count
    pub async fn list(&self, pagination: &PaginationParams) -> Result<(Vec<Exercise>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises")
            .fetch_one(self.pool)
            .await?;

        let exercises = sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises ORDER BY name LIMIT ?1 OFFSET ?2"
        ))
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok((exercises, total))
    }

    /// Find an exercise by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Exercise> {
        sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE exercise_id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Find an exercise by name (case-insensitive)
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Exercise>> {
        let exercise = sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE name = ?1"
        ))
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(exercise)
    }

    /// Create an exercise, or return the existing row when the name is
    /// already taken. Both referenced catalog rows must exist.
    pub async fn create(&self, req: &CreateExerciseRequest) -> Result<Exercise> {
        if let Some(existing) = self.find_by_name(&req.name).await? {
            return Ok(existing);
        }

        self.require_category(req.category_id).await?;
        self.require_muscle_group(req.muscle_group_id).await?;

        let exercise = Exercise {
            exercise_id: Uuid::new_v4(),
            name: req.name.clone(),
            category_id: req.category_id,
            muscle_group_id: req.muscle_group_id,
            created_at: Utc::now(),
        };

        let inserted = sqlx::query(
            "INSERT INTO exercises (exercise_id, name, category_id, muscle_group_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(exercise.exercise_id)
        .bind(&exercise.name)
        .bind(exercise.category_id)
        .bind(exercise.muscle_group_id)
        .bind(exercise.created_at)
        .execute(self.pool)
        .await
        .map_err(StorageError::from);

        match inserted {
            Ok(_) => Ok(exercise),
            Err(e) if e.is_unique_violation() => self.find_by_name(&req.name).await?.ok_or(e),
            Err(e) => Err(e),
        }
    }

    /// Update an existing exercise; absent fields keep their prior values
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Exercise,
        req: &UpdateExerciseRequest,
    ) -> Result<Exercise> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let category_id = req.category_id.unwrap_or(existing.category_id);
        let muscle_group_id = req.muscle_group_id.unwrap_or(existing.muscle_group_id);

        if category_id != existing.category_id {
            self.require_category(category_id).await?;
        }
        if muscle_group_id != existing.muscle_group_id {
            self.require_muscle_group(muscle_group_id).await?;
        }

        sqlx::query_as::<_, Exercise>(&format!(
            "UPDATE exercises SET name = ?2, category_id = ?3, muscle_group_id = ?4 \
             WHERE exercise_id = ?1 RETURNING {EXERCISE_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(category_id)
        .bind(muscle_group_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Delete an exercise that nothing references (workout templates or
    /// tracked session history).
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let template_refs: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workout_items WHERE exercise_id = ?1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        let tracked_refs: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tracked_exercises WHERE exercise_id = ?1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if template_refs + tracked_refs > 0 {
            return Err(StorageError::ReferentialIntegrity(format!(
                "exercise is referenced by {template_refs} workout item(s) and {tracked_refs} tracked exercise(s)"
            )));
        }

        let result = sqlx::query("DELETE FROM exercises WHERE exercise_id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn require_category(&self, id: Uuid) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE category_id = ?1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if exists { Ok(()) } else { Err(StorageError::NotFound) }
    }

    async fn require_muscle_group(&self, id: Uuid) -> Result<()> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM muscle_groups WHERE muscle_group_id = ?1)",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        if exists { Ok(()) } else { Err(StorageError::NotFound) }
    }
}
