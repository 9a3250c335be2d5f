use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::workout::{
    CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutDetailResponse, WorkoutItemDetail,
    WorkoutItemRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Workout;

/// Repository for workout template operations
pub struct WorkoutRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WorkoutRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all workout templates, newest first
    pub async fn list(&self) -> Result<Vec<Workout>> {
        let workouts = sqlx::query_as::<_, Workout>(
            "SELECT workout_id, name, created_at FROM workouts ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(workouts)
    }

    /// Find a workout template by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Workout> {
        sqlx::query_as::<_, Workout>(
            "SELECT workout_id, name, created_at FROM workouts WHERE workout_id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Get a workout template with its ordered items, enriched with
    /// exercise names for display
    pub async fn find_with_items(&self, id: Uuid) -> Result<WorkoutDetailResponse> {
        let workout = self.find_by_id(id).await?;

        let items = sqlx::query_as::<_, WorkoutItemDetail>(
            "SELECT wi.workout_item_id, wi.exercise_id, e.name AS exercise_name, \
                    wi.position, wi.set_count \
             FROM workout_items wi \
             LEFT JOIN exercises e ON e.exercise_id = wi.exercise_id \
             WHERE wi.workout_id = ?1 \
             ORDER BY wi.position",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(WorkoutDetailResponse {
            workout_id: workout.workout_id,
            name: workout.name,
            created_at: workout.created_at,
            items,
        })
    }

    /// Create a workout template with its ordered items in one transaction.
    /// Every referenced exercise must exist.
    pub async fn create(&self, req: &CreateWorkoutRequest) -> Result<Workout> {
        for item in &req.items {
            self.require_exercise(item.exercise_id).await?;
        }

        let workout = Workout {
            workout_id: Uuid::new_v4(),
            name: req.name.clone(),
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO workouts (workout_id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(workout.workout_id)
            .bind(&workout.name)
            .bind(workout.created_at)
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, workout.workout_id, &req.items).await?;

        tx.commit().await?;

        Ok(workout)
    }

    /// Update a workout template. Supplying items replaces the whole
    /// ordered list atomically.
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Workout,
        req: &UpdateWorkoutRequest,
    ) -> Result<Workout> {
        let name = req.name.as_ref().unwrap_or(&existing.name);

        if let Some(items) = &req.items {
            for item in items {
                self.require_exercise(item.exercise_id).await?;
            }
        }

        let mut tx = self.pool.begin().await?;

        let workout = sqlx::query_as::<_, Workout>(
            "UPDATE workouts SET name = ?2 WHERE workout_id = ?1 \
             RETURNING workout_id, name, created_at",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if let Some(items) = &req.items {
            sqlx::query("DELETE FROM workout_items WHERE workout_id = ?1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            Self::insert_items(&mut tx, id, items).await?;
        }

        tx.commit().await?;

        Ok(workout)
    }

    /// Delete a workout template and its items
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM workout_items WHERE workout_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM workouts WHERE workout_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn insert_items(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        workout_id: Uuid,
        items: &[WorkoutItemRequest],
    ) -> Result<()> {
        for (index, item) in items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO workout_items \
                 (workout_item_id, workout_id, exercise_id, position, set_count) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(Uuid::new_v4())
            .bind(workout_id)
            .bind(item.exercise_id)
            .bind(index as i64 + 1)
            .bind(item.set_count)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    async fn require_exercise(&self, id: Uuid) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM exercises WHERE exercise_id = ?1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if exists { Ok(()) } else { Err(StorageError::NotFound) }
    }
}
