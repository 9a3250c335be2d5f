use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::session::{
    AddTrackedExerciseRequest, CreateSetRequest, SessionDetailResponse, SetResponse,
    TrackedExerciseDetail, UpdateSetRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{SessionStatus, TrackedExercise, TrackedSet, TrackedWorkout};

const SESSION_COLUMNS: &str =
    "tracked_workout_id, workout_id, user_id, status, created_at, updated_at, completed_at";
const EXERCISE_COLUMNS: &str =
    "tracked_exercise_id, tracked_workout_id, exercise_id, user_id, created_at";
const SET_COLUMNS: &str =
    "set_id, tracked_exercise_id, set_number, weight, reps, is_completed, user_id";

/// Repository for tracked workout sessions: the session lifecycle, its
/// exercise and set children, and the composed session projection.
///
/// Every mutation takes the resolved caller identity explicitly. Ownership
/// checks ride on the `user_id` denormalized onto each row, so no mutation
/// ever needs to walk up the parent chain.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Start a session for a workout template. The template must exist;
    /// exercises are materialized later, on demand.
    pub async fn start(&self, workout_id: Uuid, user_id: Uuid) -> Result<TrackedWorkout> {
        let workout_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM workouts WHERE workout_id = ?1)")
                .bind(workout_id)
                .fetch_one(self.pool)
                .await?;

        if !workout_exists {
            return Err(StorageError::NotFound);
        }

        let now = Utc::now();
        let session = TrackedWorkout {
            tracked_workout_id: Uuid::new_v4(),
            workout_id,
            user_id,
            status: SessionStatus::Started,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        sqlx::query(
            "INSERT INTO tracked_workouts \
             (tracked_workout_id, workout_id, user_id, status, created_at, updated_at, completed_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(session.tracked_workout_id)
        .bind(session.workout_id)
        .bind(session.user_id)
        .bind(session.status)
        .bind(session.created_at)
        .bind(session.updated_at)
        .bind(session.completed_at)
        .execute(self.pool)
        .await?;

        Ok(session)
    }

    /// List the caller's sessions, newest first, paginated
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        pagination: &PaginationParams,
    ) -> Result<(Vec<TrackedWorkout>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tracked_workouts WHERE user_id = ?1")
                .bind(user_id)
                .fetch_one(self.pool)
                .await?;

        let sessions = sqlx::query_as::<_, TrackedWorkout>(&format!(
            "SELECT {SESSION_COLUMNS} FROM tracked_workouts WHERE user_id = ?1 \
             ORDER BY created_at DESC LIMIT ?2 OFFSET ?3"
        ))
        .bind(user_id)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok((sessions, total))
    }

    /// Mark a session completed. Terminal; the timestamps move, the rest of
    /// the row stays.
    pub async fn complete(&self, tracked_workout_id: Uuid, user_id: Uuid) -> Result<TrackedWorkout> {
        let now = Utc::now();

        sqlx::query_as::<_, TrackedWorkout>(&format!(
            "UPDATE tracked_workouts SET status = ?3, completed_at = ?4, updated_at = ?4 \
             WHERE tracked_workout_id = ?1 AND user_id = ?2 \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(tracked_workout_id)
        .bind(user_id)
        .bind(SessionStatus::Completed)
        .bind(now)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFoundOrUnauthorized)
    }

    /// Add an exercise to a session, materializing its initial sets with
    /// 1-based set numbers in input order. Parent row plus all children are
    /// inserted in one transaction, so a failure leaves nothing behind.
    pub async fn add_tracked_exercise(
        &self,
        tracked_workout_id: Uuid,
        req: &AddTrackedExerciseRequest,
        user_id: Uuid,
    ) -> Result<TrackedExercise> {
        let owned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM tracked_workouts \
             WHERE tracked_workout_id = ?1 AND user_id = ?2)",
        )
        .bind(tracked_workout_id)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        if !owned {
            return Err(StorageError::NotFoundOrUnauthorized);
        }

        let exercise = TrackedExercise {
            tracked_exercise_id: Uuid::new_v4(),
            tracked_workout_id,
            exercise_id: req.exercise_id,
            user_id,
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO tracked_exercises \
             (tracked_exercise_id, tracked_workout_id, exercise_id, user_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(exercise.tracked_exercise_id)
        .bind(exercise.tracked_workout_id)
        .bind(exercise.exercise_id)
        .bind(exercise.user_id)
        .bind(exercise.created_at)
        .execute(&mut *tx)
        .await?;

        for (index, set) in req.initial_sets.iter().enumerate() {
            sqlx::query(
                "INSERT INTO tracked_sets \
                 (set_id, tracked_exercise_id, set_number, weight, reps, is_completed, user_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(Uuid::new_v4())
            .bind(exercise.tracked_exercise_id)
            .bind(index as i64 + 1)
            .bind(set.weight)
            .bind(set.reps)
            .bind(set.is_completed)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(exercise)
    }

    /// Append one set to a tracked exercise the caller owns
    pub async fn create_set(
        &self,
        tracked_exercise_id: Uuid,
        req: &CreateSetRequest,
        user_id: Uuid,
    ) -> Result<TrackedSet> {
        let owned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM tracked_exercises \
             WHERE tracked_exercise_id = ?1 AND user_id = ?2)",
        )
        .bind(tracked_exercise_id)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        if !owned {
            return Err(StorageError::NotFoundOrUnauthorized);
        }

        let set = TrackedSet {
            set_id: Uuid::new_v4(),
            tracked_exercise_id,
            set_number: req.set_number,
            weight: req.weight,
            reps: req.reps,
            is_completed: req.is_completed,
            user_id,
        };

        let inserted = sqlx::query(
            "INSERT INTO tracked_sets \
             (set_id, tracked_exercise_id, set_number, weight, reps, is_completed, user_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(set.set_id)
        .bind(set.tracked_exercise_id)
        .bind(set.set_number)
        .bind(set.weight)
        .bind(set.reps)
        .bind(set.is_completed)
        .bind(set.user_id)
        .execute(self.pool)
        .await
        .map_err(StorageError::from);

        match inserted {
            Ok(_) => Ok(set),
            Err(e) if e.is_unique_violation() => Err(StorageError::ConstraintViolation(format!(
                "set number {} already exists for this exercise",
                req.set_number
            ))),
            Err(e) => Err(e),
        }
    }

    /// Partially update one set. Absent or foreign rows are
    /// indistinguishable to the caller; unspecified fields keep their
    /// stored values exactly.
    pub async fn update_set(
        &self,
        set_id: Uuid,
        req: &UpdateSetRequest,
        user_id: Uuid,
    ) -> Result<TrackedSet> {
        let existing = sqlx::query_as::<_, TrackedSet>(&format!(
            "SELECT {SET_COLUMNS} FROM tracked_sets WHERE set_id = ?1 AND user_id = ?2"
        ))
        .bind(set_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFoundOrUnauthorized)?;

        let weight = req.weight.unwrap_or(existing.weight);
        let reps = req.reps.unwrap_or(existing.reps);
        let is_completed = req.is_completed.unwrap_or(existing.is_completed);

        sqlx::query_as::<_, TrackedSet>(&format!(
            "UPDATE tracked_sets SET weight = ?3, reps = ?4, is_completed = ?5 \
             WHERE set_id = ?1 AND user_id = ?2 \
             RETURNING {SET_COLUMNS}"
        ))
        .bind(set_id)
        .bind(user_id)
        .bind(weight)
        .bind(reps)
        .bind(is_completed)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFoundOrUnauthorized)
    }

    /// Delete one set the caller owns. Sibling set numbers are left as
    /// they are; gaps are part of the contract.
    pub async fn remove_set(&self, set_id: Uuid, user_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM tracked_sets WHERE set_id = ?1 AND user_id = ?2")
            .bind(set_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFoundOrUnauthorized);
        }

        Ok(())
    }

    /// Compose the full session projection: the session row plus, for every
    /// tracked exercise found by a filtered scan on the parent id, its sets.
    /// The store hands sets back in no particular order; they are re-sorted
    /// here on every fetch, which is the ordering contract callers get.
    pub async fn find_detailed(
        &self,
        tracked_workout_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SessionDetailResponse>> {
        let session = sqlx::query_as::<_, TrackedWorkout>(&format!(
            "SELECT {SESSION_COLUMNS} FROM tracked_workouts \
             WHERE tracked_workout_id = ?1 AND user_id = ?2"
        ))
        .bind(tracked_workout_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(session) = session else {
            return Ok(None);
        };

        let workout_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM workouts WHERE workout_id = ?1")
                .bind(session.workout_id)
                .fetch_optional(self.pool)
                .await?;

        let exercises = sqlx::query_as::<_, TrackedExercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM tracked_exercises \
             WHERE tracked_workout_id = ?1 ORDER BY created_at"
        ))
        .bind(tracked_workout_id)
        .fetch_all(self.pool)
        .await?;

        let mut details = Vec::with_capacity(exercises.len());

        for exercise in exercises {
            let exercise_name: Option<String> =
                sqlx::query_scalar("SELECT name FROM exercises WHERE exercise_id = ?1")
                    .bind(exercise.exercise_id)
                    .fetch_optional(self.pool)
                    .await?;

            let mut sets = sqlx::query_as::<_, TrackedSet>(&format!(
                "SELECT {SET_COLUMNS} FROM tracked_sets WHERE tracked_exercise_id = ?1"
            ))
            .bind(exercise.tracked_exercise_id)
            .fetch_all(self.pool)
            .await?;

            sets.sort_by_key(|set| set.set_number);

            details.push(TrackedExerciseDetail {
                tracked_exercise_id: exercise.tracked_exercise_id,
                exercise_id: exercise.exercise_id,
                exercise_name,
                sets: sets.into_iter().map(SetResponse::from).collect(),
            });
        }

        Ok(Some(SessionDetailResponse {
            tracked_workout_id: session.tracked_workout_id,
            workout_id: session.workout_id,
            workout_name,
            status: session.status,
            created_at: session.created_at,
            updated_at: session.updated_at,
            completed_at: session.completed_at,
            exercises: details,
        }))
    }
}
