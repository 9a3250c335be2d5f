#![allow(dead_code)]

use sqlx::SqlitePool;
use uuid::Uuid;

use storage::dto::exercise::CreateExerciseRequest;
use storage::dto::session::InitialSetRequest;
use storage::dto::workout::{CreateWorkoutRequest, WorkoutItemRequest};
use storage::models::{Exercise, Workout};
use storage::repository::category::CategoryRepository;
use storage::repository::exercise::ExerciseRepository;
use storage::repository::muscle_group::MuscleGroupRepository;
use storage::repository::workout::WorkoutRepository;

pub async fn seed_exercise(pool: &SqlitePool, name: &str) -> Exercise {
    let category = CategoryRepository::new(pool)
        .find_or_create("Strength")
        .await
        .unwrap();
    let muscle_group = MuscleGroupRepository::new(pool)
        .find_or_create("Legs")
        .await
        .unwrap();

    ExerciseRepository::new(pool)
        .create(&CreateExerciseRequest {
            name: name.to_string(),
            category_id: category.category_id,
            muscle_group_id: muscle_group.muscle_group_id,
        })
        .await
        .unwrap()
}

pub async fn seed_workout(
    pool: &SqlitePool,
    name: &str,
    exercise_id: Uuid,
    set_count: i64,
) -> Workout {
    WorkoutRepository::new(pool)
        .create(&CreateWorkoutRequest {
            name: name.to_string(),
            items: vec![WorkoutItemRequest {
                exercise_id,
                set_count,
            }],
        })
        .await
        .unwrap()
}

pub fn empty_sets(count: usize) -> Vec<InitialSetRequest> {
    (0..count)
        .map(|_| InitialSetRequest {
            weight: 0.0,
            reps: 0,
            is_completed: false,
        })
        .collect()
}
