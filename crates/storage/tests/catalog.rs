mod common;

use sqlx::SqlitePool;
use uuid::Uuid;

use storage::dto::common::PaginationParams;
use storage::dto::exercise::{CreateExerciseRequest, UpdateExerciseRequest};
use storage::dto::workout::{CreateWorkoutRequest, WorkoutItemRequest};
use storage::error::StorageError;
use storage::repository::category::CategoryRepository;
use storage::repository::exercise::ExerciseRepository;
use storage::repository::muscle_group::MuscleGroupRepository;
use storage::repository::workout::WorkoutRepository;

use common::seed_exercise;

#[sqlx::test]
async fn category_creation_is_idempotent_by_name(pool: SqlitePool) {
    let repo = CategoryRepository::new(&pool);

    let first = repo.find_or_create("Strength").await.unwrap();
    let second = repo.find_or_create("Strength").await.unwrap();

    assert_eq!(first.category_id, second.category_id);
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[sqlx::test]
async fn category_names_match_case_insensitively(pool: SqlitePool) {
    let repo = CategoryRepository::new(&pool);

    let first = repo.find_or_create("Strength").await.unwrap();
    let second = repo.find_or_create("strength").await.unwrap();

    assert_eq!(first.category_id, second.category_id);
}

#[sqlx::test]
async fn exercise_creation_is_idempotent_by_name(pool: SqlitePool) {
    let first = seed_exercise(&pool, "Squat").await;
    let second = seed_exercise(&pool, "Squat").await;

    assert_eq!(first.exercise_id, second.exercise_id);

    let (exercises, total) = ExerciseRepository::new(&pool)
        .list(&PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(exercises.len(), 1);
}

#[sqlx::test]
async fn referenced_category_cannot_be_deleted(pool: SqlitePool) {
    let exercise = seed_exercise(&pool, "Squat").await;

    let categories = CategoryRepository::new(&pool);
    let err = categories.delete(exercise.category_id).await.unwrap_err();
    assert!(matches!(err, StorageError::ReferentialIntegrity(_)));

    // Both the category and the referencing exercise survive the attempt.
    categories.find_by_id(exercise.category_id).await.unwrap();
    ExerciseRepository::new(&pool)
        .find_by_id(exercise.exercise_id)
        .await
        .unwrap();
}

#[sqlx::test]
async fn referenced_muscle_group_cannot_be_deleted(pool: SqlitePool) {
    let exercise = seed_exercise(&pool, "Squat").await;

    let err = MuscleGroupRepository::new(&pool)
        .delete(exercise.muscle_group_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ReferentialIntegrity(_)));
}

#[sqlx::test]
async fn unreferenced_category_delete_succeeds(pool: SqlitePool) {
    let repo = CategoryRepository::new(&pool);
    let category = repo.find_or_create("Cardio").await.unwrap();

    repo.delete(category.category_id).await.unwrap();

    let err = repo.find_by_id(category.category_id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[sqlx::test]
async fn exercise_referenced_by_template_cannot_be_deleted(pool: SqlitePool) {
    let exercise = seed_exercise(&pool, "Squat").await;

    WorkoutRepository::new(&pool)
        .create(&CreateWorkoutRequest {
            name: "Leg Day".to_string(),
            items: vec![WorkoutItemRequest {
                exercise_id: exercise.exercise_id,
                set_count: 3,
            }],
        })
        .await
        .unwrap();

    let err = ExerciseRepository::new(&pool)
        .delete(exercise.exercise_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ReferentialIntegrity(_)));
}

#[sqlx::test]
async fn exercise_update_merges_partial_fields(pool: SqlitePool) {
    let exercise = seed_exercise(&pool, "Squat").await;

    let repo = ExerciseRepository::new(&pool);
    let updated = repo
        .update(
            exercise.exercise_id,
            &exercise,
            &UpdateExerciseRequest {
                name: Some("Back Squat".to_string()),
                category_id: None,
                muscle_group_id: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Back Squat");
    assert_eq!(updated.category_id, exercise.category_id);
    assert_eq!(updated.muscle_group_id, exercise.muscle_group_id);
}

#[sqlx::test]
async fn exercise_create_requires_catalog_rows(pool: SqlitePool) {
    let err = ExerciseRepository::new(&pool)
        .create(&CreateExerciseRequest {
            name: "Squat".to_string(),
            category_id: Uuid::new_v4(),
            muscle_group_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound));
}

#[sqlx::test]
async fn workout_items_come_back_in_template_order(pool: SqlitePool) {
    let squat = seed_exercise(&pool, "Squat").await;
    let deadlift = seed_exercise(&pool, "Deadlift").await;

    let repo = WorkoutRepository::new(&pool);
    let workout = repo
        .create(&CreateWorkoutRequest {
            name: "Leg Day".to_string(),
            items: vec![
                WorkoutItemRequest {
                    exercise_id: squat.exercise_id,
                    set_count: 3,
                },
                WorkoutItemRequest {
                    exercise_id: deadlift.exercise_id,
                    set_count: 5,
                },
            ],
        })
        .await
        .unwrap();

    let detail = repo.find_with_items(workout.workout_id).await.unwrap();

    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.items[0].position, 1);
    assert_eq!(detail.items[0].exercise_name.as_deref(), Some("Squat"));
    assert_eq!(detail.items[1].position, 2);
    assert_eq!(detail.items[1].set_count, 5);
}

#[sqlx::test]
async fn workout_with_unknown_exercise_is_rejected(pool: SqlitePool) {
    let err = WorkoutRepository::new(&pool)
        .create(&CreateWorkoutRequest {
            name: "Leg Day".to_string(),
            items: vec![WorkoutItemRequest {
                exercise_id: Uuid::new_v4(),
                set_count: 3,
            }],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound));
}
