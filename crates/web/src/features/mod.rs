use axum::Router;

use crate::AppState;

pub mod categories;
pub mod exercises;
pub mod muscle_groups;
pub mod sessions;
pub mod workouts;

/// Assemble every feature router under one `/api` tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::routes::routes())
        .nest("/muscle-groups", muscle_groups::routes::routes())
        .nest("/exercises", exercises::routes::routes())
        .nest("/workouts", workouts::routes::routes())
        // Session routes span three top-level prefixes (/sessions,
        // /tracked-exercises, /sets), so the feature mounts them itself.
        .merge(sessions::routes::routes())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use sqlx::SqlitePool;
    use storage::Database;
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::auth::AuthTokens;

    const TOKEN: &str = "alice-token";
    const USER_ID: &str = "2f1f9e2e-6b7c-4a40-9d55-0a6a1c6a7b10";

    fn test_app(pool: SqlitePool) -> Router {
        let state = AppState {
            db: Database::from_pool(pool),
            tokens: AuthTokens::from_comma_separated(&format!("{TOKEN}:{USER_ID}")),
        };

        Router::new().nest("/api", routes()).with_state(state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    #[sqlx::test(migrations = "../storage/migrations")]
    async fn mutations_fail_closed_without_identity(pool: SqlitePool) {
        let app = test_app(pool);
        let payload = json!({ "workout_id": uuid::Uuid::new_v4() });

        let (status, _) = send(&app, "POST", "/api/sessions", None, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            "POST",
            "/api/sessions",
            Some("unknown-token"),
            Some(payload),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test(migrations = "../storage/migrations")]
    async fn request_validation_runs_before_domain_logic(pool: SqlitePool) {
        let app = test_app(pool);

        let (status, body) = send(
            &app,
            "POST",
            "/api/categories",
            Some(TOKEN),
            Some(json!({ "name": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
    }

    #[sqlx::test(migrations = "../storage/migrations")]
    async fn full_session_flow_over_http(pool: SqlitePool) {
        let app = test_app(pool);

        let (status, category) = send(
            &app,
            "POST",
            "/api/categories",
            Some(TOKEN),
            Some(json!({ "name": "Strength" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, group) = send(
            &app,
            "POST",
            "/api/muscle-groups",
            Some(TOKEN),
            Some(json!({ "name": "Legs" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, exercise) = send(
            &app,
            "POST",
            "/api/exercises",
            Some(TOKEN),
            Some(json!({
                "name": "Squat",
                "category_id": category["category_id"],
                "muscle_group_id": group["muscle_group_id"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, workout) = send(
            &app,
            "POST",
            "/api/workouts",
            Some(TOKEN),
            Some(json!({
                "name": "Leg Day",
                "items": [{ "exercise_id": exercise["exercise_id"], "set_count": 3 }],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, session) = send(
            &app,
            "POST",
            "/api/sessions",
            Some(TOKEN),
            Some(json!({ "workout_id": workout["workout_id"] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(session["status"], "started");

        let session_id = session["tracked_workout_id"].as_str().unwrap().to_string();

        let empty_set = json!({ "weight": 0.0, "reps": 0, "is_completed": false });
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/sessions/{session_id}/exercises"),
            Some(TOKEN),
            Some(json!({
                "exercise_id": exercise["exercise_id"],
                "initial_sets": [empty_set.clone(), empty_set.clone(), empty_set],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, detail) = send(
            &app,
            "GET",
            &format!("/api/sessions/{session_id}"),
            Some(TOKEN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["exercises"].as_array().unwrap().len(), 1);

        let sets = detail["exercises"][0]["sets"].as_array().unwrap();
        assert_eq!(sets.len(), 3);
        let first_set_id = sets[0]["set_id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/api/sets/{first_set_id}"),
            Some(TOKEN),
            Some(json!({ "weight": 60.0, "reps": 8 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, updated) = send(
            &app,
            "PATCH",
            &format!("/api/sets/{first_set_id}"),
            Some(TOKEN),
            Some(json!({ "is_completed": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["weight"], 60.0);
        assert_eq!(updated["reps"], 8);
        assert_eq!(updated["is_completed"], true);

        let (status, detail) = send(
            &app,
            "GET",
            &format!("/api/sessions/{session_id}"),
            Some(TOKEN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let sets = detail["exercises"][0]["sets"].as_array().unwrap();
        assert_eq!(sets[0]["weight"], 60.0);
        assert_eq!(sets[0]["reps"], 8);
        assert_eq!(sets[0]["is_completed"], true);
        for set in &sets[1..] {
            assert_eq!(set["weight"], 0.0);
            assert_eq!(set["reps"], 0);
            assert_eq!(set["is_completed"], false);
        }

        let (status, negative) = send(
            &app,
            "PATCH",
            &format!("/api/sets/{first_set_id}"),
            Some(TOKEN),
            Some(json!({ "weight": -5.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(negative["error"], "Validation failed");

        let (status, completed) = send(
            &app,
            "POST",
            &format!("/api/sessions/{session_id}/complete"),
            Some(TOKEN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(completed["status"], "completed");
        assert!(completed["completed_at"].is_string());
    }

    #[sqlx::test(migrations = "../storage/migrations")]
    async fn referenced_category_delete_conflicts(pool: SqlitePool) {
        let app = test_app(pool);

        let (_, category) = send(
            &app,
            "POST",
            "/api/categories",
            Some(TOKEN),
            Some(json!({ "name": "Strength" })),
        )
        .await;
        let (_, group) = send(
            &app,
            "POST",
            "/api/muscle-groups",
            Some(TOKEN),
            Some(json!({ "name": "Legs" })),
        )
        .await;
        let (_, exercise) = send(
            &app,
            "POST",
            "/api/exercises",
            Some(TOKEN),
            Some(json!({
                "name": "Squat",
                "category_id": category["category_id"],
                "muscle_group_id": group["muscle_group_id"],
            })),
        )
        .await;

        let category_id = category["category_id"].as_str().unwrap().to_string();
        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/categories/{category_id}"),
            Some(TOKEN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Category and exercise both still present afterwards.
        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/categories/{category_id}"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let exercise_id = exercise["exercise_id"].as_str().unwrap().to_string();
        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/exercises/{exercise_id}"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
