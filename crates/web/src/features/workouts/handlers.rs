use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::workout::{
    CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutDetailResponse, WorkoutResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::WebResult;
use crate::middleware::auth::AuthedUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/workouts",
    responses(
        (status = 200, description = "List all workout templates", body = Vec<WorkoutResponse>)
    ),
    tag = "workouts"
)]
pub async fn list_workouts(State(state): State<AppState>) -> WebResult<Response> {
    let workouts = services::list_workouts(state.db.pool()).await?;

    let response: Vec<WorkoutResponse> = workouts.into_iter().map(WorkoutResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/workouts/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    responses(
        (status = 200, description = "Workout with its ordered items", body = WorkoutDetailResponse),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    let detail = services::get_workout_detailed(state.db.pool(), id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    post,
    path = "/api/workouts",
    request_body = CreateWorkoutRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Workout created", body = WorkoutResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Referenced exercise not found")
    ),
    tag = "workouts"
)]
pub async fn create_workout(
    State(state): State<AppState>,
    _user: AuthedUser,
    Json(payload): Json<CreateWorkoutRequest>,
) -> WebResult<Response> {
    payload.validate()?;

    let workout = services::create_workout(state.db.pool(), &payload).await?;

    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(workout))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/workouts/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    request_body = UpdateWorkoutRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Workout updated", body = WorkoutResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn update_workout(
    State(state): State<AppState>,
    _user: AuthedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWorkoutRequest>,
) -> WebResult<Response> {
    payload.validate()?;

    let workout = services::update_workout(state.db.pool(), id, &payload).await?;

    Ok(Json(WorkoutResponse::from(workout)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/workouts/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Workout deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn delete_workout(
    State(state): State<AppState>,
    _user: AuthedUser,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    services::delete_workout(state.db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
