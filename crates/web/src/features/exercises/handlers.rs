use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::common::{PaginatedResponse, PaginationParams};
use storage::dto::exercise::{CreateExerciseRequest, ExerciseResponse, UpdateExerciseRequest};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::{WebError, WebResult};
use crate::middleware::auth::AuthedUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/exercises",
    params(PaginationParams),
    responses(
        (status = 200, description = "List exercises with pagination metadata", body = PaginatedResponse<ExerciseResponse>)
    ),
    tag = "catalog"
)]
pub async fn list_exercises(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> WebResult<Response> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (exercises, total) = services::list_exercises(state.db.pool(), &pagination).await?;

    let data: Vec<ExerciseResponse> = exercises.into_iter().map(ExerciseResponse::from).collect();

    Ok(Json(PaginatedResponse::new(
        data,
        pagination.page,
        pagination.page_size,
        total,
    ))
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/exercises/{id}",
    params(
        ("id" = Uuid, Path, description = "Exercise ID")
    ),
    responses(
        (status = 200, description = "Exercise found", body = ExerciseResponse),
        (status = 404, description = "Exercise not found")
    ),
    tag = "catalog"
)]
pub async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    let exercise = services::get_exercise(state.db.pool(), id).await?;

    Ok(Json(ExerciseResponse::from(exercise)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/exercises",
    request_body = CreateExerciseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Exercise created (or already present)", body = ExerciseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Referenced category or muscle group not found")
    ),
    tag = "catalog"
)]
pub async fn create_exercise(
    State(state): State<AppState>,
    _user: AuthedUser,
    Json(payload): Json<CreateExerciseRequest>,
) -> WebResult<Response> {
    payload.validate()?;

    let exercise = services::create_exercise(state.db.pool(), &payload).await?;

    Ok((StatusCode::CREATED, Json(ExerciseResponse::from(exercise))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/exercises/{id}",
    params(
        ("id" = Uuid, Path, description = "Exercise ID")
    ),
    request_body = UpdateExerciseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Exercise updated", body = ExerciseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Exercise not found")
    ),
    tag = "catalog"
)]
pub async fn update_exercise(
    State(state): State<AppState>,
    _user: AuthedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExerciseRequest>,
) -> WebResult<Response> {
    payload.validate()?;

    let exercise = services::update_exercise(state.db.pool(), id, &payload).await?;

    Ok(Json(ExerciseResponse::from(exercise)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/exercises/{id}",
    params(
        ("id" = Uuid, Path, description = "Exercise ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Exercise deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Exercise not found"),
        (status = 409, description = "Exercise still referenced by workouts or history")
    ),
    tag = "catalog"
)]
pub async fn delete_exercise(
    State(state): State<AppState>,
    _user: AuthedUser,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    services::delete_exercise(state.db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
