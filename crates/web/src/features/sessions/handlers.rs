use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::common::{PaginatedResponse, PaginationParams};
use storage::dto::session::{
    AddTrackedExerciseRequest, CreateSetRequest, SessionDetailResponse, SessionResponse,
    SetResponse, StartSessionRequest, TrackedExerciseResponse, UpdateSetRequest,
};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::{WebError, WebResult};
use crate::middleware::auth::AuthedUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = StartSessionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Session started", body = SessionResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Workout not found")
    ),
    tag = "sessions"
)]
pub async fn start_session(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Json(payload): Json<StartSessionRequest>,
) -> WebResult<Response> {
    let session = services::start_session(state.db.pool(), payload.workout_id, user_id).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/sessions",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's sessions, newest first", body = PaginatedResponse<SessionResponse>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "sessions"
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Query(pagination): Query<PaginationParams>,
) -> WebResult<Response> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (sessions, total) =
        services::list_sessions(state.db.pool(), user_id, &pagination).await?;

    let data: Vec<SessionResponse> = sessions.into_iter().map(SessionResponse::from).collect();

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
    path = "/api/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Tracked workout ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Session with nested exercises and ordered sets", body = SessionDetailResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    let detail = services::get_session(state.db.pool(), id, user_id)
        .await?
        .ok_or(WebError::NotFound)?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Tracked workout ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Session completed", body = SessionResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn complete_session(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    let session = services::complete_session(state.db.pool(), id, user_id).await?;

    Ok(Json(SessionResponse::from(session)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/exercises",
    params(
        ("id" = Uuid, Path, description = "Tracked workout ID")
    ),
    request_body = AddTrackedExerciseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Exercise added with its initial sets", body = TrackedExerciseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn add_tracked_exercise(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddTrackedExerciseRequest>,
) -> WebResult<Response> {
    payload.validate()?;

    let exercise =
        services::add_tracked_exercise(state.db.pool(), id, &payload, user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(TrackedExerciseResponse::from(exercise)),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/tracked-exercises/{id}/sets",
    params(
        ("id" = Uuid, Path, description = "Tracked exercise ID")
    ),
    request_body = CreateSetRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Set created", body = SetResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Tracked exercise not found"),
        (status = 409, description = "Set number already used")
    ),
    tag = "sessions"
)]
pub async fn create_set(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateSetRequest>,
) -> WebResult<Response> {
    payload.validate()?;

    let set = services::create_set(state.db.pool(), id, &payload, user_id).await?;

    Ok((StatusCode::CREATED, Json(SetResponse::from(set))).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/sets/{id}",
    params(
        ("id" = Uuid, Path, description = "Set ID")
    ),
    request_body = UpdateSetRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Set updated; unspecified fields unchanged", body = SetResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Set not found")
    ),
    tag = "sessions"
)]
pub async fn update_set(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSetRequest>,
) -> WebResult<Response> {
    payload.validate()?;

    let set = services::update_set(state.db.pool(), id, &payload, user_id).await?;

    Ok(Json(SetResponse::from(set)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/sets/{id}",
    params(
        ("id" = Uuid, Path, description = "Set ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Set deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Set not found")
    ),
    tag = "sessions"
)]
pub async fn remove_set(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    services::remove_set(state.db.pool(), id, user_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
