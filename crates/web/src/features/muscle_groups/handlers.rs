use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::muscle_group::{CreateMuscleGroupRequest, MuscleGroupResponse};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::WebResult;
use crate::middleware::auth::AuthedUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/muscle-groups",
    responses(
        (status = 200, description = "List all muscle groups successfully", body = Vec<MuscleGroupResponse>)
    ),
    tag = "catalog"
)]
pub async fn list_muscle_groups(State(state): State<AppState>) -> WebResult<Response> {
    let groups = services::list_muscle_groups(state.db.pool()).await?;

    let response: Vec<MuscleGroupResponse> =
        groups.into_iter().map(MuscleGroupResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/muscle-groups/{id}",
    params(
        ("id" = Uuid, Path, description = "Muscle group ID")
    ),
    responses(
        (status = 200, description = "Muscle group found", body = MuscleGroupResponse),
        (status = 404, description = "Muscle group not found")
    ),
    tag = "catalog"
)]
pub async fn get_muscle_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    let group = services::get_muscle_group(state.db.pool(), id).await?;

    Ok(Json(MuscleGroupResponse::from(group)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/muscle-groups",
    request_body = CreateMuscleGroupRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Muscle group created (or already present)", body = MuscleGroupResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    tag = "catalog"
)]
pub async fn create_muscle_group(
    State(state): State<AppState>,
    _user: AuthedUser,
    Json(payload): Json<CreateMuscleGroupRequest>,
) -> WebResult<Response> {
    payload.validate()?;

    let group = services::create_muscle_group(state.db.pool(), &payload.name).await?;

    Ok((StatusCode::CREATED, Json(MuscleGroupResponse::from(group))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/muscle-groups/{id}",
    params(
        ("id" = Uuid, Path, description = "Muscle group ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Muscle group deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Muscle group not found"),
        (status = 409, description = "Muscle group still referenced by exercises")
    ),
    tag = "catalog"
)]
pub async fn delete_muscle_group(
    State(state): State<AppState>,
    _user: AuthedUser,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    services::delete_muscle_group(state.db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
