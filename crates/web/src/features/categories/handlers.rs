use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::category::{CategoryResponse, CreateCategoryRequest};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::WebResult;
use crate::middleware::auth::AuthedUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List all categories successfully", body = Vec<CategoryResponse>)
    ),
    tag = "catalog"
)]
pub async fn list_categories(State(state): State<AppState>) -> WebResult<Response> {
    let categories = services::list_categories(state.db.pool()).await?;

    let response: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "catalog"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    let category = services::get_category(state.db.pool(), id).await?;

    Ok(Json(CategoryResponse::from(category)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Category created (or already present)", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    tag = "catalog"
)]
pub async fn create_category(
    State(state): State<AppState>,
    _user: AuthedUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> WebResult<Response> {
    payload.validate()?;

    let category = services::create_category(state.db.pool(), &payload.name).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by exercises")
    ),
    tag = "catalog"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    _user: AuthedUser,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    services::delete_category(state.db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
