//! Category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::category::{Category, CreateCategory, UpdateCategory},
};

use super::{AuthenticatedUser, JsonBody};

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category list", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    let category = state.services.categories.get_by_id(id).await?;
    Ok(Json(category))
}

/// Create category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    JsonBody(data): JsonBody<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = state.services.categories.create(&data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update category (PUT or PATCH)
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    JsonBody(data): JsonBody<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let category = state.services.categories.update(id, &data).await?;
    Ok(Json(category))
}

/// Delete category; equipment referencing it loses its category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
