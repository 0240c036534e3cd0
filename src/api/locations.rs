//! Location endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::location::{CreateLocation, Location, UpdateLocation},
};

use super::{AuthenticatedUser, JsonBody};

/// List all locations
#[utoipa::path(
    get,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Location list", body = Vec<Location>)
    )
)]
pub async fn list_locations(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Location>>> {
    let locations = state.services.locations.list().await?;
    Ok(Json(locations))
}

/// Get location by ID
#[utoipa::path(
    get,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location details", body = Location),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Location>> {
    let location = state.services.locations.get_by_id(id).await?;
    Ok(Json(location))
}

/// Create location
#[utoipa::path(
    post,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    request_body = CreateLocation,
    responses(
        (status = 201, description = "Location created", body = Location),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    JsonBody(data): JsonBody<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    let location = state.services.locations.create(&data).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// Update location (PUT or PATCH)
#[utoipa::path(
    put,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Location ID")),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location updated", body = Location),
        (status = 404, description = "Location not found")
    )
)]
pub async fn update_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    JsonBody(data): JsonBody<UpdateLocation>,
) -> AppResult<Json<Location>> {
    let location = state.services.locations.update(id, &data).await?;
    Ok(Json(location))
}

/// Delete location; equipment stored there loses its location
#[utoipa::path(
    delete,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 404, description = "Location not found")
    )
)]
pub async fn delete_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.locations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
