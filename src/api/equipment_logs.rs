//! Equipment checkout log endpoints
//!
//! Checking equipment out is a POST; checking it back in is an update
//! that sets `checked_in_date`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::equipment_log::{CreateEquipmentLog, EquipmentLog, UpdateEquipmentLog},
};

use super::{AuthenticatedUser, JsonBody};

/// List checkout logs
#[utoipa::path(
    get,
    path = "/equipment-logs",
    tag = "equipment-logs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Checkout logs", body = Vec<EquipmentLog>)
    )
)]
pub async fn list_logs(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<EquipmentLog>>> {
    let logs = state.services.equipment_logs.list().await?;
    Ok(Json(logs))
}

/// Get checkout log by ID
#[utoipa::path(
    get,
    path = "/equipment-logs/{id}",
    tag = "equipment-logs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Log ID")),
    responses(
        (status = 200, description = "Checkout log", body = EquipmentLog),
        (status = 404, description = "Log not found")
    )
)]
pub async fn get_log(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentLog>> {
    let log = state.services.equipment_logs.get_by_id(id).await?;
    Ok(Json(log))
}

/// Check equipment out
#[utoipa::path(
    post,
    path = "/equipment-logs",
    tag = "equipment-logs",
    security(("bearer_auth" = [])),
    request_body = CreateEquipmentLog,
    responses(
        (status = 201, description = "Checkout opened", body = EquipmentLog),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_log(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    JsonBody(data): JsonBody<CreateEquipmentLog>,
) -> AppResult<(StatusCode, Json<EquipmentLog>)> {
    let log = state.services.equipment_logs.create(&data).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// Update a checkout log; set `checked_in_date` to check the equipment in
#[utoipa::path(
    patch,
    path = "/equipment-logs/{id}",
    tag = "equipment-logs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Log ID")),
    request_body = UpdateEquipmentLog,
    responses(
        (status = 200, description = "Log updated", body = EquipmentLog),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Log not found")
    )
)]
pub async fn update_log(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    JsonBody(data): JsonBody<UpdateEquipmentLog>,
) -> AppResult<Json<EquipmentLog>> {
    let log = state.services.equipment_logs.update(id, &data).await?;
    Ok(Json(log))
}

/// Delete a checkout log
#[utoipa::path(
    delete,
    path = "/equipment-logs/{id}",
    tag = "equipment-logs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Log ID")),
    responses(
        (status = 204, description = "Log deleted"),
        (status = 404, description = "Log not found")
    )
)]
pub async fn delete_log(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment_logs.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
