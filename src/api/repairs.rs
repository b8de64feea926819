//! Repair ledger endpoints. There is no update or delete: repair history
//! is append-only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::repair::{CreateRepair, RepairRecord},
};

use super::AuthenticatedUser;

/// Repair history for a computer, newest first
#[utoipa::path(
    get,
    path = "/computers/{id}/repairs",
    tag = "repairs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Computer ID")),
    responses(
        (status = 200, description = "Repair history", body = Vec<RepairRecord>),
        (status = 404, description = "Computer not found")
    )
)]
pub async fn list_repairs(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<RepairRecord>>> {
    claims.require_admin()?;

    let repairs = state.services.repairs.list_for_computer(id).await?;
    Ok(Json(repairs))
}

/// Record a repair event
#[utoipa::path(
    post,
    path = "/computers/{id}/repairs",
    tag = "repairs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Computer ID")),
    request_body = CreateRepair,
    responses(
        (status = 201, description = "Repair recorded", body = RepairRecord),
        (status = 400, description = "Negative cost or missing component"),
        (status = 404, description = "Computer not found")
    )
)]
pub async fn create_repair(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CreateRepair>,
) -> AppResult<(StatusCode, Json<RepairRecord>)> {
    claims.require_admin()?;

    let record = state.services.repairs.record(id, request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
