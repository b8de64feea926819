//! Computer endpoints, including the employee-facing "my computer" view

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::computer::{
        Computer, ComputerInfo, CreateComputer, MyComputer, UpdateComputer, UpsertComputerInfo,
    },
};

use super::AuthenticatedUser;

/// List computers
#[utoipa::path(
    get,
    path = "/computers",
    tag = "computers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of computers", body = Vec<Computer>)
    )
)]
pub async fn list_computers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Computer>>> {
    claims.require_admin()?;

    let computers = state.services.computers.list().await?;
    Ok(Json(computers))
}

/// Get computer by ID
#[utoipa::path(
    get,
    path = "/computers/{id}",
    tag = "computers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Computer ID")),
    responses(
        (status = 200, description = "Computer details", body = Computer),
        (status = 404, description = "Computer not found")
    )
)]
pub async fn get_computer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Computer>> {
    claims.require_admin()?;

    let computer = state.services.computers.get(id).await?;
    Ok(Json(computer))
}

/// Create a computer. The asset tag is generated now, from the computer
/// and department names, and never changes afterwards.
#[utoipa::path(
    post,
    path = "/computers",
    tag = "computers",
    security(("bearer_auth" = [])),
    request_body = CreateComputer,
    responses(
        (status = 201, description = "Computer created", body = Computer),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn create_computer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateComputer>,
) -> AppResult<(StatusCode, Json<Computer>)> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let computer = state.services.computers.create(request).await?;
    Ok((StatusCode::CREATED, Json(computer)))
}

/// Update a computer (name, department, status, current-user
/// back-reference). The status is reconciled after the write.
#[utoipa::path(
    put,
    path = "/computers/{id}",
    tag = "computers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Computer ID")),
    request_body = UpdateComputer,
    responses(
        (status = 200, description = "Computer updated", body = Computer),
        (status = 404, description = "Computer not found")
    )
)]
pub async fn update_computer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateComputer>,
) -> AppResult<Json<Computer>> {
    claims.require_admin()?;

    let computer = state.services.computers.update(id, request).await?;
    Ok(Json(computer))
}

/// Delete a computer
#[utoipa::path(
    delete,
    path = "/computers/{id}",
    tag = "computers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Computer ID")),
    responses(
        (status = 204, description = "Computer deleted"),
        (status = 404, description = "Computer not found")
    )
)]
pub async fn delete_computer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.computers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get descriptive hardware info
#[utoipa::path(
    get,
    path = "/computers/{id}/info",
    tag = "computers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Computer ID")),
    responses(
        (status = 200, description = "Hardware info", body = ComputerInfo),
        (status = 404, description = "Computer or info not found")
    )
)]
pub async fn get_computer_info(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ComputerInfo>> {
    claims.require_admin()?;

    let info = state.services.computers.get_info(id).await?;
    Ok(Json(info))
}

/// Create or replace descriptive hardware info
#[utoipa::path(
    put,
    path = "/computers/{id}/info",
    tag = "computers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Computer ID")),
    request_body = UpsertComputerInfo,
    responses(
        (status = 200, description = "Hardware info saved", body = ComputerInfo),
        (status = 404, description = "Computer not found")
    )
)]
pub async fn upsert_computer_info(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpsertComputerInfo>,
) -> AppResult<Json<ComputerInfo>> {
    claims.require_admin()?;

    let info = state.services.computers.upsert_info(id, request).await?;
    Ok(Json(info))
}

/// The caller's currently assigned computer, resolved from the ledger
#[utoipa::path(
    get,
    path = "/my-computer",
    tag = "computers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Currently assigned computer", body = MyComputer),
        (status = 404, description = "No computer assigned")
    )
)]
pub async fn my_computer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<MyComputer>> {
    let employee_id = claims.require_employee()?;

    let view = state.services.computers.my_computer(employee_id).await?;
    Ok(Json(view))
}
