//! Assignment ledger endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::assignment::{
        Assignment, BulkCloseAssignments, BulkCloseResult, CloseAssignment, CreateAssignment,
    },
};

use super::AuthenticatedUser;

/// Open a custody assignment
#[utoipa::path(
    post,
    path = "/assignments",
    tag = "assignments",
    security(("bearer_auth" = [])),
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Assignment opened", body = Assignment),
        (status = 400, description = "Computer is faulty"),
        (status = 404, description = "Computer or employee not found"),
        (status = 409, description = "Computer or employee already has an open assignment")
    )
)]
pub async fn create_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAssignment>,
) -> AppResult<(StatusCode, Json<Assignment>)> {
    claims.require_admin()?;

    let assignment = state.services.assignments.open(request).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Close an open assignment
#[utoipa::path(
    post,
    path = "/assignments/{id}/close",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = CloseAssignment,
    responses(
        (status = 200, description = "Assignment closed", body = Assignment),
        (status = 404, description = "Assignment not found"),
        (status = 409, description = "Assignment is already closed")
    )
)]
pub async fn close_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CloseAssignment>,
) -> AppResult<Json<Assignment>> {
    claims.require_admin()?;

    let assignment = state.services.assignments.close(id, request.end_date).await?;
    Ok(Json(assignment))
}

/// Bulk-close open assignments. Open rows among the IDs are closed, not
/// deleted; the response reports how many were closed.
#[utoipa::path(
    post,
    path = "/assignments/close",
    tag = "assignments",
    security(("bearer_auth" = [])),
    request_body = BulkCloseAssignments,
    responses(
        (status = 200, description = "Open rows closed", body = BulkCloseResult)
    )
)]
pub async fn bulk_close_assignments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BulkCloseAssignments>,
) -> AppResult<Json<BulkCloseResult>> {
    claims.require_admin()?;

    let result = state.services.assignments.bulk_close(&request.ids).await?;
    Ok(Json(result))
}

/// Custody history for an employee, newest start first
#[utoipa::path(
    get,
    path = "/employees/{id}/assignments",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Assignment history", body = Vec<Assignment>),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn employee_assignments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Assignment>>> {
    claims.require_admin()?;

    let assignments = state.services.assignments.list_for_employee(id).await?;
    Ok(Json(assignments))
}

/// Custody history for a computer, newest start first
#[utoipa::path(
    get,
    path = "/computers/{id}/assignments",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Computer ID")),
    responses(
        (status = 200, description = "Assignment history", body = Vec<Assignment>),
        (status = 404, description = "Computer not found")
    )
)]
pub async fn computer_assignments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Assignment>>> {
    claims.require_admin()?;

    let assignments = state.services.assignments.list_for_computer(id).await?;
    Ok(Json(assignments))
}
