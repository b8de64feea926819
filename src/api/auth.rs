//! Authentication endpoints

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::account::{LoginRequest, LoginResponse},
};

use super::AuthenticatedUser;

/// Current session info
#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub username: String,
    pub account_id: i32,
    pub employee_id: Option<i32>,
    pub is_admin: bool,
}

/// Resolve the client origin for throttling: first X-Forwarded-For hop if
/// present, else the peer address.
fn client_origin(headers: &HeaderMap, addr: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| addr.ip().to_string())
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Another login attempt from this origin is in progress")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let origin = client_origin(&headers, &addr);
    let response = state
        .services
        .auth
        .login(&request.username, &request.password, &origin)
        .await?;

    Ok(Json(response))
}

/// Current session claims
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session", body = MeResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(claims): AuthenticatedUser) -> Json<MeResponse> {
    Json(MeResponse {
        username: claims.sub,
        account_id: claims.account_id,
        employee_id: claims.employee_id,
        is_admin: claims.is_admin,
    })
}
