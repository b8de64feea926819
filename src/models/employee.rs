//! Employee profile model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Employee profile, one-to-one with an identity account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    /// Backing identity account; NULL once the identity has been offboarded
    pub account_id: Option<i32>,
    pub department_id: i32,
    pub role_id: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
}

/// Employee with resolved names for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EmployeeDetails {
    pub id: i32,
    pub account_id: Option<i32>,
    pub username: Option<String>,
    pub department_id: i32,
    pub department: String,
    pub role: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
}

/// Onboarding request: creates the identity account and its employee
/// profile in a single step
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub department_id: i32,
    pub role_id: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Update employee request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub department_id: Option<i32>,
    pub role_id: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
}
