//! Custody assignment model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Custody interval linking a computer to an employee.
///
/// An open interval has `end_date = NULL`; at most one open interval exists
/// per computer and per employee at any time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: i32,
    pub computer_id: i32,
    pub employee_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Open assignment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssignment {
    pub computer_id: i32,
    pub employee_id: i32,
}

/// Close a single assignment; `end_date` defaults to now
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CloseAssignment {
    pub end_date: Option<DateTime<Utc>>,
}

/// Bulk-close request. Requested removals of open rows are reinterpreted as
/// closes; history rows are never deleted.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkCloseAssignments {
    pub ids: Vec<i32>,
}

/// Bulk-close outcome reported back to the caller
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkCloseResult {
    /// Number of rows that were open and are now closed
    pub closed: u64,
}
