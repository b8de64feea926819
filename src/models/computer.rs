//! Computer model, lifecycle status and descriptive hardware info

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use super::repair::RepairRecord;

/// Computer lifecycle status.
///
/// `Issued` and `Inventory` are derived from assignment state; `InRepair`
/// and `Faulty` are administrator-set and never overwritten by derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComputerStatus {
    Issued,
    InRepair,
    Inventory,
    Faulty,
}

impl ComputerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputerStatus::Issued => "issued",
            ComputerStatus::InRepair => "in_repair",
            ComputerStatus::Inventory => "inventory",
            ComputerStatus::Faulty => "faulty",
        }
    }
}

impl std::fmt::Display for ComputerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ComputerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "issued" => Ok(ComputerStatus::Issued),
            "in_repair" => Ok(ComputerStatus::InRepair),
            "inventory" => Ok(ComputerStatus::Inventory),
            "faulty" => Ok(ComputerStatus::Faulty),
            _ => Err(format!("Invalid computer status: {}", s)),
        }
    }
}

// SQLx conversion for ComputerStatus (stored as text)
impl sqlx::Type<Postgres> for ComputerStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for ComputerStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for ComputerStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Computer record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Computer {
    pub id: i32,
    pub name: String,
    /// Company-wide unique device tag; generated once at creation and
    /// immutable afterwards. NULL only when inputs were missing at creation.
    pub asset_tag: Option<String>,
    pub department_id: i32,
    pub status: ComputerStatus,
    /// Fast-lookup back-reference; the assignment ledger is the source of
    /// truth for custody
    pub current_user_id: Option<i32>,
}

/// Descriptive hardware attributes, one-to-one with a computer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ComputerInfo {
    pub computer_id: i32,
    pub brand: Option<String>,
    pub model_name: Option<String>,
    pub display_type: Option<String>,
    pub aspect_ratio: Option<String>,
    /// RAM in GB
    pub memory_size_gb: Option<i32>,
    pub storage_type: Option<String>,
    /// Storage in GB
    pub storage_size_gb: Option<i32>,
}

/// Create computer request. Status is not accepted here: a fresh computer
/// always derives to `inventory` and moves through updates and assignments
/// afterwards.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComputer {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub department_id: i32,
}

/// Update computer request; the asset tag is not updatable
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateComputer {
    pub name: Option<String>,
    pub department_id: Option<i32>,
    pub status: Option<ComputerStatus>,
    /// Set or clear the current-user back-reference. Absent = unchanged,
    /// explicit null = clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub current_user_id: Option<Option<i32>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Upsert request for descriptive hardware info
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertComputerInfo {
    pub brand: Option<String>,
    pub model_name: Option<String>,
    pub display_type: Option<String>,
    pub aspect_ratio: Option<String>,
    pub memory_size_gb: Option<i32>,
    pub storage_type: Option<String>,
    pub storage_size_gb: Option<i32>,
}

/// Open assignment summary embedded in the "my computer" view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentAssignment {
    pub assignment_id: i32,
    pub start_date: DateTime<Utc>,
}

/// The employee-facing "my computer" view
#[derive(Debug, Serialize, ToSchema)]
pub struct MyComputer {
    pub name: String,
    pub asset_tag: Option<String>,
    pub status: ComputerStatus,
    pub department: String,
    pub current_assignment: CurrentAssignment,
    pub repair_history: Vec<RepairRecord>,
    pub total_repair_cost: Decimal,
}
