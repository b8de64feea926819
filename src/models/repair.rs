//! Repair history model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A single repair event. Rows are read-only once created and are never
/// deleted; the history is an append-only ledger.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RepairRecord {
    pub id: i32,
    pub computer_id: i32,
    pub repaired_component: String,
    #[schema(value_type = f64)]
    pub repair_cost: Decimal,
    pub date_of_repair: NaiveDate,
    pub comments: Option<String>,
}

/// Record repair request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRepair {
    pub repaired_component: String,
    #[schema(value_type = f64)]
    pub repair_cost: Decimal,
    pub date_of_repair: Option<NaiveDate>,
    pub comments: Option<String>,
}
