//! Repair ledger repository for database operations.
//!
//! The repair history is append-only: no update or delete statement for
//! `computer_repair_history` exists anywhere in the crate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::AppResult,
    models::repair::RepairRecord,
};

#[derive(Clone)]
pub struct RepairsRepository {
    pool: Pool<Postgres>,
}

impl RepairsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Repair history for a computer, newest repair first
    pub async fn list_for_computer(&self, computer_id: i32) -> AppResult<Vec<RepairRecord>> {
        let rows = sqlx::query_as::<_, RepairRecord>(
            r#"
            SELECT * FROM computer_repair_history
            WHERE computer_id = $1
            ORDER BY date_of_repair DESC, id DESC
            "#,
        )
        .bind(computer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Sum of all repair costs for a computer
    pub async fn total_cost_for_computer(&self, computer_id: i32) -> AppResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(repair_cost), 0) FROM computer_repair_history WHERE computer_id = $1",
        )
        .bind(computer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    /// Append a repair event inside a transaction
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        computer_id: i32,
        repaired_component: &str,
        repair_cost: Decimal,
        date_of_repair: NaiveDate,
        comments: Option<&str>,
    ) -> AppResult<RepairRecord> {
        let record = sqlx::query_as::<_, RepairRecord>(
            r#"
            INSERT INTO computer_repair_history
                (computer_id, repaired_component, repair_cost, date_of_repair, comments)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(computer_id)
        .bind(repaired_component)
        .bind(repair_cost)
        .bind(date_of_repair)
        .bind(comments)
        .fetch_one(&mut **tx)
        .await?;
        Ok(record)
    }
}
