//! Repair ledger service.
//!
//! Repairs may be recorded at any time; rows are read-only after creation
//! and are never deleted. Recording a repair reconciles the computer so an
//! administrator can pair it with a manual status change to in_repair or
//! faulty in the same breath.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::repair::{CreateRepair, RepairRecord},
    repository::Repository,
};

use super::status;

#[derive(Clone)]
pub struct RepairsService {
    repository: Repository,
}

impl RepairsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Append a repair event to a computer's history
    pub async fn record(&self, computer_id: i32, request: CreateRepair) -> AppResult<RepairRecord> {
        if request.repaired_component.trim().is_empty() {
            return Err(AppError::Validation(
                "repaired_component is required".to_string(),
            ));
        }
        if request.repair_cost < Decimal::ZERO {
            return Err(AppError::Validation(
                "repair_cost must not be negative".to_string(),
            ));
        }

        self.repository.computers.get_by_id(computer_id).await?;

        let date_of_repair = request
            .date_of_repair
            .unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.repository.begin_serializable().await?;

        let record = self
            .repository
            .repairs
            .create(
                &mut tx,
                computer_id,
                request.repaired_component.trim(),
                request.repair_cost,
                date_of_repair,
                request.comments.as_deref(),
            )
            .await?;

        status::reconcile_computer(&self.repository, &mut tx, computer_id).await?;

        tx.commit().await?;

        tracing::info!(
            repair_id = record.id,
            computer_id,
            cost = %record.repair_cost,
            "repair recorded"
        );

        Ok(record)
    }

    /// Repair history for a computer, newest first
    pub async fn list_for_computer(&self, computer_id: i32) -> AppResult<Vec<RepairRecord>> {
        self.repository.computers.get_by_id(computer_id).await?;
        self.repository.repairs.list_for_computer(computer_id).await
    }

    /// Total repair spend on a computer
    pub async fn total_cost(&self, computer_id: i32) -> AppResult<Decimal> {
        self.repository
            .repairs
            .total_cost_for_computer(computer_id)
            .await
    }
}
