//! Assignment ledger service: custody opens, closes and bulk closes.
//!
//! Every mutation runs in a serializable transaction and reconciles the
//! affected computer's status before commit, so the ledger and the derived
//! status field can never be observed out of step.

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::{Assignment, BulkCloseResult, CreateAssignment},
        computer::ComputerStatus,
    },
    repository::Repository,
};

use super::status;

#[derive(Clone)]
pub struct AssignmentsService {
    repository: Repository,
}

impl AssignmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Open a custody interval for an employee on a computer.
    ///
    /// Rejected when the computer is faulty, and when either party already
    /// holds an open interval. Two concurrent opens for the same computer
    /// end with exactly one winner: the loser fails either here or on the
    /// partial unique index at commit.
    pub async fn open(&self, request: CreateAssignment) -> AppResult<Assignment> {
        // Plain existence check outside the transaction keeps 404s cheap
        self.repository
            .employees
            .get_by_id(request.employee_id)
            .await?;

        let mut tx = self.repository.begin_serializable().await?;

        let computer = self
            .repository
            .computers
            .get_for_update(&mut tx, request.computer_id)
            .await?;

        if computer.status == ComputerStatus::Faulty {
            return Err(AppError::Validation(format!(
                "Computer {} is faulty and cannot be assigned",
                computer
                    .asset_tag
                    .as_deref()
                    .unwrap_or(&computer.name)
            )));
        }

        if self
            .repository
            .assignments
            .open_exists_for_computer(&mut tx, request.computer_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Computer already has an open assignment".to_string(),
            ));
        }

        if self
            .repository
            .assignments
            .open_exists_for_employee(&mut tx, request.employee_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Employee already has an open assignment".to_string(),
            ));
        }

        let assignment = self
            .repository
            .assignments
            .create(&mut tx, request.computer_id, request.employee_id, Utc::now())
            .await?;

        status::reconcile_computer(&self.repository, &mut tx, request.computer_id).await?;

        tx.commit().await?;

        tracing::info!(
            assignment_id = assignment.id,
            computer_id = assignment.computer_id,
            employee_id = assignment.employee_id,
            "assignment opened"
        );

        Ok(assignment)
    }

    /// Close an open interval; `end_date` defaults to now
    pub async fn close(
        &self,
        id: i32,
        end_date: Option<DateTime<Utc>>,
    ) -> AppResult<Assignment> {
        // Surface a 404 before the conflict-on-closed check
        let assignment = self.repository.assignments.get_by_id(id).await?;

        if let Some(end) = end_date {
            if end < assignment.start_date {
                return Err(AppError::Validation(
                    "end_date must not be earlier than the assignment's start_date".to_string(),
                ));
            }
        }

        let mut tx = self.repository.begin_serializable().await?;

        let closed = self
            .repository
            .assignments
            .close(&mut tx, id, end_date.unwrap_or_else(Utc::now))
            .await?;

        status::reconcile_computer(&self.repository, &mut tx, closed.computer_id).await?;

        tx.commit().await?;
        Ok(closed)
    }

    /// Bulk-close open intervals. A requested "remove" of open rows is
    /// reinterpreted as a close: rows keep their history and only gain an
    /// end date. Reports how many rows were actually closed.
    pub async fn bulk_close(&self, ids: &[i32]) -> AppResult<BulkCloseResult> {
        if ids.is_empty() {
            return Ok(BulkCloseResult { closed: 0 });
        }

        let mut tx = self.repository.begin_serializable().await?;

        let mut computer_ids = self
            .repository
            .assignments
            .bulk_close(&mut tx, ids, Utc::now())
            .await?;
        let closed = computer_ids.len() as u64;

        computer_ids.sort_unstable();
        computer_ids.dedup();
        for computer_id in computer_ids {
            status::reconcile_computer(&self.repository, &mut tx, computer_id).await?;
        }

        tx.commit().await?;

        tracing::info!(closed, "bulk-closed assignments");
        Ok(BulkCloseResult { closed })
    }

    /// The employee's current assignment, if any
    pub async fn current_for_employee(&self, employee_id: i32) -> AppResult<Option<Assignment>> {
        self.repository
            .assignments
            .current_for_employee(employee_id)
            .await
    }

    /// Custody history for an employee
    pub async fn list_for_employee(&self, employee_id: i32) -> AppResult<Vec<Assignment>> {
        self.repository.employees.get_by_id(employee_id).await?;
        self.repository
            .assignments
            .list_for_employee(employee_id)
            .await
    }

    /// Custody history for a computer
    pub async fn list_for_computer(&self, computer_id: i32) -> AppResult<Vec<Assignment>> {
        self.repository.computers.get_by_id(computer_id).await?;
        self.repository
            .assignments
            .list_for_computer(computer_id)
            .await
    }
}
