//! Assignment ledger repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::assignment::Assignment,
};

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Postgres>,
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get assignment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM computer_assignments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", id)))
    }

    /// The employee's open assignment, most recently started, if any
    pub async fn current_for_employee(&self, employee_id: i32) -> AppResult<Option<Assignment>> {
        let row = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT * FROM computer_assignments
            WHERE employee_id = $1 AND end_date IS NULL
            ORDER BY start_date DESC
            LIMIT 1
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// The computer's open assignment, most recently started, if any
    pub async fn current_for_computer(&self, computer_id: i32) -> AppResult<Option<Assignment>> {
        let row = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT * FROM computer_assignments
            WHERE computer_id = $1 AND end_date IS NULL
            ORDER BY start_date DESC
            LIMIT 1
            "#,
        )
        .bind(computer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Full custody history for an employee, newest start first
    pub async fn list_for_employee(&self, employee_id: i32) -> AppResult<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM computer_assignments WHERE employee_id = $1 ORDER BY start_date DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Full custody history for a computer, newest start first
    pub async fn list_for_computer(&self, computer_id: i32) -> AppResult<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM computer_assignments WHERE computer_id = $1 ORDER BY start_date DESC",
        )
        .bind(computer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Check for an open interval on a computer, inside a transaction
    pub async fn open_exists_for_computer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        computer_id: i32,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM computer_assignments WHERE computer_id = $1 AND end_date IS NULL)",
        )
        .bind(computer_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(exists)
    }

    /// Check for an open interval held by an employee, inside a transaction
    pub async fn open_exists_for_employee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: i32,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM computer_assignments WHERE employee_id = $1 AND end_date IS NULL)",
        )
        .bind(employee_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(exists)
    }

    /// Open a custody interval. The partial unique indexes on open rows make
    /// the losing side of a concurrent open fail with a unique violation.
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        computer_id: i32,
        employee_id: i32,
        start_date: DateTime<Utc>,
    ) -> AppResult<Assignment> {
        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO computer_assignments (computer_id, employee_id, start_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(computer_id)
        .bind(employee_id)
        .bind(start_date)
        .fetch_one(&mut **tx)
        .await?;
        Ok(assignment)
    }

    /// Close an open interval. Closing is an update, never a delete.
    pub async fn close(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        end_date: DateTime<Utc>,
    ) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE computer_assignments SET end_date = $1
            WHERE id = $2 AND end_date IS NULL
            RETURNING *
            "#,
        )
        .bind(end_date)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!("Assignment {} is not open", id))
        })
    }

    /// Close every open row among the given IDs; already-closed rows are
    /// left untouched. Returns the closed rows' computer IDs.
    pub async fn bulk_close(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ids: &[i32],
        end_date: DateTime<Utc>,
    ) -> AppResult<Vec<i32>> {
        let computer_ids: Vec<i32> = sqlx::query_scalar(
            r#"
            UPDATE computer_assignments SET end_date = $1
            WHERE id = ANY($2) AND end_date IS NULL
            RETURNING computer_id
            "#,
        )
        .bind(end_date)
        .bind(ids)
        .fetch_all(&mut **tx)
        .await?;
        Ok(computer_ids)
    }

    /// Force-close all open intervals held by an employee (offboarding).
    /// Returns the affected computer IDs.
    pub async fn close_open_for_employee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: i32,
        end_date: DateTime<Utc>,
    ) -> AppResult<Vec<i32>> {
        let computer_ids: Vec<i32> = sqlx::query_scalar(
            r#"
            UPDATE computer_assignments SET end_date = $1
            WHERE employee_id = $2 AND end_date IS NULL
            RETURNING computer_id
            "#,
        )
        .bind(end_date)
        .bind(employee_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(computer_ids)
    }
}
