//! Repository layer for database operations

pub mod accounts;
pub mod assignments;
pub mod computers;
pub mod departments;
pub mod employees;
pub mod repairs;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub accounts: accounts::AccountsRepository,
    pub departments: departments::DepartmentsRepository,
    pub employees: employees::EmployeesRepository,
    pub computers: computers::ComputersRepository,
    pub assignments: assignments::AssignmentsRepository,
    pub repairs: repairs::RepairsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            accounts: accounts::AccountsRepository::new(pool.clone()),
            departments: departments::DepartmentsRepository::new(pool.clone()),
            employees: employees::EmployeesRepository::new(pool.clone()),
            computers: computers::ComputersRepository::new(pool.clone()),
            assignments: assignments::AssignmentsRepository::new(pool.clone()),
            repairs: repairs::RepairsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a transaction promoted to SERIALIZABLE isolation.
    ///
    /// Every mutation touching the assignment ledger, the repair ledger or a
    /// computer's status runs inside one of these so the one-open-row and
    /// asset-tag invariants hold under concurrent requests.
    pub async fn begin_serializable(&self) -> AppResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}
