//! Employees repository for database operations

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee, EmployeeDetails, UpdateEmployee},
};

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: Pool<Postgres>,
}

impl EmployeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List employees with resolved account, department and role names
    pub async fn list(&self) -> AppResult<Vec<EmployeeDetails>> {
        let rows = sqlx::query_as::<_, EmployeeDetails>(
            r#"
            SELECT e.id, e.account_id, a.username, e.department_id,
                   d.name AS department, r.name AS role,
                   e.date_of_birth, e.gender
            FROM employees e
            LEFT JOIN accounts a ON a.id = e.account_id
            JOIN departments d ON d.id = e.department_id
            LEFT JOIN roles r ON r.id = e.role_id
            ORDER BY a.username NULLS LAST, e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get employee by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee with id {} not found", id)))
    }

    /// Get the employee profile backed by an account, if any
    pub async fn get_by_account_id(&self, account_id: i32) -> AppResult<Option<Employee>> {
        let employee =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE account_id = $1")
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(employee)
    }

    /// Create an employee profile inside an onboarding transaction
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account_id: i32,
        data: &CreateEmployee,
    ) -> AppResult<Employee> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (account_id, department_id, role_id, date_of_birth, gender)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(data.department_id)
        .bind(data.role_id)
        .bind(data.date_of_birth)
        .bind(&data.gender)
        .fetch_one(&mut **tx)
        .await?;
        Ok(employee)
    }

    /// Update an employee profile
    pub async fn update(&self, id: i32, data: &UpdateEmployee) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET department_id = COALESCE($1, department_id),
                role_id = COALESCE($2, role_id),
                date_of_birth = COALESCE($3, date_of_birth),
                gender = COALESCE($4, gender)
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(data.department_id)
        .bind(data.role_id)
        .bind(data.date_of_birth)
        .bind(&data.gender)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee with id {} not found", id)))
    }

    /// Detach an employee profile from its identity during offboarding.
    /// The profile and its closed assignment history stay queryable.
    pub async fn detach_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: i32,
    ) -> AppResult<()> {
        sqlx::query("UPDATE employees SET account_id = NULL WHERE id = $1")
            .bind(employee_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
