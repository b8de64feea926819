//! Employee provisioning and offboarding service.
//!
//! Onboarding creates the identity account and its employee profile in one
//! transaction; offboarding force-closes the employee's open assignments,
//! clears current-user back-references, reconciles the affected computers
//! and removes the identity, all before commit. Both flows are explicit
//! calls rather than listeners so causality stays visible.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee, EmployeeDetails, UpdateEmployee},
    repository::Repository,
};

use super::{auth, status};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List employees with resolved names
    pub async fn list(&self) -> AppResult<Vec<EmployeeDetails>> {
        self.repository.employees.list().await
    }

    /// Get employee by ID
    pub async fn get(&self, id: i32) -> AppResult<Employee> {
        self.repository.employees.get_by_id(id).await
    }

    /// Onboard: create the identity account and the employee profile backed
    /// by it, atomically
    pub async fn onboard(&self, request: CreateEmployee) -> AppResult<Employee> {
        if self
            .repository
            .accounts
            .username_exists(&request.username)
            .await?
        {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let department = self
            .repository
            .departments
            .get_by_id(request.department_id)
            .await?;

        if let Some(role_id) = request.role_id {
            let role = self.repository.departments.get_role(role_id).await?;
            if role.department_id != department.id {
                return Err(AppError::Validation(format!(
                    "Role {} does not belong to department {}",
                    role.name, department.name
                )));
            }
        }

        let password_hash = auth::hash_password(&request.password)?;

        let mut tx = self.repository.begin_serializable().await?;

        let account = self
            .repository
            .accounts
            .create(&mut tx, &request.username, &password_hash, request.is_admin)
            .await?;
        let employee = self
            .repository
            .employees
            .create(&mut tx, account.id, &request)
            .await?;

        tx.commit().await?;

        tracing::info!(
            employee_id = employee.id,
            account_id = account.id,
            username = %request.username,
            "employee onboarded"
        );

        Ok(employee)
    }

    /// Update an employee profile. The effective role must belong to the
    /// effective department, including a retained role after a department
    /// move.
    pub async fn update(&self, id: i32, request: UpdateEmployee) -> AppResult<Employee> {
        let employee = self.repository.employees.get_by_id(id).await?;

        let department_id = request.department_id.unwrap_or(employee.department_id);
        if let Some(role_id) = request.role_id.or(employee.role_id) {
            let role = self.repository.departments.get_role(role_id).await?;
            if role.department_id != department_id {
                return Err(AppError::Validation(
                    "Role does not belong to the employee's department".to_string(),
                ));
            }
        }

        self.repository.employees.update(id, &request).await
    }

    /// Offboard: force-close open assignments at the deletion time, clear
    /// back-references, reconcile the affected computers and delete the
    /// identity. The profile and its closed custody history stay queryable.
    pub async fn offboard(&self, employee_id: i32) -> AppResult<()> {
        let employee = self.repository.employees.get_by_id(employee_id).await?;
        let now = Utc::now();

        let mut tx = self.repository.begin_serializable().await?;

        let mut computer_ids = self
            .repository
            .assignments
            .close_open_for_employee(&mut tx, employee_id, now)
            .await?;
        let closed = computer_ids.len();

        computer_ids.extend(
            self.repository
                .computers
                .clear_current_user(&mut tx, employee_id)
                .await?,
        );

        computer_ids.sort_unstable();
        computer_ids.dedup();
        for computer_id in computer_ids {
            status::reconcile_computer(&self.repository, &mut tx, computer_id).await?;
        }

        self.repository
            .employees
            .detach_account(&mut tx, employee_id)
            .await?;
        if let Some(account_id) = employee.account_id {
            self.repository.accounts.delete(&mut tx, account_id).await?;
        }

        tx.commit().await?;

        tracing::info!(employee_id, closed_assignments = closed, "employee offboarded");
        Ok(())
    }
}
