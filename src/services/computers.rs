//! Computer management service

use crate::{
    error::{AppError, AppResult},
    models::computer::{
        Computer, ComputerInfo, CreateComputer, CurrentAssignment, MyComputer, UpdateComputer,
        UpsertComputerInfo,
    },
    repository::Repository,
};

use super::{asset_tags, status};

#[derive(Clone)]
pub struct ComputersService {
    repository: Repository,
}

impl ComputersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all computers
    pub async fn list(&self) -> AppResult<Vec<Computer>> {
        self.repository.computers.list().await
    }

    /// Get computer by ID
    pub async fn get(&self, id: i32) -> AppResult<Computer> {
        self.repository.computers.get_by_id(id).await
    }

    /// Create a computer. The asset tag is generated here, exactly once:
    /// the counter scan and the insert share a serializable transaction so
    /// concurrent creates under the same prefix cannot collide.
    pub async fn create(&self, request: CreateComputer) -> AppResult<Computer> {
        let department = self
            .repository
            .departments
            .get_by_id(request.department_id)
            .await?;

        let mut tx = self.repository.begin_serializable().await?;

        let asset_tag = match asset_tags::base_tag(&request.name, &department.name) {
            Some(base) => {
                let existing = self.repository.computers.tags_with_prefix(&mut tx, &base).await?;
                let suffix = asset_tags::next_suffix(&base, &existing);
                Some(format!("{}-{:02}", base, suffix))
            }
            // Missing inputs: leave the tag unset, to be generated later
            None => None,
        };

        let computer = self
            .repository
            .computers
            .create(&mut tx, &request.name, asset_tag.as_deref(), request.department_id)
            .await?;

        status::reconcile_computer(&self.repository, &mut tx, computer.id).await?;
        let computer = self.repository.computers.get_for_update(&mut tx, computer.id).await?;

        tx.commit().await?;

        tracing::info!(
            computer_id = computer.id,
            asset_tag = computer.asset_tag.as_deref().unwrap_or("<unset>"),
            "computer created"
        );

        Ok(computer)
    }

    /// Update a computer and reconcile its status in the same transaction.
    /// The asset tag is never touched here.
    pub async fn update(&self, id: i32, request: UpdateComputer) -> AppResult<Computer> {
        if let Some(department_id) = request.department_id {
            self.repository.departments.get_by_id(department_id).await?;
        }
        if let Some(Some(employee_id)) = request.current_user_id {
            self.repository.employees.get_by_id(employee_id).await?;
        }

        let mut tx = self.repository.begin_serializable().await?;

        self.repository.computers.update(&mut tx, id, &request).await?;
        status::reconcile_computer(&self.repository, &mut tx, id).await?;
        let computer = self.repository.computers.get_for_update(&mut tx, id).await?;

        tx.commit().await?;
        Ok(computer)
    }

    /// Delete a computer; info, assignment and repair rows cascade
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.computers.delete(id).await
    }

    /// Descriptive hardware info for a computer
    pub async fn get_info(&self, computer_id: i32) -> AppResult<ComputerInfo> {
        self.repository.computers.get_by_id(computer_id).await?;
        self.repository
            .computers
            .get_info(computer_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No hardware info for computer {}", computer_id))
            })
    }

    /// Create or replace descriptive hardware info. Purely descriptive:
    /// no status reconciliation.
    pub async fn upsert_info(
        &self,
        computer_id: i32,
        request: UpsertComputerInfo,
    ) -> AppResult<ComputerInfo> {
        self.repository.computers.get_by_id(computer_id).await?;
        self.repository.computers.upsert_info(computer_id, &request).await
    }

    /// The employee-facing "my computer" view. Resolved from the assignment
    /// ledger, not the current-user back-reference.
    pub async fn my_computer(&self, employee_id: i32) -> AppResult<MyComputer> {
        let assignment = self
            .repository
            .assignments
            .current_for_employee(employee_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No computer assigned".to_string()))?;

        let computer = self
            .repository
            .computers
            .get_by_id(assignment.computer_id)
            .await?;
        let department = self
            .repository
            .departments
            .get_by_id(computer.department_id)
            .await?;
        let repair_history = self
            .repository
            .repairs
            .list_for_computer(computer.id)
            .await?;
        let total_repair_cost = self
            .repository
            .repairs
            .total_cost_for_computer(computer.id)
            .await?;

        Ok(MyComputer {
            name: computer.name,
            asset_tag: computer.asset_tag,
            status: computer.status,
            department: department.name,
            current_assignment: CurrentAssignment {
                assignment_id: assignment.id,
                start_date: assignment.start_date,
            },
            repair_history,
            total_repair_cost,
        })
    }
}
