//! Department and role management service

use crate::{
    error::AppResult,
    models::department::{CreateDepartment, CreateRole, Department, Role, UpdateDepartment},
    repository::Repository,
};

#[derive(Clone)]
pub struct DepartmentsService {
    repository: Repository,
}

impl DepartmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Department>> {
        self.repository.departments.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Department> {
        self.repository.departments.get_by_id(id).await
    }

    pub async fn create(&self, request: CreateDepartment) -> AppResult<Department> {
        self.repository.departments.create(&request).await
    }

    pub async fn update(&self, id: i32, request: UpdateDepartment) -> AppResult<Department> {
        self.repository.departments.update(id, &request).await
    }

    /// Delete a department. The RESTRICT foreign keys surface as a conflict
    /// while employees, computers or roles still reference it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.departments.delete(id).await
    }

    pub async fn list_roles(&self, department_id: i32) -> AppResult<Vec<Role>> {
        self.repository.departments.get_by_id(department_id).await?;
        self.repository.departments.list_roles(department_id).await
    }

    pub async fn create_role(&self, department_id: i32, request: CreateRole) -> AppResult<Role> {
        self.repository.departments.get_by_id(department_id).await?;
        self.repository
            .departments
            .create_role(department_id, &request)
            .await
    }

    /// Delete a role; rejected while employees reference it
    pub async fn delete_role(&self, id: i32) -> AppResult<()> {
        self.repository.departments.delete_role(id).await
    }
}
