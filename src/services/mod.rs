//! Business logic services

pub mod asset_tags;
pub mod assignments;
pub mod auth;
pub mod computers;
pub mod departments;
pub mod employees;
pub mod redis;
pub mod repairs;
pub mod status;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub departments: departments::DepartmentsService,
    pub employees: employees::EmployeesService,
    pub computers: computers::ComputersService,
    pub assignments: assignments::AssignmentsService,
    pub repairs: repairs::RepairsService,
    pub redis: redis::RedisService,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(
        repository: Repository,
        auth_config: AuthConfig,
        redis_service: redis::RedisService,
    ) -> AppResult<Self> {
        Ok(Self {
            auth: auth::AuthService::new(repository.clone(), auth_config, redis_service.clone()),
            departments: departments::DepartmentsService::new(repository.clone()),
            employees: employees::EmployeesService::new(repository.clone()),
            computers: computers::ComputersService::new(repository.clone()),
            assignments: assignments::AssignmentsService::new(repository.clone()),
            repairs: repairs::RepairsService::new(repository),
            redis: redis_service,
        })
    }
}
