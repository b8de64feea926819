//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assignments, auth, computers, departments, employees, health, repairs};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Assetdesk API",
        version = "1.0.0",
        description = "IT Asset Tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Assetdesk Maintainers")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Departments & roles
        departments::list_departments,
        departments::get_department,
        departments::create_department,
        departments::update_department,
        departments::delete_department,
        departments::list_roles,
        departments::create_role,
        departments::delete_role,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Computers
        computers::list_computers,
        computers::get_computer,
        computers::create_computer,
        computers::update_computer,
        computers::delete_computer,
        computers::get_computer_info,
        computers::upsert_computer_info,
        computers::my_computer,
        // Assignments
        assignments::create_assignment,
        assignments::close_assignment,
        assignments::bulk_close_assignments,
        assignments::employee_assignments,
        assignments::computer_assignments,
        // Repairs
        repairs::list_repairs,
        repairs::create_repair,
    ),
    components(
        schemas(
            // Auth
            crate::models::account::LoginRequest,
            crate::models::account::LoginResponse,
            auth::MeResponse,
            // Departments & roles
            crate::models::department::Department,
            crate::models::department::Role,
            crate::models::department::CreateDepartment,
            crate::models::department::UpdateDepartment,
            crate::models::department::CreateRole,
            // Employees
            crate::models::employee::Employee,
            crate::models::employee::EmployeeDetails,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            // Computers
            crate::models::computer::Computer,
            crate::models::computer::ComputerInfo,
            crate::models::computer::ComputerStatus,
            crate::models::computer::CreateComputer,
            crate::models::computer::UpdateComputer,
            crate::models::computer::UpsertComputerInfo,
            crate::models::computer::MyComputer,
            crate::models::computer::CurrentAssignment,
            // Assignments
            crate::models::assignment::Assignment,
            crate::models::assignment::CreateAssignment,
            crate::models::assignment::CloseAssignment,
            crate::models::assignment::BulkCloseAssignments,
            crate::models::assignment::BulkCloseResult,
            // Repairs
            crate::models::repair::RepairRecord,
            crate::models::repair::CreateRepair,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "departments", description = "Department and role reference data"),
        (name = "employees", description = "Employee onboarding and profiles"),
        (name = "computers", description = "Computer inventory"),
        (name = "assignments", description = "Custody assignment ledger"),
        (name = "repairs", description = "Repair history ledger")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
