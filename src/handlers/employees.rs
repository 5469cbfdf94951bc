use actix_web::{
    HttpResponse,
    web::{self, Data},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    database::{
        models::{EmployeeInput, UpdateEmployeeInput},
        repositories::EmployeeRepository,
    },
    error::AppError,
    handlers::shared::ApiResponse,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

fn validate_employee_input(input: &EmployeeInput) -> Vec<String> {
    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if input.registration.trim().is_empty() {
        errors.push("Registration is required".to_string());
    }
    if input.salary < 0.0 {
        errors.push("Salary cannot be negative".to_string());
    }
    if input.dependents < 0 {
        errors.push("Dependents cannot be negative".to_string());
    }
    errors
}

pub async fn create_employee(
    repo: Data<EmployeeRepository>,
    input: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    let errors = validate_employee_input(&input);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if repo.find_by_registration(&input.registration).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Employee with registration {} already exists",
            input.registration
        )));
    }

    let employee = repo.create(input).await?;
    log::info!("Created employee {} ({})", employee.name, employee.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(employee)))
}

pub async fn get_employees(
    repo: Data<EmployeeRepository>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let employees = repo.find_all(query.include_inactive).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(employees)))
}

pub async fn get_employee(
    repo: Data<EmployeeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
}

pub async fn update_employee(
    repo: Data<EmployeeRepository>,
    path: web::Path<Uuid>,
    input: web::Json<UpdateEmployeeInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = input.into_inner();

    let mut errors = Vec::new();
    if let Some(salary) = input.salary {
        if salary < 0.0 {
            errors.push("Salary cannot be negative".to_string());
        }
    }
    if let Some(dependents) = input.dependents {
        if dependents < 0 {
            errors.push("Dependents cannot be negative".to_string());
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let employee = repo
        .update(id, input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
}

/// Soft delete: the employee is deactivated so historical payrolls stay
/// consistent.
pub async fn delete_employee(
    repo: Data<EmployeeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deactivated = repo.deactivate(id).await?;

    if !deactivated {
        return Err(AppError::NotFound(format!("Employee {} not found", id)));
    }

    log::info!("Deactivated employee {}", id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Employee deactivated",
    )))
}
