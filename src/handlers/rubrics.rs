use actix_web::{
    HttpResponse,
    web::{self, Data},
};
use uuid::Uuid;

use crate::{
    database::{
        models::{EmployeeRubricInput, RubricInput, UpdateEmployeeRubricInput, UpdateRubricInput},
        repositories::{EmployeeRepository, EmployeeRubricRepository, RubricRepository},
    },
    error::AppError,
    handlers::{employees::ListQuery, shared::ApiResponse},
};

pub async fn create_rubric(
    repo: Data<RubricRepository>,
    input: web::Json<RubricInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    if input.name.trim().is_empty() {
        return Err(AppError::Validation(vec!["Name is required".to_string()]));
    }

    if repo.find_by_name(&input.name).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Rubric {:?} already exists",
            input.name
        )));
    }

    let rubric = repo.create(input).await?;
    log::info!("Created rubric {} ({})", rubric.name, rubric.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(rubric)))
}

pub async fn get_rubrics(
    repo: Data<RubricRepository>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let rubrics = repo.find_all(query.include_inactive).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rubrics)))
}

pub async fn get_rubric(
    repo: Data<RubricRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let rubric = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Rubric {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(rubric)))
}

pub async fn update_rubric(
    repo: Data<RubricRepository>,
    path: web::Path<Uuid>,
    input: web::Json<UpdateRubricInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let rubric = repo
        .update(id, input.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Rubric {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(rubric)))
}

/// Hard-deletes only when no assignment references the rubric; otherwise it
/// is deactivated to preserve the history of already-issued payrolls.
pub async fn delete_rubric(
    repo: Data<RubricRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    if repo.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Rubric {} not found", id)));
    }

    if repo.assignment_count(id).await? > 0 {
        repo.deactivate(id).await?;
        log::info!("Deactivated referenced rubric {}", id);
        return Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            None,
            "Rubric is referenced by assignments and was deactivated",
        )));
    }

    repo.delete(id).await?;
    log::info!("Deleted rubric {}", id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Rubric deleted",
    )))
}

fn validate_assignment_values(
    custom_value: Option<f64>,
    custom_percentage: Option<f64>,
) -> Vec<String> {
    let mut errors = Vec::new();
    match (custom_value, custom_percentage) {
        (None, None) => {
            errors.push("Either customValue or customPercentage must be set".to_string())
        }
        (Some(_), Some(_)) => {
            errors.push("customValue and customPercentage are mutually exclusive".to_string())
        }
        _ => {}
    }
    if let Some(value) = custom_value {
        if value < 0.0 {
            errors.push("customValue cannot be negative".to_string());
        }
    }
    if let Some(percentage) = custom_percentage {
        // Stored and consumed as a fraction: 0.08 means 8% of base salary.
        if percentage < 0.0 {
            errors.push("customPercentage cannot be negative".to_string());
        }
        if percentage > 1.0 {
            errors.push(
                "customPercentage must be a fraction between 0 and 1 (0.08 = 8%)".to_string(),
            );
        }
    }
    errors
}

pub async fn create_employee_rubric(
    assignment_repo: Data<EmployeeRubricRepository>,
    employee_repo: Data<EmployeeRepository>,
    rubric_repo: Data<RubricRepository>,
    path: web::Path<Uuid>,
    input: web::Json<EmployeeRubricInput>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    let input = input.into_inner();

    let errors = validate_assignment_values(input.custom_value, input.custom_percentage);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if employee_repo.find_by_id(employee_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Employee {} not found",
            employee_id
        )));
    }

    let rubric = rubric_repo
        .find_by_id(input.rubric_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Rubric {} not found", input.rubric_id)))?;

    if assignment_repo
        .find_active_assignment(employee_id, input.rubric_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Rubric {:?} is already assigned to this employee",
            rubric.name
        )));
    }

    let assignment = assignment_repo.create(employee_id, input).await?;
    log::info!(
        "Assigned rubric {} to employee {}",
        assignment.rubric_id,
        employee_id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(assignment)))
}

pub async fn get_employee_rubrics(
    assignment_repo: Data<EmployeeRubricRepository>,
    employee_repo: Data<EmployeeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();

    if employee_repo.find_by_id(employee_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Employee {} not found",
            employee_id
        )));
    }

    let assignments = assignment_repo.find_by_employee(employee_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(assignments)))
}

pub async fn update_employee_rubric(
    assignment_repo: Data<EmployeeRubricRepository>,
    path: web::Path<Uuid>,
    input: web::Json<UpdateEmployeeRubricInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = input.into_inner();

    if let (Some(_), Some(_)) = (input.custom_value, input.custom_percentage) {
        return Err(AppError::Validation(vec![
            "customValue and customPercentage are mutually exclusive".to_string(),
        ]));
    }
    if input.custom_value.is_some_and(|v| v < 0.0) {
        return Err(AppError::Validation(vec![
            "customValue cannot be negative".to_string(),
        ]));
    }
    if input.custom_percentage.is_some_and(|p| !(0.0..=1.0).contains(&p)) {
        return Err(AppError::Validation(vec![
            "customPercentage must be a fraction between 0 and 1 (0.08 = 8%)".to_string(),
        ]));
    }

    let assignment = assignment_repo
        .update(id, input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment)))
}

pub async fn delete_employee_rubric(
    assignment_repo: Data<EmployeeRubricRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deactivated = assignment_repo.deactivate(id).await?;

    if !deactivated {
        return Err(AppError::NotFound(format!("Assignment {} not found", id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Assignment deactivated",
    )))
}
