use actix_web::{
    HttpResponse,
    web::{self, Data},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    database::{
        models::{ReceiptInput, ReceiptTypeInput, UpdateReceiptInput, UpdateReceiptTypeInput},
        repositories::{EmployeeRepository, ReceiptRepository, ReceiptTypeRepository},
    },
    error::AppError,
    handlers::{employees::ListQuery, shared::ApiResponse},
    services,
};

pub async fn create_receipt_type(
    repo: Data<ReceiptTypeRepository>,
    input: web::Json<ReceiptTypeInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    if input.name.trim().is_empty() {
        return Err(AppError::Validation(vec!["Name is required".to_string()]));
    }

    if repo.find_by_name(&input.name).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Receipt type {:?} already exists",
            input.name
        )));
    }

    let receipt_type = repo.create(input).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(receipt_type)))
}

pub async fn get_receipt_types(
    repo: Data<ReceiptTypeRepository>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let receipt_types = repo.find_all(query.include_inactive).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(receipt_types)))
}

pub async fn get_receipt_type(
    repo: Data<ReceiptTypeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let receipt_type = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Receipt type {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(receipt_type)))
}

pub async fn update_receipt_type(
    repo: Data<ReceiptTypeRepository>,
    path: web::Path<Uuid>,
    input: web::Json<UpdateReceiptTypeInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let receipt_type = repo
        .update(id, input.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Receipt type {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(receipt_type)))
}

/// Hard-deletes only unreferenced types; referenced ones are deactivated.
pub async fn delete_receipt_type(
    repo: Data<ReceiptTypeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    if repo.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Receipt type {} not found", id)));
    }

    if repo.receipt_count(id).await? > 0 {
        repo.deactivate(id).await?;
        return Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            None,
            "Receipt type is referenced by receipts and was deactivated",
        )));
    }

    repo.delete(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Receipt type deleted",
    )))
}

fn validate_receipt_input(input: &ReceiptInput) -> Vec<String> {
    let mut errors = services::validate_period(input.month, input.year);
    if input.daily_value < 0.0 {
        errors.push("dailyValue cannot be negative".to_string());
    }
    if input.days < 0 {
        errors.push("days cannot be negative".to_string());
    }
    errors
}

pub async fn create_receipt(
    repo: Data<ReceiptRepository>,
    type_repo: Data<ReceiptTypeRepository>,
    employee_repo: Data<EmployeeRepository>,
    input: web::Json<ReceiptInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    let errors = validate_receipt_input(&input);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if employee_repo.find_by_id(input.employee_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Employee {} not found",
            input.employee_id
        )));
    }
    if type_repo.find_by_id(input.receipt_type_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Receipt type {} not found",
            input.receipt_type_id
        )));
    }

    let receipt = repo.create(input).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(receipt)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptQuery {
    pub employee_id: Option<Uuid>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}

pub async fn get_receipts(
    repo: Data<ReceiptRepository>,
    query: web::Query<ReceiptQuery>,
) -> Result<HttpResponse, AppError> {
    let receipts = repo
        .find_all(query.employee_id, query.month, query.year)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(receipts)))
}

pub async fn get_receipt(
    repo: Data<ReceiptRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let receipt = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Receipt {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(receipt)))
}

pub async fn update_receipt(
    repo: Data<ReceiptRepository>,
    path: web::Path<Uuid>,
    input: web::Json<UpdateReceiptInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = input.into_inner();

    // Absent fields keep their stored value, so only the submitted side of
    // the period is validated.
    let mut errors =
        services::validate_period(input.month.unwrap_or(1), input.year.unwrap_or(2020));
    if input.daily_value.is_some_and(|v| v < 0.0) {
        errors.push("dailyValue cannot be negative".to_string());
    }
    if input.days.is_some_and(|d| d < 0) {
        errors.push("days cannot be negative".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let receipt = repo
        .update(id, input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Receipt {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(receipt)))
}

pub async fn delete_receipt(
    repo: Data<ReceiptRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deleted = repo.delete(id).await?;

    if !deleted {
        return Err(AppError::NotFound(format!("Receipt {} not found", id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Receipt deleted",
    )))
}
