use actix_web::{
    HttpResponse,
    web::{self, Data},
};
use uuid::Uuid;

use crate::{
    database::{
        models::{
            BatchDeleteResult, BatchGenerationResult, GeneratePayrollsInput, NewPayroll,
            PayrollFilter, PayrollInput, PeriodQuery, UpdatePayrollInput,
        },
        repositories::{
            EmployeeRepository, EmployeeRubricRepository, PayrollRepository, ReceiptRepository,
        },
    },
    error::AppError,
    handlers::shared::ApiResponse,
    services::{
        self,
        calculator::{PayrollCalculationInput, calculate_payroll, validate_payroll},
    },
};

fn validate_payroll_input(input: &PayrollInput) -> Vec<String> {
    let mut errors = services::validate_period(input.month, input.year);
    if input.base_salary <= 0.0 {
        errors.push("Base salary must be greater than zero".to_string());
    }
    let non_negative = [
        (input.inss_discount, "INSS discount"),
        (input.irrf_discount, "IRRF discount"),
        (input.fgts_amount, "FGTS amount"),
        (input.health_insurance, "Health insurance"),
        (input.dental_insurance, "Dental insurance"),
        (input.custom_discount, "Custom discount"),
        (input.other_discounts, "Other discounts"),
    ];
    for (value, field) in non_negative {
        if value < 0.0 {
            errors.push(format!("{} cannot be negative", field));
        }
    }
    errors
}

/// Manual payroll entry. Gross and net are derived from the submitted
/// figures; the unique (employee, month, year) constraint backs the
/// duplicate pre-check.
pub async fn create_payroll(
    payroll_repo: Data<PayrollRepository>,
    employee_repo: Data<EmployeeRepository>,
    input: web::Json<PayrollInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    let errors = validate_payroll_input(&input);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let employee = employee_repo
        .find_by_id(input.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", input.employee_id)))?;

    if payroll_repo
        .exists_for(input.employee_id, input.month, input.year)
        .await?
    {
        return Err(AppError::Conflict(format!(
            "Payroll for {} in {}/{} already exists",
            employee.name, input.month, input.year
        )));
    }

    let (gross_salary, net_salary) = services::derive_totals(
        input.base_salary,
        input.inss_discount,
        input.irrf_discount,
        input.health_insurance,
        input.dental_insurance,
        input.custom_discount,
        input.other_discounts,
    );

    let payroll = payroll_repo
        .create(&NewPayroll {
            employee_id: input.employee_id,
            month: input.month,
            year: input.year,
            base_salary: input.base_salary,
            gross_salary,
            net_salary,
            inss_discount: input.inss_discount,
            irrf_discount: input.irrf_discount,
            fgts_amount: input.fgts_amount,
            health_insurance: input.health_insurance,
            dental_insurance: input.dental_insurance,
            custom_discount: input.custom_discount,
            custom_discount_description: input.custom_discount_description,
            other_discounts: input.other_discounts,
            receipt_benefits: 0.0,
            receipt_discounts: 0.0,
        })
        .await?;

    log::info!(
        "Created payroll for employee {} period {}/{}",
        payroll.employee_id,
        payroll.month,
        payroll.year
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(payroll)))
}

pub async fn get_payrolls(
    payroll_repo: Data<PayrollRepository>,
    query: web::Query<PayrollFilter>,
) -> Result<HttpResponse, AppError> {
    let payrolls = payroll_repo
        .find_all(query.employee_id, query.month, query.year)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payrolls)))
}

pub async fn get_payroll(
    payroll_repo: Data<PayrollRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payroll = payroll_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payroll {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(payroll)))
}

/// Explicit recalculation: merges the submitted discount fields over the
/// stored row and re-derives gross and net. Period and employee never change.
pub async fn update_payroll(
    payroll_repo: Data<PayrollRepository>,
    path: web::Path<Uuid>,
    input: web::Json<UpdatePayrollInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = input.into_inner();

    let mut errors = Vec::new();
    if input.base_salary.is_some_and(|v| v <= 0.0) {
        errors.push("Base salary must be greater than zero".to_string());
    }
    let non_negative = [
        (input.inss_discount, "INSS discount"),
        (input.irrf_discount, "IRRF discount"),
        (input.fgts_amount, "FGTS amount"),
        (input.health_insurance, "Health insurance"),
        (input.dental_insurance, "Dental insurance"),
        (input.custom_discount, "Custom discount"),
        (input.other_discounts, "Other discounts"),
    ];
    for (value, field) in non_negative {
        if value.is_some_and(|v| v < 0.0) {
            errors.push(format!("{} cannot be negative", field));
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut payroll = payroll_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payroll {} not found", id)))?;

    payroll.base_salary = input.base_salary.unwrap_or(payroll.base_salary);
    payroll.inss_discount = input.inss_discount.unwrap_or(payroll.inss_discount);
    payroll.irrf_discount = input.irrf_discount.unwrap_or(payroll.irrf_discount);
    payroll.fgts_amount = input.fgts_amount.unwrap_or(payroll.fgts_amount);
    payroll.health_insurance = input.health_insurance.unwrap_or(payroll.health_insurance);
    payroll.dental_insurance = input.dental_insurance.unwrap_or(payroll.dental_insurance);
    payroll.custom_discount = input.custom_discount.unwrap_or(payroll.custom_discount);
    if input.custom_discount_description.is_some() {
        payroll.custom_discount_description = input.custom_discount_description;
    }
    payroll.other_discounts = input.other_discounts.unwrap_or(payroll.other_discounts);

    let (gross_salary, net_salary) = services::derive_totals(
        payroll.base_salary,
        payroll.inss_discount,
        payroll.irrf_discount,
        payroll.health_insurance,
        payroll.dental_insurance,
        payroll.custom_discount,
        payroll.other_discounts,
    );
    payroll.gross_salary = gross_salary;
    payroll.net_salary = net_salary;

    let updated = payroll_repo.update(&payroll).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

pub async fn delete_payroll(
    payroll_repo: Data<PayrollRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deleted = payroll_repo.delete(id).await?;

    if !deleted {
        return Err(AppError::NotFound(format!("Payroll {} not found", id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Payroll deleted",
    )))
}

/// Calculation preview: runs the rich calculator without persisting anything.
pub async fn calculate_payroll_preview(
    input: web::Json<PayrollCalculationInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    let errors = validate_payroll(&input);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let calculation = calculate_payroll(&input);
    Ok(HttpResponse::Ok().json(ApiResponse::success(calculation)))
}

/// Batch generation for one period. All-or-nothing: any employee already
/// holding a payroll for the period fails the whole batch, by name, before
/// a single row is written.
pub async fn generate_payrolls(
    payroll_repo: Data<PayrollRepository>,
    employee_repo: Data<EmployeeRepository>,
    assignment_repo: Data<EmployeeRubricRepository>,
    receipt_repo: Data<ReceiptRepository>,
    input: web::Json<GeneratePayrollsInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    let errors = services::validate_period(input.month, input.year);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let employees = employee_repo
        .find_active(input.employee_ids.as_deref())
        .await?;
    if employees.is_empty() {
        return Err(AppError::BadRequest(
            "No active employees found for payroll generation".to_string(),
        ));
    }

    let employee_ids: Vec<Uuid> = employees.iter().map(|e| e.id).collect();
    let conflicts = payroll_repo
        .find_conflicts(input.month, input.year, &employee_ids)
        .await?;
    if !conflicts.is_empty() {
        let names: Vec<String> = conflicts.into_iter().map(|c| c.employee_name).collect();
        return Err(AppError::Conflict(format!(
            "Payroll for {}/{} already exists for: {}",
            input.month,
            input.year,
            names.join(", ")
        )));
    }

    let mut rows = Vec::with_capacity(employees.len());
    for employee in &employees {
        let assignments = assignment_repo.find_active_by_employee(employee.id).await?;
        let receipts = receipt_repo
            .find_for_period(employee.id, input.month, input.year)
            .await?;
        rows.push(services::build_payroll(
            employee,
            &assignments,
            &receipts,
            input.month,
            input.year,
        ));
    }

    let payrolls = payroll_repo.insert_batch(&rows).await?;
    log::info!(
        "Generated {} payrolls for period {}/{}",
        payrolls.len(),
        input.month,
        input.year
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(BatchGenerationResult {
        month: input.month,
        year: input.year,
        created: payrolls.len(),
        payrolls,
    })))
}

/// Deletes every payroll of a period, reporting the employees affected.
pub async fn delete_payroll_period(
    payroll_repo: Data<PayrollRepository>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    let errors = services::validate_period(query.month, query.year);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let employees = payroll_repo.delete_period(query.month, query.year).await?;
    if employees.is_empty() {
        return Err(AppError::NotFound(format!(
            "No payrolls found for period {}/{}",
            query.month, query.year
        )));
    }

    log::info!(
        "Deleted {} payrolls for period {}/{}",
        employees.len(),
        query.month,
        query.year
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(BatchDeleteResult {
        month: query.month,
        year: query.year,
        deleted: employees.len(),
        employees,
    })))
}
