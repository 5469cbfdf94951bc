use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Computed payroll for one employee and one (month, year) period. Unique per
/// (employee_id, month, year) at the schema level.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub base_salary: f64,
    pub gross_salary: f64,
    pub net_salary: f64,
    pub inss_discount: f64,
    pub irrf_discount: f64,
    pub fgts_amount: f64,
    pub health_insurance: f64,
    pub dental_insurance: f64,
    pub custom_discount: f64,
    pub custom_discount_description: Option<String>,
    pub other_discounts: f64,
    pub receipt_benefits: f64,
    pub receipt_discounts: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payroll joined with the employee's name and registration, for listings and
/// audit payloads.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PayrollWithEmployee {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub registration: String,
    pub month: i32,
    pub year: i32,
    pub base_salary: f64,
    pub gross_salary: f64,
    pub net_salary: f64,
    pub inss_discount: f64,
    pub irrf_discount: f64,
    pub fgts_amount: f64,
    pub health_insurance: f64,
    pub dental_insurance: f64,
    pub custom_discount: f64,
    pub custom_discount_description: Option<String>,
    pub other_discounts: f64,
    pub receipt_benefits: f64,
    pub receipt_discounts: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row to insert, produced by manual entry or by batch generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayroll {
    pub employee_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub base_salary: f64,
    pub gross_salary: f64,
    pub net_salary: f64,
    pub inss_discount: f64,
    pub irrf_discount: f64,
    pub fgts_amount: f64,
    pub health_insurance: f64,
    pub dental_insurance: f64,
    pub custom_discount: f64,
    pub custom_discount_description: Option<String>,
    pub other_discounts: f64,
    pub receipt_benefits: f64,
    pub receipt_discounts: f64,
}

/// Manual payroll entry. Gross and net are derived server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollInput {
    pub employee_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub base_salary: f64,
    #[serde(default)]
    pub inss_discount: f64,
    #[serde(default)]
    pub irrf_discount: f64,
    #[serde(default)]
    pub fgts_amount: f64,
    #[serde(default)]
    pub health_insurance: f64,
    #[serde(default)]
    pub dental_insurance: f64,
    #[serde(default)]
    pub custom_discount: f64,
    pub custom_discount_description: Option<String>,
    #[serde(default)]
    pub other_discounts: f64,
}

/// Recalculation input for PUT: gross and net are re-derived from the
/// submitted figures, never trusted from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayrollInput {
    pub base_salary: Option<f64>,
    pub inss_discount: Option<f64>,
    pub irrf_discount: Option<f64>,
    pub fgts_amount: Option<f64>,
    pub health_insurance: Option<f64>,
    pub dental_insurance: Option<f64>,
    pub custom_discount: Option<f64>,
    pub custom_discount_description: Option<String>,
    pub other_discounts: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePayrollsInput {
    pub month: i32,
    pub year: i32,
    /// Defaults to every active employee when omitted.
    pub employee_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGenerationResult {
    pub month: i32,
    pub year: i32,
    pub created: usize,
    pub payrolls: Vec<Payroll>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteResult {
    pub month: i32,
    pub year: i32,
    pub deleted: usize,
    pub employees: Vec<String>,
}

/// Employee already holding a payroll for the requested period.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PayrollConflict {
    pub employee_id: Uuid,
    pub employee_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollFilter {
    pub employee_id: Option<Uuid>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub month: i32,
    pub year: i32,
}
