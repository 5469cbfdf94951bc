use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a rubric adds to gross salary or is withheld from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RubricKind {
    Discount,
    Benefit,
}

impl RubricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RubricKind::Discount => "discount",
            RubricKind::Benefit => "benefit",
        }
    }
}

impl sqlx::Type<sqlx::Postgres> for RubricKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for RubricKind {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for RubricKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        match s.as_str() {
            "discount" => Ok(RubricKind::Discount),
            "benefit" => Ok(RubricKind::Benefit),
            _ => Err(format!("Invalid RubricKind: {}", s).into()),
        }
    }
}

impl std::fmt::Display for RubricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reusable payroll line-item template, e.g. "Plano de Saúde".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRubric {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: RubricKind,
    pub code: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricInput {
    pub name: String,
    pub description: Option<String>,
    pub kind: RubricKind,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRubricInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<RubricKind>,
    pub code: Option<String>,
    pub is_active: Option<bool>,
}

/// Per-employee rubric assignment. Exactly one of `custom_value` (fixed
/// amount) or `custom_percentage` (fraction of base salary, 0.08 = 8%) is
/// set; the schema enforces this with a CHECK constraint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRubric {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub rubric_id: Uuid,
    pub custom_value: Option<f64>,
    pub custom_percentage: Option<f64>,
    pub custom_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRubricInput {
    pub rubric_id: Uuid,
    pub custom_value: Option<f64>,
    pub custom_percentage: Option<f64>,
    pub custom_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRubricInput {
    pub custom_value: Option<f64>,
    pub custom_percentage: Option<f64>,
    pub custom_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Assignment joined with its template, as consumed by the rubric evaluator.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRubricDetail {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub rubric_id: Uuid,
    pub custom_value: Option<f64>,
    pub custom_percentage: Option<f64>,
    pub custom_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub rubric_name: String,
    pub rubric_kind: RubricKind,
    pub rubric_code: Option<String>,
}

impl EmployeeRubricDetail {
    /// Name shown on the payroll line: the per-employee override when
    /// present, the template name otherwise.
    pub fn display_name(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.rubric_name)
    }
}
