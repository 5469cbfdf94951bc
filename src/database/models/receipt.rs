use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptTypeInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReceiptTypeInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Per-period voucher/reimbursement. `value` is always recomputed as
/// `daily_value * days` on write.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub receipt_type_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub daily_value: f64,
    pub days: i32,
    pub value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptInput {
    pub employee_id: Uuid,
    pub receipt_type_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub daily_value: f64,
    pub days: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReceiptInput {
    pub receipt_type_id: Option<Uuid>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub daily_value: Option<f64>,
    pub days: Option<i32>,
}

/// Receipt joined with its type name, as consumed by the receipt classifier.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDetail {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub receipt_type_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub daily_value: f64,
    pub days: i32,
    pub value: f64,
    pub type_name: String,
    pub employee_name: String,
}
