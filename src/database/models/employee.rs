use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub registration: String, // matrícula, unique
    pub position: Option<String>,
    pub salary: f64,
    pub dependents: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub name: String,
    pub registration: String,
    pub position: Option<String>,
    pub salary: f64,
    #[serde(default)]
    pub dependents: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub registration: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub dependents: Option<i32>,
    pub is_active: Option<bool>,
}
