use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{Receipt, ReceiptDetail, ReceiptInput, UpdateReceiptInput},
    utils::sql,
};

const RECEIPT_COLUMNS: &str = r#"
    id,
    employee_id,
    receipt_type_id,
    month,
    year,
    daily_value,
    days,
    value,
    created_at,
    updated_at
"#;

const DETAIL_COLUMNS: &str = r#"
    rc.id,
    rc.employee_id,
    rc.receipt_type_id,
    rc.month,
    rc.year,
    rc.daily_value,
    rc.days,
    rc.value,
    rt.name AS type_name,
    e.name AS employee_name
"#;

#[derive(Clone)]
pub struct ReceiptRepository {
    pool: PgPool,
}

impl ReceiptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `value` is derived server-side from daily_value * days, never taken
    /// from the client.
    pub async fn create(&self, input: ReceiptInput) -> Result<Receipt> {
        let now = Utc::now();
        let value = input.daily_value * input.days as f64;
        let receipt = sqlx::query_as::<_, Receipt>(&sql(&format!(
            r#"
            INSERT INTO
                receipts (
                    employee_id,
                    receipt_type_id,
                    month,
                    year,
                    daily_value,
                    days,
                    value,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {RECEIPT_COLUMNS}
        "#
        )))
        .bind(input.employee_id)
        .bind(input.receipt_type_id)
        .bind(input.month)
        .bind(input.year)
        .bind(input.daily_value)
        .bind(input.days)
        .bind(value)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(receipt)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Receipt>> {
        let receipt = sqlx::query_as::<_, Receipt>(&sql(&format!(
            r#"
            SELECT
                {RECEIPT_COLUMNS}
            FROM
                receipts
            WHERE
                id = ?
        "#
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    pub async fn find_all(
        &self,
        employee_id: Option<Uuid>,
        month: Option<i32>,
        year: Option<i32>,
    ) -> Result<Vec<ReceiptDetail>> {
        let receipts = sqlx::query_as::<_, ReceiptDetail>(&sql(&format!(
            r#"
            SELECT
                {DETAIL_COLUMNS}
            FROM
                receipts rc
                JOIN receipt_types rt ON rt.id = rc.receipt_type_id
                JOIN employees e ON e.id = rc.employee_id
            WHERE
                (?::uuid IS NULL OR rc.employee_id = ?)
                AND (?::int IS NULL OR rc.month = ?)
                AND (?::int IS NULL OR rc.year = ?)
            ORDER BY
                rc.year DESC,
                rc.month DESC,
                e.name
        "#
        )))
        .bind(employee_id)
        .bind(employee_id)
        .bind(month)
        .bind(month)
        .bind(year)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(receipts)
    }

    /// Receipts feeding one employee's payroll for an exact period.
    pub async fn find_for_period(
        &self,
        employee_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Vec<ReceiptDetail>> {
        let receipts = sqlx::query_as::<_, ReceiptDetail>(&sql(&format!(
            r#"
            SELECT
                {DETAIL_COLUMNS}
            FROM
                receipts rc
                JOIN receipt_types rt ON rt.id = rc.receipt_type_id
                JOIN employees e ON e.id = rc.employee_id
            WHERE
                rc.employee_id = ?
                AND rc.month = ?
                AND rc.year = ?
        "#
        )))
        .bind(employee_id)
        .bind(month)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(receipts)
    }

    pub async fn update(&self, id: Uuid, input: UpdateReceiptInput) -> Result<Option<Receipt>> {
        let Some(current) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let daily_value = input.daily_value.unwrap_or(current.daily_value);
        let days = input.days.unwrap_or(current.days);
        let value = daily_value * days as f64;

        let now = Utc::now();
        let receipt = sqlx::query_as::<_, Receipt>(&sql(&format!(
            r#"
            UPDATE
                receipts
            SET
                receipt_type_id = COALESCE(?, receipt_type_id),
                month = COALESCE(?, month),
                year = COALESCE(?, year),
                daily_value = ?,
                days = ?,
                value = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {RECEIPT_COLUMNS}
        "#
        )))
        .bind(input.receipt_type_id)
        .bind(input.month)
        .bind(input.year)
        .bind(daily_value)
        .bind(days)
        .bind(value)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&sql(r#"
            DELETE FROM
                receipts
            WHERE
                id = ?
        "#))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
