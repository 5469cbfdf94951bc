use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{ReceiptType, ReceiptTypeInput, UpdateReceiptTypeInput},
    utils::sql,
};

const RECEIPT_TYPE_COLUMNS: &str = r#"
    id,
    name,
    description,
    is_active,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct ReceiptTypeRepository {
    pool: PgPool,
}

impl ReceiptTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: ReceiptTypeInput) -> Result<ReceiptType> {
        let now = Utc::now();
        let receipt_type = sqlx::query_as::<_, ReceiptType>(&sql(&format!(
            r#"
            INSERT INTO
                receipt_types (name, description, created_at, updated_at)
            VALUES
                (?, ?, ?, ?)
            RETURNING
                {RECEIPT_TYPE_COLUMNS}
        "#
        )))
        .bind(input.name)
        .bind(input.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(receipt_type)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ReceiptType>> {
        let receipt_type = sqlx::query_as::<_, ReceiptType>(&sql(&format!(
            r#"
            SELECT
                {RECEIPT_TYPE_COLUMNS}
            FROM
                receipt_types
            WHERE
                id = ?
        "#
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt_type)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<ReceiptType>> {
        let receipt_type = sqlx::query_as::<_, ReceiptType>(&sql(&format!(
            r#"
            SELECT
                {RECEIPT_TYPE_COLUMNS}
            FROM
                receipt_types
            WHERE
                name = ?
        "#
        )))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt_type)
    }

    pub async fn find_all(&self, include_inactive: bool) -> Result<Vec<ReceiptType>> {
        let receipt_types = sqlx::query_as::<_, ReceiptType>(&sql(&format!(
            r#"
            SELECT
                {RECEIPT_TYPE_COLUMNS}
            FROM
                receipt_types
            WHERE
                is_active = TRUE
                OR ? = TRUE
            ORDER BY
                name
        "#
        )))
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(receipt_types)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateReceiptTypeInput,
    ) -> Result<Option<ReceiptType>> {
        let now = Utc::now();
        let receipt_type = sqlx::query_as::<_, ReceiptType>(&sql(&format!(
            r#"
            UPDATE
                receipt_types
            SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {RECEIPT_TYPE_COLUMNS}
        "#
        )))
        .bind(input.name)
        .bind(input.description)
        .bind(input.is_active)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt_type)
    }

    /// Receipts referencing this type. A referenced type is deactivated
    /// instead of deleted so issued receipts keep their history.
    pub async fn receipt_count(&self, id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(&sql(r#"
            SELECT
                COUNT(*)
            FROM
                receipts
            WHERE
                receipt_type_id = ?
        "#))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&sql(r#"
            UPDATE
                receipt_types
            SET
                is_active = FALSE,
                updated_at = ?
            WHERE
                id = ?
        "#))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&sql(r#"
            DELETE FROM
                receipt_types
            WHERE
                id = ?
        "#))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
