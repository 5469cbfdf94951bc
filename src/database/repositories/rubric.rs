use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{PayrollRubric, RubricInput, UpdateRubricInput},
    utils::sql,
};

const RUBRIC_COLUMNS: &str = r#"
    id,
    name,
    description,
    kind,
    code,
    is_active,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct RubricRepository {
    pool: PgPool,
}

impl RubricRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: RubricInput) -> Result<PayrollRubric> {
        let now = Utc::now();
        let rubric = sqlx::query_as::<_, PayrollRubric>(&sql(&format!(
            r#"
            INSERT INTO
                payroll_rubrics (name, description, kind, code, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?, ?)
            RETURNING
                {RUBRIC_COLUMNS}
        "#
        )))
        .bind(input.name)
        .bind(input.description)
        .bind(input.kind)
        .bind(input.code)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(rubric)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PayrollRubric>> {
        let rubric = sqlx::query_as::<_, PayrollRubric>(&sql(&format!(
            r#"
            SELECT
                {RUBRIC_COLUMNS}
            FROM
                payroll_rubrics
            WHERE
                id = ?
        "#
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rubric)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<PayrollRubric>> {
        let rubric = sqlx::query_as::<_, PayrollRubric>(&sql(&format!(
            r#"
            SELECT
                {RUBRIC_COLUMNS}
            FROM
                payroll_rubrics
            WHERE
                name = ?
        "#
        )))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rubric)
    }

    pub async fn find_all(&self, include_inactive: bool) -> Result<Vec<PayrollRubric>> {
        let rubrics = sqlx::query_as::<_, PayrollRubric>(&sql(&format!(
            r#"
            SELECT
                {RUBRIC_COLUMNS}
            FROM
                payroll_rubrics
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

        Ok(rubrics)
    }

    pub async fn update(&self, id: Uuid, input: UpdateRubricInput) -> Result<Option<PayrollRubric>> {
        let now = Utc::now();
        let rubric = sqlx::query_as::<_, PayrollRubric>(&sql(&format!(
            r#"
            UPDATE
                payroll_rubrics
            SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                kind = COALESCE(?, kind),
                code = COALESCE(?, code),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {RUBRIC_COLUMNS}
        "#
        )))
        .bind(input.name)
        .bind(input.description)
        .bind(input.kind)
        .bind(input.code)
        .bind(input.is_active)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rubric)
    }

    /// Number of employee assignments referencing this rubric, active or not.
    /// Issued payrolls keep their history, so a referenced rubric can only be
    /// deactivated, never hard-deleted.
    pub async fn assignment_count(&self, id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(&sql(r#"
            SELECT
                COUNT(*)
            FROM
                employee_rubrics
            WHERE
                rubric_id = ?
        "#))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&sql(r#"
            UPDATE
                payroll_rubrics
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
                payroll_rubrics
            WHERE
                id = ?
        "#))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
