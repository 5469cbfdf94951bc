use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{EmployeeRubric, EmployeeRubricDetail, EmployeeRubricInput, UpdateEmployeeRubricInput},
    utils::sql,
};

const ASSIGNMENT_COLUMNS: &str = r#"
    id,
    employee_id,
    rubric_id,
    custom_value,
    custom_percentage,
    custom_name,
    start_date,
    end_date,
    is_active,
    created_at,
    updated_at
"#;

const DETAIL_COLUMNS: &str = r#"
    er.id,
    er.employee_id,
    er.rubric_id,
    er.custom_value,
    er.custom_percentage,
    er.custom_name,
    er.start_date,
    er.end_date,
    er.is_active,
    r.name AS rubric_name,
    r.kind AS rubric_kind,
    r.code AS rubric_code
"#;

#[derive(Clone)]
pub struct EmployeeRubricRepository {
    pool: PgPool,
}

impl EmployeeRubricRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        employee_id: Uuid,
        input: EmployeeRubricInput,
    ) -> Result<EmployeeRubric> {
        let now = Utc::now();
        let assignment = sqlx::query_as::<_, EmployeeRubric>(&sql(&format!(
            r#"
            INSERT INTO
                employee_rubrics (
                    employee_id,
                    rubric_id,
                    custom_value,
                    custom_percentage,
                    custom_name,
                    start_date,
                    end_date,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {ASSIGNMENT_COLUMNS}
        "#
        )))
        .bind(employee_id)
        .bind(input.rubric_id)
        .bind(input.custom_value)
        .bind(input.custom_percentage)
        .bind(input.custom_name)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EmployeeRubric>> {
        let assignment = sqlx::query_as::<_, EmployeeRubric>(&sql(&format!(
            r#"
            SELECT
                {ASSIGNMENT_COLUMNS}
            FROM
                employee_rubrics
            WHERE
                id = ?
        "#
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assignment)
    }

    /// An active assignment of the same rubric to the same employee blocks a
    /// second one from being created.
    pub async fn find_active_assignment(
        &self,
        employee_id: Uuid,
        rubric_id: Uuid,
    ) -> Result<Option<EmployeeRubric>> {
        let assignment = sqlx::query_as::<_, EmployeeRubric>(&sql(&format!(
            r#"
            SELECT
                {ASSIGNMENT_COLUMNS}
            FROM
                employee_rubrics
            WHERE
                employee_id = ?
                AND rubric_id = ?
                AND is_active = TRUE
        "#
        )))
        .bind(employee_id)
        .bind(rubric_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn find_by_employee(&self, employee_id: Uuid) -> Result<Vec<EmployeeRubricDetail>> {
        let assignments = sqlx::query_as::<_, EmployeeRubricDetail>(&sql(&format!(
            r#"
            SELECT
                {DETAIL_COLUMNS}
            FROM
                employee_rubrics er
                JOIN payroll_rubrics r ON r.id = er.rubric_id
            WHERE
                er.employee_id = ?
            ORDER BY
                r.name
        "#
        )))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    /// Assignments eligible for payroll generation: both the assignment and
    /// its template must be active. Validity windows are checked by the
    /// evaluator, at month granularity.
    pub async fn find_active_by_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<EmployeeRubricDetail>> {
        let assignments = sqlx::query_as::<_, EmployeeRubricDetail>(&sql(&format!(
            r#"
            SELECT
                {DETAIL_COLUMNS}
            FROM
                employee_rubrics er
                JOIN payroll_rubrics r ON r.id = er.rubric_id
            WHERE
                er.employee_id = ?
                AND er.is_active = TRUE
                AND r.is_active = TRUE
            ORDER BY
                r.name
        "#
        )))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateEmployeeRubricInput,
    ) -> Result<Option<EmployeeRubric>> {
        let Some(current) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        // Fixed value and percentage are mutually exclusive; the submitted
        // side wins and clears the other.
        let (custom_value, custom_percentage) = match (input.custom_value, input.custom_percentage)
        {
            (Some(value), _) => (Some(value), None),
            (None, Some(percentage)) => (None, Some(percentage)),
            (None, None) => (current.custom_value, current.custom_percentage),
        };

        let now = Utc::now();
        let assignment = sqlx::query_as::<_, EmployeeRubric>(&sql(&format!(
            r#"
            UPDATE
                employee_rubrics
            SET
                custom_value = ?,
                custom_percentage = ?,
                custom_name = COALESCE(?, custom_name),
                start_date = COALESCE(?, start_date),
                end_date = COALESCE(?, end_date),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {ASSIGNMENT_COLUMNS}
        "#
        )))
        .bind(custom_value)
        .bind(custom_percentage)
        .bind(input.custom_name)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.is_active)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&sql(r#"
            UPDATE
                employee_rubrics
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
}
