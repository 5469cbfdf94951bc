use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{Employee, EmployeeInput, UpdateEmployeeInput},
    utils::sql,
};

const EMPLOYEE_COLUMNS: &str = r#"
    id,
    name,
    registration,
    position,
    salary,
    dependents,
    is_active,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: EmployeeInput) -> Result<Employee> {
        let now = Utc::now();
        let employee = sqlx::query_as::<_, Employee>(&sql(&format!(
            r#"
            INSERT INTO
                employees (name, registration, position, salary, dependents, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {EMPLOYEE_COLUMNS}
        "#
        )))
        .bind(input.name)
        .bind(input.registration)
        .bind(input.position)
        .bind(input.salary)
        .bind(input.dependents)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&sql(&format!(
            r#"
            SELECT
                {EMPLOYEE_COLUMNS}
            FROM
                employees
            WHERE
                id = ?
        "#
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn find_by_registration(&self, registration: &str) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&sql(&format!(
            r#"
            SELECT
                {EMPLOYEE_COLUMNS}
            FROM
                employees
            WHERE
                registration = ?
        "#
        )))
        .bind(registration)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn find_all(&self, include_inactive: bool) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&sql(&format!(
            r#"
            SELECT
                {EMPLOYEE_COLUMNS}
            FROM
                employees
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

        Ok(employees)
    }

    /// Active employees, optionally restricted to the given ids.
    pub async fn find_active(&self, ids: Option<&[Uuid]>) -> Result<Vec<Employee>> {
        let employees = match ids {
            Some(ids) => {
                sqlx::query_as::<_, Employee>(&sql(&format!(
                    r#"
                    SELECT
                        {EMPLOYEE_COLUMNS}
                    FROM
                        employees
                    WHERE
                        is_active = TRUE
                        AND id = ANY(?)
                    ORDER BY
                        name
                "#
                )))
                .bind(ids.to_vec())
                .fetch_all(&self.pool)
                .await?
            }
            None => self.find_all(false).await?,
        };

        Ok(employees)
    }

    pub async fn update(&self, id: Uuid, input: UpdateEmployeeInput) -> Result<Option<Employee>> {
        let now = Utc::now();
        let employee = sqlx::query_as::<_, Employee>(&sql(&format!(
            r#"
            UPDATE
                employees
            SET
                name = COALESCE(?, name),
                registration = COALESCE(?, registration),
                position = COALESCE(?, position),
                salary = COALESCE(?, salary),
                dependents = COALESCE(?, dependents),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {EMPLOYEE_COLUMNS}
        "#
        )))
        .bind(input.name)
        .bind(input.registration)
        .bind(input.position)
        .bind(input.salary)
        .bind(input.dependents)
        .bind(input.is_active)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Soft delete: flips is_active so historical payrolls stay valid.
    pub async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&sql(r#"
            UPDATE
                employees
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
