use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{NewPayroll, Payroll, PayrollConflict, PayrollWithEmployee},
    utils::sql,
};

const PAYROLL_COLUMNS: &str = r#"
    id,
    employee_id,
    month,
    year,
    base_salary,
    gross_salary,
    net_salary,
    inss_discount,
    irrf_discount,
    fgts_amount,
    health_insurance,
    dental_insurance,
    custom_discount,
    custom_discount_description,
    other_discounts,
    receipt_benefits,
    receipt_discounts,
    created_at,
    updated_at
"#;

const INSERT_PAYROLL: &str = r#"
    INSERT INTO
        payrolls (
            employee_id,
            month,
            year,
            base_salary,
            gross_salary,
            net_salary,
            inss_discount,
            irrf_discount,
            fgts_amount,
            health_insurance,
            dental_insurance,
            custom_discount,
            custom_discount_description,
            other_discounts,
            receipt_benefits,
            receipt_discounts,
            created_at,
            updated_at
        )
    VALUES
        (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

#[derive(Clone)]
pub struct PayrollRepository {
    pool: PgPool,
}

impl PayrollRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewPayroll) -> Result<Payroll> {
        let now = Utc::now();
        let payroll = sqlx::query_as::<_, Payroll>(&sql(&format!(
            "{INSERT_PAYROLL} RETURNING {PAYROLL_COLUMNS}"
        )))
        .bind(new.employee_id)
        .bind(new.month)
        .bind(new.year)
        .bind(new.base_salary)
        .bind(new.gross_salary)
        .bind(new.net_salary)
        .bind(new.inss_discount)
        .bind(new.irrf_discount)
        .bind(new.fgts_amount)
        .bind(new.health_insurance)
        .bind(new.dental_insurance)
        .bind(new.custom_discount)
        .bind(new.custom_discount_description.clone())
        .bind(new.other_discounts)
        .bind(new.receipt_benefits)
        .bind(new.receipt_discounts)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(payroll)
    }

    /// Inserts a whole batch inside one transaction: either every row lands
    /// or none does. The unique (employee_id, month, year) constraint is the
    /// authoritative duplicate guard; a violation rolls the batch back.
    pub async fn insert_batch(&self, rows: &[NewPayroll]) -> Result<Vec<Payroll>> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();
        let mut created = Vec::with_capacity(rows.len());

        for new in rows {
            let payroll = sqlx::query_as::<_, Payroll>(&sql(&format!(
                "{INSERT_PAYROLL} RETURNING {PAYROLL_COLUMNS}"
            )))
            .bind(new.employee_id)
            .bind(new.month)
            .bind(new.year)
            .bind(new.base_salary)
            .bind(new.gross_salary)
            .bind(new.net_salary)
            .bind(new.inss_discount)
            .bind(new.irrf_discount)
            .bind(new.fgts_amount)
            .bind(new.health_insurance)
            .bind(new.dental_insurance)
            .bind(new.custom_discount)
            .bind(new.custom_discount_description.clone())
            .bind(new.other_discounts)
            .bind(new.receipt_benefits)
            .bind(new.receipt_discounts)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

            created.push(payroll);
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Payroll>> {
        let payroll = sqlx::query_as::<_, Payroll>(&sql(&format!(
            r#"
            SELECT
                {PAYROLL_COLUMNS}
            FROM
                payrolls
            WHERE
                id = ?
        "#
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payroll)
    }

    pub async fn find_all(
        &self,
        employee_id: Option<Uuid>,
        month: Option<i32>,
        year: Option<i32>,
    ) -> Result<Vec<PayrollWithEmployee>> {
        let payrolls = sqlx::query_as::<_, PayrollWithEmployee>(&sql(r#"
            SELECT
                p.id,
                p.employee_id,
                e.name AS employee_name,
                e.registration,
                p.month,
                p.year,
                p.base_salary,
                p.gross_salary,
                p.net_salary,
                p.inss_discount,
                p.irrf_discount,
                p.fgts_amount,
                p.health_insurance,
                p.dental_insurance,
                p.custom_discount,
                p.custom_discount_description,
                p.other_discounts,
                p.receipt_benefits,
                p.receipt_discounts,
                p.created_at,
                p.updated_at
            FROM
                payrolls p
                JOIN employees e ON e.id = p.employee_id
            WHERE
                (?::uuid IS NULL OR p.employee_id = ?)
                AND (?::int IS NULL OR p.month = ?)
                AND (?::int IS NULL OR p.year = ?)
            ORDER BY
                p.year DESC,
                p.month DESC,
                e.name
        "#))
        .bind(employee_id)
        .bind(employee_id)
        .bind(month)
        .bind(month)
        .bind(year)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(payrolls)
    }

    pub async fn exists_for(&self, employee_id: Uuid, month: i32, year: i32) -> Result<bool> {
        let row: Option<(Uuid,)> = sqlx::query_as(&sql(r#"
            SELECT
                id
            FROM
                payrolls
            WHERE
                employee_id = ?
                AND month = ?
                AND year = ?
        "#))
        .bind(employee_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Employees among `employee_ids` that already hold a payroll for the
    /// period. Evaluated before any insert so batch failures can name the
    /// conflicting employees.
    pub async fn find_conflicts(
        &self,
        month: i32,
        year: i32,
        employee_ids: &[Uuid],
    ) -> Result<Vec<PayrollConflict>> {
        let conflicts = sqlx::query_as::<_, PayrollConflict>(&sql(r#"
            SELECT
                p.employee_id,
                e.name AS employee_name
            FROM
                payrolls p
                JOIN employees e ON e.id = p.employee_id
            WHERE
                p.month = ?
                AND p.year = ?
                AND p.employee_id = ANY(?)
            ORDER BY
                e.name
        "#))
        .bind(month)
        .bind(year)
        .bind(employee_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        Ok(conflicts)
    }

    /// Writes the recalculated figures back. Period and employee are
    /// immutable once issued.
    pub async fn update(&self, payroll: &Payroll) -> Result<Payroll> {
        let updated = sqlx::query_as::<_, Payroll>(&sql(&format!(
            r#"
            UPDATE
                payrolls
            SET
                base_salary = ?,
                gross_salary = ?,
                net_salary = ?,
                inss_discount = ?,
                irrf_discount = ?,
                fgts_amount = ?,
                health_insurance = ?,
                dental_insurance = ?,
                custom_discount = ?,
                custom_discount_description = ?,
                other_discounts = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {PAYROLL_COLUMNS}
        "#
        )))
        .bind(payroll.base_salary)
        .bind(payroll.gross_salary)
        .bind(payroll.net_salary)
        .bind(payroll.inss_discount)
        .bind(payroll.irrf_discount)
        .bind(payroll.fgts_amount)
        .bind(payroll.health_insurance)
        .bind(payroll.dental_insurance)
        .bind(payroll.custom_discount)
        .bind(payroll.custom_discount_description.clone())
        .bind(payroll.other_discounts)
        .bind(Utc::now())
        .bind(payroll.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&sql(r#"
            DELETE FROM
                payrolls
            WHERE
                id = ?
        "#))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes every payroll of a period, returning the affected employee
    /// names for audit display. Runs in one transaction so the count and the
    /// names always agree.
    pub async fn delete_period(&self, month: i32, year: i32) -> Result<Vec<String>> {
        let mut tx = self.pool.begin().await?;

        let names: Vec<(String,)> = sqlx::query_as(&sql(r#"
            SELECT
                e.name
            FROM
                payrolls p
                JOIN employees e ON e.id = p.employee_id
            WHERE
                p.month = ?
                AND p.year = ?
            ORDER BY
                e.name
        "#))
        .bind(month)
        .bind(year)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query(&sql(r#"
            DELETE FROM
                payrolls
            WHERE
                month = ?
                AND year = ?
        "#))
        .bind(month)
        .bind(year)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(names.into_iter().map(|(name,)| name).collect())
    }
}
