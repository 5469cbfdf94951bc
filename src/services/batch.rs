use crate::database::models::{Employee, EmployeeRubricDetail, NewPayroll, ReceiptDetail};
use crate::services::receipts::{ReceiptClass, classify_receipt};
use crate::services::rubrics::{DiscountBucket, RubricContribution, evaluate_rubric};
use crate::services::taxes::round2;

/// Folds one employee's base salary, rubric assignments and period receipts
/// into the payroll row to insert.
///
/// Gross starts at the base salary; benefit rubrics and benefit-classified
/// receipts add to it, discount rubrics and loan-like receipts accumulate
/// into itemized buckets. Net is gross minus every discount bucket. INSS,
/// IRRF and FGTS are deliberately persisted as zero on this path: batch
/// generation covers rubrics and receipts only, tax withholding is a manual
/// follow-up edit.
pub fn build_payroll(
    employee: &Employee,
    assignments: &[EmployeeRubricDetail],
    receipts: &[ReceiptDetail],
    month: i32,
    year: i32,
) -> NewPayroll {
    let base_salary = employee.salary;
    let mut gross_salary = base_salary;
    let mut health_insurance = 0.0;
    let mut dental_insurance = 0.0;
    let mut custom_discount = 0.0;
    let mut custom_discount_description: Option<String> = None;
    let mut other_discounts = 0.0;
    let mut receipt_benefits = 0.0;
    let mut receipt_discounts = 0.0;

    for assignment in assignments {
        match evaluate_rubric(assignment, base_salary, month, year) {
            Some(RubricContribution::Benefit { amount }) => gross_salary += amount,
            Some(RubricContribution::Discount {
                amount,
                bucket,
                description,
            }) => match bucket {
                DiscountBucket::HealthInsurance => health_insurance += amount,
                DiscountBucket::DentalInsurance => dental_insurance += amount,
                DiscountBucket::Custom => {
                    custom_discount += amount;
                    custom_discount_description = Some(description);
                }
                DiscountBucket::Other => other_discounts += amount,
            },
            None => {}
        }
    }

    for receipt in receipts {
        match classify_receipt(receipt, month, year) {
            Some((value, ReceiptClass::Benefit)) => {
                gross_salary += value;
                receipt_benefits += value;
            }
            Some((value, ReceiptClass::Discount)) => {
                other_discounts += value;
                receipt_discounts += value;
            }
            None => {}
        }
    }

    let gross_salary = round2(gross_salary);
    let health_insurance = round2(health_insurance);
    let dental_insurance = round2(dental_insurance);
    let custom_discount = round2(custom_discount);
    let other_discounts = round2(other_discounts);
    let total_discounts =
        health_insurance + dental_insurance + custom_discount + other_discounts;
    let net_salary = round2(gross_salary - total_discounts);

    NewPayroll {
        employee_id: employee.id,
        month,
        year,
        base_salary: round2(base_salary),
        gross_salary,
        net_salary,
        inss_discount: 0.0,
        irrf_discount: 0.0,
        fgts_amount: 0.0,
        health_insurance,
        dental_insurance,
        custom_discount,
        custom_discount_description,
        other_discounts,
        receipt_benefits: round2(receipt_benefits),
        receipt_discounts: round2(receipt_discounts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::RubricKind;
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn employee(salary: f64) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: "Maria Silva".to_string(),
            registration: "0001".to_string(),
            position: None,
            salary,
            dependents: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assignment(
        employee_id: Uuid,
        kind: RubricKind,
        name: &str,
        value: Option<f64>,
        percentage: Option<f64>,
    ) -> EmployeeRubricDetail {
        EmployeeRubricDetail {
            id: Uuid::new_v4(),
            employee_id,
            rubric_id: Uuid::new_v4(),
            custom_value: value,
            custom_percentage: percentage,
            custom_name: None,
            start_date: None,
            end_date: None,
            is_active: true,
            rubric_name: name.to_string(),
            rubric_kind: kind,
            rubric_code: None,
        }
    }

    fn receipt(employee_id: Uuid, type_name: &str, month: i32, year: i32, value: f64) -> ReceiptDetail {
        ReceiptDetail {
            id: Uuid::new_v4(),
            employee_id,
            receipt_type_id: Uuid::new_v4(),
            month,
            year,
            daily_value: value,
            days: 1,
            value,
            type_name: type_name.to_string(),
            employee_name: "Maria Silva".to_string(),
        }
    }

    #[test]
    fn bare_employee_gets_base_salary_only() {
        let emp = employee(2500.0);
        let payroll = build_payroll(&emp, &[], &[], 1, 2025);
        assert_eq!(payroll.base_salary, 2500.0);
        assert_eq!(payroll.gross_salary, 2500.0);
        assert_eq!(payroll.net_salary, 2500.0);
        assert_eq!(payroll.inss_discount, 0.0);
        assert_eq!(payroll.irrf_discount, 0.0);
        assert_eq!(payroll.fgts_amount, 0.0);
    }

    #[test]
    fn rubrics_and_receipts_fold_into_buckets() {
        let emp = employee(3000.0);
        let assignments = vec![
            assignment(emp.id, RubricKind::Benefit, "Anuênio", Some(150.0), None),
            assignment(
                emp.id,
                RubricKind::Discount,
                "Plano de Saúde",
                None,
                Some(0.05),
            ),
            assignment(
                emp.id,
                RubricKind::Discount,
                "Plano Odontológico",
                Some(40.0),
                None,
            ),
            assignment(
                emp.id,
                RubricKind::Discount,
                "Empréstimo Consignado",
                Some(200.0),
                None,
            ),
            assignment(
                emp.id,
                RubricKind::Discount,
                "Mensalidade Sindical",
                Some(30.0),
                None,
            ),
        ];
        let receipts = vec![
            receipt(emp.id, "Vale Transporte", 1, 2025, 220.0),
            receipt(emp.id, "Desconto Diverso", 1, 2025, 60.0),
        ];

        let payroll = build_payroll(&emp, &assignments, &receipts, 1, 2025);

        // gross = 3000 + 150 (benefit rubric) + 220 (benefit receipt)
        assert_eq!(payroll.gross_salary, 3370.0);
        assert_eq!(payroll.health_insurance, 150.0); // 5% of 3000
        assert_eq!(payroll.dental_insurance, 40.0);
        assert_eq!(payroll.custom_discount, 200.0);
        assert_eq!(
            payroll.custom_discount_description.as_deref(),
            Some("Empréstimo Consignado")
        );
        assert_eq!(payroll.other_discounts, 90.0); // 30 rubric + 60 receipt
        assert_eq!(payroll.receipt_benefits, 220.0);
        assert_eq!(payroll.receipt_discounts, 60.0);
        assert_eq!(payroll.net_salary, 3370.0 - (150.0 + 40.0 + 200.0 + 90.0));
    }

    #[test]
    fn net_salary_identity() {
        let emp = employee(4321.09);
        let assignments = vec![
            assignment(emp.id, RubricKind::Discount, "Plano de Saúde", None, Some(0.08)),
            assignment(emp.id, RubricKind::Benefit, "Gratificação", Some(333.33), None),
        ];
        let receipts = vec![receipt(emp.id, "Ressarcimento Combustível", 7, 2025, 189.9)];
        let payroll = build_payroll(&emp, &assignments, &receipts, 7, 2025);

        let identity = round2(
            payroll.gross_salary
                - (payroll.inss_discount
                    + payroll.irrf_discount
                    + payroll.health_insurance
                    + payroll.dental_insurance
                    + payroll.custom_discount
                    + payroll.other_discounts),
        );
        assert_eq!(payroll.net_salary, identity);
    }

    #[test]
    fn receipts_from_other_periods_are_ignored() {
        let emp = employee(2000.0);
        let receipts = vec![
            receipt(emp.id, "Vale Transporte", 5, 2024, 100.0),
            receipt(emp.id, "Vale Transporte", 6, 2024, 120.0),
        ];
        let payroll = build_payroll(&emp, &[], &receipts, 6, 2024);
        assert_eq!(payroll.gross_salary, 2120.0);
        assert_eq!(payroll.receipt_benefits, 120.0);
    }

    #[test]
    fn expired_rubric_window_is_excluded() {
        let emp = employee(2000.0);
        let mut ended = assignment(emp.id, RubricKind::Discount, "Plano de Saúde", Some(100.0), None);
        ended.end_date = NaiveDate::from_ymd_opt(2024, 3, 31);
        let assignments = vec![ended];

        let in_window = build_payroll(&emp, &assignments, &[], 3, 2024);
        assert_eq!(in_window.health_insurance, 100.0);

        let after_window = build_payroll(&emp, &assignments, &[], 4, 2024);
        assert_eq!(after_window.health_insurance, 0.0);
        assert_eq!(after_window.net_salary, 2000.0);
    }

    #[test]
    fn last_custom_discount_description_wins() {
        let emp = employee(2000.0);
        let assignments = vec![
            assignment(emp.id, RubricKind::Discount, "Empréstimo Banco A", Some(50.0), None),
            assignment(emp.id, RubricKind::Discount, "Consignado Banco B", Some(70.0), None),
        ];
        let payroll = build_payroll(&emp, &assignments, &[], 1, 2025);
        assert_eq!(payroll.custom_discount, 120.0);
        assert_eq!(
            payroll.custom_discount_description.as_deref(),
            Some("Consignado Banco B")
        );
    }
}
