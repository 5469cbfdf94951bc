use chrono::Utc;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use folha_api::database::models::{
    Employee, EmployeeRubricDetail, ReceiptDetail, RubricKind,
};
use folha_api::services::calculator::{PayrollCalculationInput, calculate_payroll};
use folha_api::services::taxes::{calculate_fgts, calculate_inss, calculate_irrf, round2};
use folha_api::services::{build_payroll, validate_payroll};

fn employee(salary: f64) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        name: "João Pereira".to_string(),
        registration: "1042".to_string(),
        position: Some("Analista".to_string()),
        salary,
        dependents: 1,
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
        employee_name: "João Pereira".to_string(),
    }
}

#[test]
fn full_payroll_scenario_with_rubrics_and_receipts() {
    let emp = employee(5000.0);
    let assignments = vec![
        assignment(emp.id, RubricKind::Discount, "Plano de Saúde", None, Some(0.08)),
        assignment(
            emp.id,
            RubricKind::Discount,
            "Plano Odontológico",
            Some(45.5),
            None,
        ),
        assignment(emp.id, RubricKind::Benefit, "Gratificação de Função", Some(600.0), None),
    ];
    let receipts = vec![
        receipt(emp.id, "Vale Transporte", 2, 2025, 242.0),
        receipt(emp.id, "Vale Alimentação", 2, 2025, 550.0),
        receipt(emp.id, "Empréstimo Consignado", 2, 2025, 310.0),
        // Wrong period, must be ignored.
        receipt(emp.id, "Vale Transporte", 1, 2025, 242.0),
    ];

    let payroll = build_payroll(&emp, &assignments, &receipts, 2, 2025);

    assert_eq!(payroll.base_salary, 5000.0);
    // 5000 + 600 benefit rubric + 242 + 550 benefit receipts
    assert_eq!(payroll.gross_salary, 6392.0);
    assert_eq!(payroll.health_insurance, 400.0); // 8% of base
    assert_eq!(payroll.dental_insurance, 45.5);
    assert_eq!(payroll.receipt_benefits, 792.0);
    assert_eq!(payroll.receipt_discounts, 310.0);
    assert_eq!(payroll.other_discounts, 310.0);

    // Batch generation leaves tax withholding for a manual follow-up.
    assert_eq!(payroll.inss_discount, 0.0);
    assert_eq!(payroll.irrf_discount, 0.0);
    assert_eq!(payroll.fgts_amount, 0.0);

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
fn preview_calculation_with_auto_taxes_matches_estimators() {
    let input = PayrollCalculationInput {
        base_salary: 4500.0,
        overtime_hours: 12.0,
        overtime_rate: 30.68,
        bonuses: 250.0,
        dependents: 2,
        auto_calculate_taxes: true,
        ..Default::default()
    };
    assert!(validate_payroll(&input).is_empty());

    let result = calculate_payroll(&input);
    let gross = 4500.0 + 12.0 * 30.68 + 250.0;

    let inss = calculate_inss(gross);
    let irrf = calculate_irrf(gross, inss.discount, 2);
    assert_eq!(result.inss_discount, inss.discount);
    assert_eq!(result.irrf_discount, irrf.discount);
    assert_eq!(result.fgts_amount, round2(calculate_fgts(gross).amount));

    let tax_info = result.tax_info.expect("auto calculation returns tax info");
    assert_eq!(tax_info.inss_discount, inss.discount);
    assert_eq!(tax_info.irrf_discount, irrf.discount);

    assert_eq!(
        result.net_salary,
        round2(result.gross_salary - result.total_discounts)
    );
}

#[test]
fn validation_reports_all_violations_at_once() {
    let input = PayrollCalculationInput {
        base_salary: -10.0,
        overtime_hours: -5.0,
        inss_discount: -1.0,
        dependents: -2,
        ..Default::default()
    };
    let errors = validate_payroll(&input);
    assert_eq!(errors.len(), 4);
}

#[test]
fn inss_sweep_is_monotonic_under_receipt_benefits() {
    // Raising gross through benefit receipts never lowers withholding.
    let mut last = 0.0;
    for extra in [0.0, 120.0, 480.0, 950.0, 2400.0] {
        let discount = calculate_inss(3000.0 + extra).discount;
        assert!(discount >= last);
        last = discount;
    }
}
