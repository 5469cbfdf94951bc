use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::services::taxes::{self, TaxBreakdown, round2};

/// Rich payroll calculation input. Every numeric field defaults to zero when
/// absent so a partial form never fails deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayrollCalculationInput {
    pub base_salary: f64,
    pub overtime_hours: f64,
    pub overtime_rate: f64,
    pub bonuses: f64,
    pub food_allowance: f64,
    pub transport_allowance: f64,
    pub other_benefits: f64,
    pub inss_discount: f64,
    pub irrf_discount: f64,
    pub health_insurance: f64,
    pub other_discounts: f64,
    pub dependents: i32,
    pub auto_calculate_taxes: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownItem {
    pub label: String,
    pub amount: f64,
}

/// Display grouping of the calculation, consumed by reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollBreakdown {
    pub benefits: Vec<BreakdownItem>,
    pub discounts: Vec<BreakdownItem>,
    pub total_benefits: f64,
    pub total_discounts: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollCalculation {
    pub gross_salary: f64,
    pub inss_discount: f64,
    pub irrf_discount: f64,
    pub fgts_amount: f64,
    pub health_insurance: f64,
    pub other_discounts: f64,
    pub total_discounts: f64,
    pub net_salary: f64,
    pub breakdown: PayrollBreakdown,
    /// Present only when auto tax calculation was requested.
    pub tax_info: Option<TaxBreakdown>,
}

/// Validates the calculation input, collecting every violation instead of
/// failing on the first so a form can highlight all fields in one round trip.
pub fn validate_payroll(input: &PayrollCalculationInput) -> Vec<String> {
    let mut errors = Vec::new();

    if input.base_salary <= 0.0 {
        errors.push("Base salary must be greater than zero".to_string());
    }

    let non_negative = [
        (input.overtime_hours, "Overtime hours"),
        (input.overtime_rate, "Overtime rate"),
        (input.bonuses, "Bonuses"),
        (input.food_allowance, "Food allowance"),
        (input.transport_allowance, "Transport allowance"),
        (input.other_benefits, "Other benefits"),
        (input.inss_discount, "INSS discount"),
        (input.irrf_discount, "IRRF discount"),
        (input.health_insurance, "Health insurance"),
        (input.other_discounts, "Other discounts"),
    ];
    for (value, field) in non_negative {
        if value < 0.0 {
            errors.push(format!("{} cannot be negative", field));
        }
    }

    if input.dependents < 0 {
        errors.push("Dependents cannot be negative".to_string());
    }

    errors
}

/// Month must be 1-12; year within [2020, current year + 10].
pub fn validate_period(month: i32, year: i32) -> Vec<String> {
    let mut errors = Vec::new();
    if !(1..=12).contains(&month) {
        errors.push(format!("Month must be between 1 and 12, got {}", month));
    }
    let max_year = Utc::now().year() + 10;
    if !(2020..=max_year).contains(&year) {
        errors.push(format!(
            "Year must be between 2020 and {}, got {}",
            max_year, year
        ));
    }
    errors
}

/// Rich calculation path: folds overtime, bonuses and allowances into gross
/// salary, then withholds either the submitted INSS/IRRF figures or, when
/// requested, the estimator's output. FGTS is always computed here, never
/// user-supplied. Callers are expected to run [`validate_payroll`] first.
pub fn calculate_payroll(input: &PayrollCalculationInput) -> PayrollCalculation {
    let overtime = input.overtime_hours * input.overtime_rate;
    let gross_salary = input.base_salary
        + overtime
        + input.bonuses
        + input.food_allowance
        + input.transport_allowance
        + input.other_benefits;

    let (inss_discount, irrf_discount, tax_info) = if input.auto_calculate_taxes {
        let taxes = taxes::auto_calculate_taxes(gross_salary, input.dependents);
        (taxes.inss_discount, taxes.irrf_discount, Some(taxes))
    } else {
        (
            round2(input.inss_discount),
            round2(input.irrf_discount),
            None,
        )
    };

    let fgts_amount = round2(taxes::calculate_fgts(gross_salary).amount);
    let health_insurance = round2(input.health_insurance);
    let other_discounts = round2(input.other_discounts);

    let total_discounts =
        round2(inss_discount + irrf_discount + health_insurance + other_discounts);
    let gross_salary = round2(gross_salary);
    let net_salary = round2(gross_salary - total_discounts);

    let mut benefits = vec![BreakdownItem {
        label: "Salário base".to_string(),
        amount: round2(input.base_salary),
    }];
    let optional_benefits = [
        (overtime, "Horas extras"),
        (input.bonuses, "Bonificações"),
        (input.food_allowance, "Vale alimentação"),
        (input.transport_allowance, "Vale transporte"),
        (input.other_benefits, "Outros benefícios"),
    ];
    for (amount, label) in optional_benefits {
        if amount > 0.0 {
            benefits.push(BreakdownItem {
                label: label.to_string(),
                amount: round2(amount),
            });
        }
    }

    let mut discounts = Vec::new();
    let discount_items = [
        (inss_discount, "INSS"),
        (irrf_discount, "IRRF"),
        (health_insurance, "Plano de saúde"),
        (other_discounts, "Outros descontos"),
    ];
    for (amount, label) in discount_items {
        if amount > 0.0 {
            discounts.push(BreakdownItem {
                label: label.to_string(),
                amount,
            });
        }
    }

    PayrollCalculation {
        gross_salary,
        inss_discount,
        irrf_discount,
        fgts_amount,
        health_insurance,
        other_discounts,
        total_discounts,
        net_salary,
        breakdown: PayrollBreakdown {
            benefits,
            discounts,
            total_benefits: gross_salary,
            total_discounts,
        },
        tax_info,
    }
}

/// Manual/simple path used by direct payroll edits: gross is the base salary
/// and net is gross minus the itemized discount buckets.
pub fn derive_totals(
    base_salary: f64,
    inss_discount: f64,
    irrf_discount: f64,
    health_insurance: f64,
    dental_insurance: f64,
    custom_discount: f64,
    other_discounts: f64,
) -> (f64, f64) {
    let gross_salary = round2(base_salary);
    let net_salary = round2(
        gross_salary
            - (inss_discount
                + irrf_discount
                + health_insurance
                + dental_insurance
                + custom_discount
                + other_discounts),
    );
    (gross_salary, net_salary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base_input() -> PayrollCalculationInput {
        PayrollCalculationInput {
            base_salary: 3000.0,
            ..Default::default()
        }
    }

    #[test]
    fn validation_collects_every_violation() {
        let input = PayrollCalculationInput {
            base_salary: -10.0,
            overtime_hours: -5.0,
            ..Default::default()
        };
        let errors = validate_payroll(&input);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("Base salary")));
        assert!(errors.iter().any(|e| e.contains("Overtime hours")));
    }

    #[test]
    fn validation_passes_on_plain_input() {
        assert!(validate_payroll(&base_input()).is_empty());
    }

    #[test]
    fn validation_rejects_negative_dependents() {
        let mut input = base_input();
        input.dependents = -1;
        assert_eq!(validate_payroll(&input).len(), 1);
    }

    #[test]
    fn period_validation() {
        assert!(validate_period(1, 2025).is_empty());
        assert!(validate_period(12, 2020).is_empty());
        assert_eq!(validate_period(0, 2025).len(), 1);
        assert_eq!(validate_period(13, 2025).len(), 1);
        assert_eq!(validate_period(6, 2019).len(), 1);
        assert_eq!(validate_period(0, 1999).len(), 2);
    }

    #[test]
    fn gross_accumulates_all_benefit_components() {
        let input = PayrollCalculationInput {
            base_salary: 2000.0,
            overtime_hours: 10.0,
            overtime_rate: 20.0,
            bonuses: 100.0,
            food_allowance: 300.0,
            transport_allowance: 150.0,
            other_benefits: 50.0,
            ..Default::default()
        };
        let result = calculate_payroll(&input);
        assert_eq!(result.gross_salary, 2800.0);
        assert_eq!(result.net_salary, 2800.0);
    }

    #[test]
    fn manual_discounts_are_subtracted() {
        let input = PayrollCalculationInput {
            base_salary: 3000.0,
            inss_discount: 250.0,
            irrf_discount: 100.0,
            health_insurance: 150.0,
            other_discounts: 50.0,
            ..Default::default()
        };
        let result = calculate_payroll(&input);
        assert_eq!(result.total_discounts, 550.0);
        assert_eq!(result.net_salary, 2450.0);
        assert!(result.tax_info.is_none());
    }

    #[test]
    fn auto_taxes_replace_submitted_figures() {
        let input = PayrollCalculationInput {
            base_salary: 3000.0,
            inss_discount: 999.0,
            irrf_discount: 999.0,
            auto_calculate_taxes: true,
            ..Default::default()
        };
        let result = calculate_payroll(&input);
        let expected = crate::services::taxes::auto_calculate_taxes(3000.0, 0);
        assert_eq!(result.inss_discount, expected.inss_discount);
        assert_eq!(result.irrf_discount, expected.irrf_discount);
        assert_eq!(result.tax_info, Some(expected));
    }

    #[test]
    fn fgts_is_never_user_supplied() {
        let result = calculate_payroll(&base_input());
        assert_eq!(result.fgts_amount, round2(3000.0 * 0.08));
        // FGTS does not reduce net pay.
        assert_eq!(result.net_salary, 3000.0);
    }

    #[test]
    fn net_salary_identity_holds() {
        let input = PayrollCalculationInput {
            base_salary: 4321.09,
            overtime_hours: 7.5,
            overtime_rate: 31.37,
            bonuses: 123.45,
            health_insurance: 210.99,
            other_discounts: 87.65,
            auto_calculate_taxes: true,
            dependents: 2,
            ..Default::default()
        };
        let result = calculate_payroll(&input);
        let expected_net = round2(result.gross_salary - result.total_discounts);
        assert_eq!(result.net_salary, expected_net);
    }

    #[test]
    fn breakdown_skips_zero_components() {
        let result = calculate_payroll(&base_input());
        assert_eq!(result.breakdown.benefits.len(), 1);
        assert!(result.breakdown.discounts.is_empty());
        assert_eq!(result.breakdown.total_benefits, result.gross_salary);
    }

    #[test]
    fn derive_totals_simple_path() {
        let (gross, net) = derive_totals(3000.0, 250.0, 100.0, 150.0, 80.0, 120.0, 50.0);
        assert_eq!(gross, 3000.0);
        assert_eq!(net, 2250.0);
    }
}
