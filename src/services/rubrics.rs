use chrono::{Datelike, NaiveDate};

use crate::database::models::{EmployeeRubricDetail, RubricKind};

/// Discount bucket a rubric contribution is itemized under on the payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountBucket {
    HealthInsurance,
    DentalInsurance,
    /// Loan-like discount; the matched display name is captured as the
    /// payroll's custom discount description.
    Custom,
    Other,
}

/// Ordered keyword table for discount sub-bucket inference. Matching is
/// case-insensitive containment on the effective display name.
const DISCOUNT_BUCKET_KEYWORDS: &[(&[&str], DiscountBucket)] = &[
    (&["saúde"], DiscountBucket::HealthInsurance),
    (&["odontológico", "dental"], DiscountBucket::DentalInsurance),
    (&["empréstimo", "consignado"], DiscountBucket::Custom),
];

#[derive(Debug, Clone, PartialEq)]
pub enum RubricContribution {
    /// Adds to gross salary.
    Benefit { amount: f64 },
    /// Withheld from net salary, itemized under `bucket`.
    Discount {
        amount: f64,
        bucket: DiscountBucket,
        description: String,
    },
}

fn infer_discount_bucket(display_name: &str) -> DiscountBucket {
    let name = display_name.to_lowercase();
    for (keywords, bucket) in DISCOUNT_BUCKET_KEYWORDS {
        if keywords.iter().any(|keyword| name.contains(keyword)) {
            return *bucket;
        }
    }
    DiscountBucket::Other
}

/// Validity windows are compared at month/year granularity only.
fn period_within_window(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    month: i32,
    year: i32,
) -> bool {
    if let Some(start) = start_date {
        if (start.year(), start.month() as i32) > (year, month) {
            return false;
        }
    }
    if let Some(end) = end_date {
        if (end.year(), end.month() as i32) < (year, month) {
            return false;
        }
    }
    true
}

/// Evaluates one rubric assignment against a target period.
///
/// Returns `None` when the assignment is inactive, outside its validity
/// window, or resolves to a non-positive amount (excluded from totals).
/// The fixed `custom_value` wins when present; otherwise the amount is
/// `base_salary * custom_percentage`, with the percentage stored as a
/// fraction (0.08 = 8%).
pub fn evaluate_rubric(
    assignment: &EmployeeRubricDetail,
    base_salary: f64,
    month: i32,
    year: i32,
) -> Option<RubricContribution> {
    if !assignment.is_active {
        return None;
    }

    if !period_within_window(assignment.start_date, assignment.end_date, month, year) {
        return None;
    }

    let amount = match (assignment.custom_value, assignment.custom_percentage) {
        (Some(value), _) => value,
        (None, Some(percentage)) => base_salary * percentage,
        (None, None) => 0.0,
    };

    if amount <= 0.0 {
        return None;
    }

    match assignment.rubric_kind {
        RubricKind::Benefit => Some(RubricContribution::Benefit { amount }),
        RubricKind::Discount => {
            let display_name = assignment.display_name();
            Some(RubricContribution::Discount {
                amount,
                bucket: infer_discount_bucket(display_name),
                description: display_name.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn assignment(kind: RubricKind, name: &str) -> EmployeeRubricDetail {
        EmployeeRubricDetail {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            rubric_id: Uuid::new_v4(),
            custom_value: None,
            custom_percentage: None,
            custom_name: None,
            start_date: None,
            end_date: None,
            is_active: true,
            rubric_name: name.to_string(),
            rubric_kind: kind,
            rubric_code: None,
        }
    }

    #[test]
    fn fixed_value_ignores_base_salary() {
        let mut a = assignment(RubricKind::Benefit, "Bônus");
        a.custom_value = Some(100.0);
        for base in [0.0, 1000.0, 50_000.0] {
            match evaluate_rubric(&a, base, 1, 2025) {
                Some(RubricContribution::Benefit { amount }) => assert_eq!(amount, 100.0),
                other => panic!("expected benefit, got {:?}", other),
            }
        }
    }

    #[test]
    fn percentage_is_a_fraction_of_base() {
        let mut a = assignment(RubricKind::Discount, "Plano de Saúde");
        a.custom_percentage = Some(0.1);
        match evaluate_rubric(&a, 5000.0, 1, 2025) {
            Some(RubricContribution::Discount { amount, bucket, .. }) => {
                assert_eq!(amount, 500.0);
                assert_eq!(bucket, DiscountBucket::HealthInsurance);
            }
            other => panic!("expected discount, got {:?}", other),
        }
    }

    #[test]
    fn fixed_value_wins_over_percentage() {
        let mut a = assignment(RubricKind::Benefit, "Auxílio");
        a.custom_value = Some(250.0);
        a.custom_percentage = Some(0.5);
        match evaluate_rubric(&a, 10_000.0, 1, 2025) {
            Some(RubricContribution::Benefit { amount }) => assert_eq!(amount, 250.0),
            other => panic!("expected benefit, got {:?}", other),
        }
    }

    #[test]
    fn inactive_assignment_is_skipped() {
        let mut a = assignment(RubricKind::Benefit, "Bônus");
        a.custom_value = Some(100.0);
        a.is_active = false;
        assert_eq!(evaluate_rubric(&a, 1000.0, 1, 2025), None);
    }

    #[test]
    fn zero_or_negative_amount_is_excluded() {
        let mut a = assignment(RubricKind::Discount, "Mensalidade");
        a.custom_value = Some(0.0);
        assert_eq!(evaluate_rubric(&a, 1000.0, 1, 2025), None);
        a.custom_value = Some(-10.0);
        assert_eq!(evaluate_rubric(&a, 1000.0, 1, 2025), None);
        a.custom_value = None;
        assert_eq!(evaluate_rubric(&a, 1000.0, 1, 2025), None);
    }

    #[test]
    fn end_date_month_granularity() {
        let mut a = assignment(RubricKind::Discount, "Desconto");
        a.custom_value = Some(50.0);
        // Window closes mid-March; the whole of March still counts.
        a.end_date = NaiveDate::from_ymd_opt(2025, 3, 15);
        assert!(evaluate_rubric(&a, 1000.0, 3, 2025).is_some());
        assert!(evaluate_rubric(&a, 1000.0, 2, 2025).is_some());
        assert_eq!(evaluate_rubric(&a, 1000.0, 4, 2025), None);
        assert_eq!(evaluate_rubric(&a, 1000.0, 1, 2026), None);
    }

    #[test]
    fn start_date_month_granularity() {
        let mut a = assignment(RubricKind::Discount, "Desconto");
        a.custom_value = Some(50.0);
        a.start_date = NaiveDate::from_ymd_opt(2025, 6, 20);
        assert_eq!(evaluate_rubric(&a, 1000.0, 5, 2025), None);
        assert!(evaluate_rubric(&a, 1000.0, 6, 2025).is_some());
        assert!(evaluate_rubric(&a, 1000.0, 7, 2025).is_some());
        assert_eq!(evaluate_rubric(&a, 1000.0, 12, 2024), None);
    }

    #[test]
    fn open_ended_window_always_applies() {
        let mut a = assignment(RubricKind::Benefit, "Auxílio");
        a.custom_value = Some(10.0);
        assert!(evaluate_rubric(&a, 1000.0, 1, 2020).is_some());
        assert!(evaluate_rubric(&a, 1000.0, 12, 2099).is_some());
    }

    #[test]
    fn discount_bucket_inference() {
        let cases = [
            ("Plano de Saúde", DiscountBucket::HealthInsurance),
            ("Plano Odontológico", DiscountBucket::DentalInsurance),
            ("Seguro Dental Plus", DiscountBucket::DentalInsurance),
            ("Empréstimo Consignado", DiscountBucket::Custom),
            ("Desconto Consignado", DiscountBucket::Custom),
            ("Mensalidade Sindical", DiscountBucket::Other),
        ];
        for (name, expected) in cases {
            let mut a = assignment(RubricKind::Discount, name);
            a.custom_value = Some(100.0);
            match evaluate_rubric(&a, 1000.0, 1, 2025) {
                Some(RubricContribution::Discount {
                    bucket,
                    description,
                    ..
                }) => {
                    assert_eq!(bucket, expected, "name {:?}", name);
                    assert_eq!(description, name);
                }
                other => panic!("expected discount, got {:?}", other),
            }
        }
    }

    #[test]
    fn custom_name_overrides_template_for_classification() {
        let mut a = assignment(RubricKind::Discount, "Desconto Genérico");
        a.custom_value = Some(100.0);
        a.custom_name = Some("Empréstimo Banco X".to_string());
        match evaluate_rubric(&a, 1000.0, 1, 2025) {
            Some(RubricContribution::Discount {
                bucket,
                description,
                ..
            }) => {
                assert_eq!(bucket, DiscountBucket::Custom);
                assert_eq!(description, "Empréstimo Banco X");
            }
            other => panic!("expected discount, got {:?}", other),
        }
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let mut a = assignment(RubricKind::Discount, "PLANO DE SAÚDE");
        a.custom_value = Some(100.0);
        match evaluate_rubric(&a, 1000.0, 1, 2025) {
            Some(RubricContribution::Discount { bucket, .. }) => {
                assert_eq!(bucket, DiscountBucket::HealthInsurance)
            }
            other => panic!("expected discount, got {:?}", other),
        }
    }
}
