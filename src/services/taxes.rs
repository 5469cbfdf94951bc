use serde::{Deserialize, Serialize};

/// INSS progressive withholding table. Each bracket taxes only the slice of
/// salary between the previous ceiling and its own.
struct InssBracket {
    ceiling: f64,
    rate: f64,
}

const INSS_BRACKETS: [InssBracket; 4] = [
    InssBracket {
        ceiling: 1518.00,
        rate: 0.075,
    },
    InssBracket {
        ceiling: 2793.88,
        rate: 0.09,
    },
    InssBracket {
        ceiling: 4190.83,
        rate: 0.12,
    },
    InssBracket {
        ceiling: 8157.41,
        rate: 0.14,
    },
];

/// Withholding for salaries at or above the top INSS ceiling.
pub const INSS_MAX_DISCOUNT: f64 = 951.63;

/// IRRF single-bracket table: the bracket containing the taxable base
/// determines the rate and the fixed deduction subtracted from the result.
struct IrrfBracket {
    min: f64,
    max: f64,
    rate: f64,
    deduction: f64,
}

const IRRF_BRACKETS: [IrrfBracket; 5] = [
    IrrfBracket {
        min: 0.0,
        max: 2112.00,
        rate: 0.0,
        deduction: 0.0,
    },
    IrrfBracket {
        min: 2112.01,
        max: 2826.65,
        rate: 0.075,
        deduction: 158.40,
    },
    IrrfBracket {
        min: 2826.66,
        max: 3751.05,
        rate: 0.15,
        deduction: 370.40,
    },
    IrrfBracket {
        min: 3751.06,
        max: 4664.68,
        rate: 0.225,
        deduction: 651.73,
    },
    IrrfBracket {
        min: 4664.69,
        max: f64::MAX,
        rate: 0.275,
        deduction: 884.96,
    },
];

pub const IRRF_DEPENDENT_DEDUCTION: f64 = 189.59;

pub const FGTS_RATE: f64 = 0.08;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InssResult {
    /// Marginal rate of the last bracket reached, reported for display only.
    pub rate: f64,
    pub discount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IrrfResult {
    pub rate: f64,
    pub discount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FgtsResult {
    pub rate: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub inss_rate: f64,
    pub inss_discount: f64,
    pub irrf_rate: f64,
    pub irrf_discount: f64,
    pub fgts_rate: f64,
    pub fgts_amount: f64,
}

/// Progressive INSS withholding: sums the taxed slice of each bracket, capped
/// at [`INSS_MAX_DISCOUNT`].
pub fn calculate_inss(gross_salary: f64) -> InssResult {
    if gross_salary <= 0.0 {
        return InssResult {
            rate: 0.0,
            discount: 0.0,
        };
    }

    let mut discount = 0.0;
    let mut marginal_rate = 0.0;
    let mut floor = 0.0;

    for bracket in &INSS_BRACKETS {
        if gross_salary > floor {
            let slice = gross_salary.min(bracket.ceiling) - floor;
            discount += slice * bracket.rate;
            marginal_rate = bracket.rate;
        }
        floor = bracket.ceiling;
    }

    InssResult {
        rate: marginal_rate,
        discount: round2(discount.min(INSS_MAX_DISCOUNT)),
    }
}

/// IRRF withholding over the taxable base (gross minus INSS minus the
/// per-dependent deduction). The result never goes negative.
pub fn calculate_irrf(gross_salary: f64, inss_discount: f64, dependents: i32) -> IrrfResult {
    let taxable =
        gross_salary - inss_discount - dependents.max(0) as f64 * IRRF_DEPENDENT_DEDUCTION;

    for bracket in &IRRF_BRACKETS {
        if taxable >= bracket.min && taxable <= bracket.max {
            let discount = (taxable * bracket.rate - bracket.deduction).max(0.0);
            return IrrfResult {
                rate: bracket.rate,
                discount: round2(discount),
            };
        }
    }

    // Negative taxable base falls through every bracket.
    IrrfResult {
        rate: 0.0,
        discount: 0.0,
    }
}

/// FGTS employer contribution: flat 8%, no cap, not deducted from net pay.
pub fn calculate_fgts(gross_salary: f64) -> FgtsResult {
    FgtsResult {
        rate: FGTS_RATE,
        amount: gross_salary.max(0.0) * FGTS_RATE,
    }
}

/// Composes INSS, IRRF and FGTS. INSS runs first because its discount feeds
/// the IRRF taxable base.
pub fn auto_calculate_taxes(gross_salary: f64, dependents: i32) -> TaxBreakdown {
    let inss = calculate_inss(gross_salary);
    let irrf = calculate_irrf(gross_salary, inss.discount, dependents);
    let fgts = calculate_fgts(gross_salary);

    TaxBreakdown {
        inss_rate: inss.rate,
        inss_discount: inss.discount,
        irrf_rate: irrf.rate,
        irrf_discount: irrf.discount,
        fgts_rate: fgts.rate,
        fgts_amount: round2(fgts.amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inss_is_zero_for_non_positive_gross() {
        assert_eq!(calculate_inss(0.0).discount, 0.0);
        assert_eq!(calculate_inss(-500.0).discount, 0.0);
        assert_eq!(calculate_inss(-500.0).rate, 0.0);
    }

    #[test]
    fn inss_first_bracket_is_flat_rate() {
        let result = calculate_inss(1518.00);
        assert_eq!(result.discount, round2(1518.00 * 0.075));
        assert_eq!(result.rate, 0.075);
    }

    #[test]
    fn inss_is_monotonic_and_capped() {
        let mut previous = 0.0;
        let mut gross = 0.0;
        while gross <= 20_000.0 {
            let discount = calculate_inss(gross).discount;
            assert!(
                discount >= previous,
                "INSS decreased at gross {}: {} < {}",
                gross,
                discount,
                previous
            );
            assert!(discount <= INSS_MAX_DISCOUNT);
            previous = discount;
            gross += 50.0;
        }
    }

    #[test]
    fn inss_hits_cap_above_top_ceiling() {
        assert_eq!(calculate_inss(8157.41).discount, INSS_MAX_DISCOUNT);
        assert_eq!(calculate_inss(50_000.0).discount, INSS_MAX_DISCOUNT);
        assert_eq!(calculate_inss(50_000.0).rate, 0.14);
    }

    #[test]
    fn inss_sums_bracket_slices() {
        // 3000.00: full first two brackets plus a slice of the third.
        let expected = 1518.00 * 0.075 + (2793.88 - 1518.00) * 0.09 + (3000.00 - 2793.88) * 0.12;
        let result = calculate_inss(3000.00);
        assert_eq!(result.discount, round2(expected));
        assert_eq!(result.rate, 0.12);
    }

    #[test]
    fn irrf_exempt_bracket() {
        let result = calculate_irrf(2112.00, 0.0, 0);
        assert_eq!(result.rate, 0.0);
        assert_eq!(result.discount, 0.0);
    }

    #[test]
    fn irrf_bracket_boundary_transition() {
        let below = calculate_irrf(2112.00, 0.0, 0);
        let above = calculate_irrf(2112.01, 0.0, 0);
        assert_eq!(below.rate, 0.0);
        assert_eq!(above.rate, 0.075);
        assert_eq!(
            above.discount,
            round2((2112.01_f64 * 0.075 - 158.40).max(0.0))
        );
    }

    #[test]
    fn irrf_never_negative() {
        // Right at the start of the 7.5% bracket the raw formula is already
        // near zero (2112.01 * 0.075 = 158.40075 against a 158.40 deduction),
        // so any dependents would push it below zero without the clamp.
        let result = calculate_irrf(2112.01 + IRRF_DEPENDENT_DEDUCTION, 0.0, 1);
        assert_eq!(result.discount, 0.0);
    }

    #[test]
    fn irrf_dependents_reduce_taxable_base() {
        let none = calculate_irrf(5000.0, 0.0, 0);
        let two = calculate_irrf(5000.0, 0.0, 2);
        assert!(two.discount < none.discount);
    }

    #[test]
    fn irrf_negative_taxable_base_is_exempt() {
        let result = calculate_irrf(100.0, 500.0, 0);
        assert_eq!(result.rate, 0.0);
        assert_eq!(result.discount, 0.0);
    }

    #[test]
    fn irrf_top_bracket() {
        let result = calculate_irrf(10_000.0, 0.0, 0);
        assert_eq!(result.rate, 0.275);
        assert_eq!(result.discount, round2(10_000.0 * 0.275 - 884.96));
    }

    #[test]
    fn fgts_is_linear_and_uncapped() {
        for gross in [0.0, 100.0, 1518.0, 8157.41, 100_000.0] {
            let result = calculate_fgts(gross);
            assert_eq!(result.amount, gross * 0.08);
            assert_eq!(result.rate, 0.08);
        }
    }

    #[test]
    fn auto_calculate_feeds_inss_into_irrf() {
        let gross = 5000.0;
        let taxes = auto_calculate_taxes(gross, 1);
        let inss = calculate_inss(gross);
        let irrf = calculate_irrf(gross, inss.discount, 1);
        assert_eq!(taxes.inss_discount, inss.discount);
        assert_eq!(taxes.irrf_discount, irrf.discount);
        // Computing IRRF without the INSS deduction would withhold more.
        let without_order = calculate_irrf(gross, 0.0, 1);
        assert!(taxes.irrf_discount < without_order.discount);
    }
}
