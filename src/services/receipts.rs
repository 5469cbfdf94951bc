use crate::database::models::ReceiptDetail;

/// Receipt-type names containing any of these classify the receipt as a
/// benefit (adds to gross pay). Anything else is a loan-like deduction.
/// Matching is case-insensitive containment.
pub const BENEFIT_KEYWORDS: [&str; 12] = [
    "vale",
    "alimentação",
    "transporte",
    "refeição",
    "gratificação",
    "função",
    "ajuda",
    "custo",
    "ressarcimento",
    "combustível",
    "hotel",
    "hospedagem",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptClass {
    Benefit,
    Discount,
}

pub fn classify_receipt_type(type_name: &str) -> ReceiptClass {
    let name = type_name.to_lowercase();
    if BENEFIT_KEYWORDS
        .iter()
        .any(|keyword| name.contains(keyword))
    {
        ReceiptClass::Benefit
    } else {
        ReceiptClass::Discount
    }
}

/// Classifies a receipt for a target period. Receipts from any other period
/// are ignored outright, month AND year must match.
pub fn classify_receipt(
    receipt: &ReceiptDetail,
    month: i32,
    year: i32,
) -> Option<(f64, ReceiptClass)> {
    if receipt.month != month || receipt.year != year {
        return None;
    }
    Some((receipt.value, classify_receipt_type(&receipt.type_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn receipt(type_name: &str, month: i32, year: i32, value: f64) -> ReceiptDetail {
        ReceiptDetail {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            receipt_type_id: Uuid::new_v4(),
            month,
            year,
            daily_value: value,
            days: 1,
            value,
            type_name: type_name.to_string(),
            employee_name: "Fulano".to_string(),
        }
    }

    #[test]
    fn transport_voucher_is_a_benefit() {
        assert_eq!(
            classify_receipt_type("Vale Transporte"),
            ReceiptClass::Benefit
        );
    }

    #[test]
    fn every_benefit_keyword_matches() {
        for keyword in BENEFIT_KEYWORDS {
            assert_eq!(
                classify_receipt_type(keyword),
                ReceiptClass::Benefit,
                "keyword {:?}",
                keyword
            );
        }
    }

    #[test]
    fn loan_voucher_is_a_discount() {
        assert_eq!(
            classify_receipt_type("Empréstimo Consignado"),
            ReceiptClass::Discount
        );
        assert_eq!(classify_receipt_type("Desconto"), ReceiptClass::Discount);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            classify_receipt_type("VALE ALIMENTAÇÃO"),
            ReceiptClass::Benefit
        );
        assert_eq!(
            classify_receipt_type("Ajuda de Custo"),
            ReceiptClass::Benefit
        );
    }

    #[test]
    fn period_must_match_exactly() {
        let r = receipt("Vale Transporte", 5, 2024, 220.0);
        assert_eq!(classify_receipt(&r, 6, 2024), None);
        assert_eq!(classify_receipt(&r, 5, 2025), None);
        assert_eq!(
            classify_receipt(&r, 5, 2024),
            Some((220.0, ReceiptClass::Benefit))
        );
    }
}
