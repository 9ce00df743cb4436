use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{CURRENCY_SYMBOL, DISPLAY_DECIMAL_PRECISION};
use crate::transactions::TransactionType;

/// Renders an amount with two decimals and a comma separator, e.g. `1234,50`.
pub fn format_amount(value: Decimal) -> String {
    let rounded =
        value.round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded).replace('.', ",")
}

/// Renders an amount prefixed with the currency symbol, e.g. `R$ 1234,50`.
pub fn format_currency(value: Decimal) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_amount(value))
}

/// Renders a transaction amount with its direction, e.g. `- R$ 200,00`.
pub fn format_signed_currency(amount: Decimal, transaction_type: TransactionType) -> String {
    let sign = match transaction_type {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };
    format!("{} {}", sign, format_currency(amount.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::normalize_amount;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount_uses_comma() {
        assert_eq!(format_amount(dec!(1234.5)), "1234,50");
        assert_eq!(format_amount(dec!(0)), "0,00");
        assert_eq!(format_amount(dec!(-750)), "-750,00");
        assert_eq!(format_amount(dec!(10.005)), "10,01");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(750)), "R$ 750,00");
    }

    #[test]
    fn test_signed_currency_by_type() {
        assert_eq!(
            format_signed_currency(dec!(1000), TransactionType::Income),
            "+ R$ 1000,00"
        );
        assert_eq!(
            format_signed_currency(dec!(200), TransactionType::Expense),
            "- R$ 200,00"
        );
    }

    #[test]
    fn test_display_output_normalizes_back_to_same_value() {
        let value = dec!(1999.9);
        let shown = format_amount(value);
        assert_eq!(shown, "1999,90");
        assert_eq!(normalize_amount(&shown, "Amount").unwrap(), value);
    }
}
