use rust_decimal::{Decimal, RoundingStrategy};

const CURRENCY_SYMBOL: &str = "$";
const GROUPING_SEPARATOR: char = ',';

/// Signed dollar rendering used across the dashboard: `+ $ 1,234.50`,
/// `- $ 50.00`, and ` $ 0.00` for zero.
pub fn currency_format(amount: Decimal) -> String {
    let sign = if amount > Decimal::ZERO {
        "+"
    } else if amount < Decimal::ZERO {
        "-"
    } else {
        ""
    };
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let body = format!("{rounded:.2}");
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    format!(
        "{sign} {CURRENCY_SYMBOL} {}.{frac_part}",
        group_digits(int_part, GROUPING_SEPARATOR)
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Colour bucket for a signed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountTone {
    Positive,
    Negative,
    Neutral,
}

impl AmountTone {
    pub fn for_amount(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            AmountTone::Positive
        } else if amount < Decimal::ZERO {
            AmountTone::Negative
        } else {
            AmountTone::Neutral
        }
    }

    /// Stylesheet class the web dashboard uses for this tone.
    pub fn css_class(self) -> &'static str {
        match self {
            AmountTone::Positive => "text-positive",
            AmountTone::Negative => "text-negative",
            AmountTone::Neutral => "text-grey-6",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn positive_amounts_get_plus_and_grouping() {
        assert_eq!(currency_format(dec("100")), "+ $ 100.00");
        assert_eq!(currency_format(dec("1234.5")), "+ $ 1,234.50");
        assert_eq!(currency_format(dec("1234567.89")), "+ $ 1,234,567.89");
    }

    #[test]
    fn negative_amounts_use_absolute_value() {
        assert_eq!(currency_format(dec("-50")), "- $ 50.00");
        assert_eq!(currency_format(dec("-999.99")), "- $ 999.99");
    }

    #[test]
    fn zero_has_no_sign() {
        assert_eq!(currency_format(Decimal::ZERO), " $ 0.00");
    }

    #[test]
    fn tones_follow_sign() {
        assert_eq!(AmountTone::for_amount(dec("0.01")).css_class(), "text-positive");
        assert_eq!(AmountTone::for_amount(dec("-1")).css_class(), "text-negative");
        assert_eq!(AmountTone::for_amount(Decimal::ZERO).css_class(), "text-grey-6");
    }
}
