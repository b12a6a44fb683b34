use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Salaries are stored as `NUMERIC(14,2)`: at most 12 integer digits.
const SALARY_INTEGER_DIGITS: u32 = 12;

/// Normalises a human-entered amount such as `"15,000,000"` or `"1 200.50"`.
/// Returns `None` for blank, unparsable or out-of-range input. Amounts are
/// rounded to cents.
pub fn normalize_salary(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let ceiling = Decimal::from(10i64.pow(SALARY_INTEGER_DIGITS));
    Decimal::from_str(&cleaned)
        .ok()
        .map(|amount| amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .filter(|amount| !amount.is_sign_negative() && *amount < ceiling)
}
