use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Parses a display amount such as `"$5M"`, `"€750K"` or `"1,200"` into a
/// value expressed in millions.
///
/// Currency symbols, thousands separators and whitespace are ignored. A
/// trailing `K`, `M` or `B` scales the number to millions; a bare number is
/// taken as-is. Anything that is not a number after stripping parses to zero,
/// and negative amounts clamp to zero, as do amounts too large for a
/// `Decimal` once scaled. This function never fails.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();

    let (number, scale) = match cleaned.chars().last() {
        Some('k') | Some('K') => (&cleaned[..cleaned.len() - 1], dec!(0.001)),
        Some('m') | Some('M') => (&cleaned[..cleaned.len() - 1], Decimal::ONE),
        Some('b') | Some('B') => (&cleaned[..cleaned.len() - 1], dec!(1000)),
        Some(_) => (cleaned.as_str(), Decimal::ONE),
        None => return Decimal::ZERO,
    };

    let value = Decimal::from_str(number)
        .ok()
        .or_else(|| number.parse::<f64>().ok().and_then(Decimal::from_f64))
        .unwrap_or(Decimal::ZERO);

    value
        .checked_mul(scale)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}
