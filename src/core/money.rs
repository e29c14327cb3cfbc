use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Largest magnitude the engine accepts for any single input amount.
/// Larger inputs are capped, which keeps every sum and product of amounts
/// well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Round to whole cents, ties away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Negative amounts are treated as zero.
pub fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Limit `amount` to `-MAX_AMOUNT..=MAX_AMOUNT`.
pub fn bounded(amount: Decimal) -> Decimal {
    amount.clamp(-MAX_AMOUNT, MAX_AMOUNT)
}

/// How a currency amount is written for a particular locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: &'static str,
    pub symbol: &'static str,
    pub group_separator: char,
    pub decimal_separator: char,
}

/// Australian dollars, en-AU conventions.
pub const AUD: CurrencyFormat = CurrencyFormat {
    code: "AUD",
    symbol: "$",
    group_separator: ',',
    decimal_separator: '.',
};

/// Format `amount` with `decimals` fraction digits, grouping thousands.
///
/// `format_money(dec!(25092), &AUD, 0)` gives `$25,092`, and
/// `format_money(dec!(-1234.5), &AUD, 2)` gives `-$1,234.50`.
pub fn format_money(amount: Decimal, currency: &CurrencyFormat, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.*}", decimals as usize, rounded.abs());
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = format!("{}{}{}", sign, currency.symbol, group_digits(whole, currency.group_separator));
    if let Some(fraction) = fraction {
        out.push(currency.decimal_separator);
        out.push_str(fraction);
    }
    out
}

fn group_digits(whole: &str, separator: char) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
