//! Token unit conversion and display formatting.
//!
//! On-chain balances are integers in the token's smallest unit. This module
//! turns them into human values:
//! - `to_decimal_value`: lossy `f64` for arithmetic and charts
//! - `to_exact_amount`: exact `Decimal` when the amount fits 96 bits
//! - `format_display`: locale-grouped string with at most two fraction digits
//!
//! Display rounding goes through `Decimal` whenever the amount fits its
//! 96-bit mantissa and 28-digit scale. Larger amounts and scales are
//! rounded in integer space on the raw `U256`. Both paths are exact.

use alloy::primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};

const HUNDRED: U256 = U256::from_limbs([100, 0, 0, 0]);

/// Digit grouping and decimal separator conventions for display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    /// Thousands separator, `None` for ungrouped output.
    pub group_separator: Option<char>,
    /// Separator between integer and fraction digits.
    pub decimal_separator: char,
}

impl NumberLocale {
    /// `1,234.5`
    pub const EN_US: Self = Self {
        group_separator: Some(','),
        decimal_separator: '.',
    };

    /// `1.234,5`
    pub const DE_DE: Self = Self {
        group_separator: Some('.'),
        decimal_separator: ',',
    };

    /// `1 234,5` with a narrow no-break space.
    pub const FR_FR: Self = Self {
        group_separator: Some('\u{202f}'),
        decimal_separator: ',',
    };

    /// `1234.5`
    pub const PLAIN: Self = Self {
        group_separator: None,
        decimal_separator: '.',
    };

    /// Resolve a language tag such as `en-US`, `de` or `fr_FR`.
    ///
    /// Only the language subtag is significant. Unknown languages fall
    /// back to `EN_US`.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" => Self::DE_DE,
            "fr" => Self::FR_FR,
            "plain" | "c" | "posix" => Self::PLAIN,
            _ => Self::EN_US,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// `10^decimals`, or `None` when it does not fit in 256 bits.
fn pow10(decimals: u8) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(decimals))
}

/// Whole and fractional parts of `raw` at `decimals`.
///
/// Every `U256` is below `10^78`, so when the scale overflows the whole
/// part is zero and the entire amount is fraction.
fn split_whole(raw: U256, decimals: u8) -> (U256, U256) {
    pow10(decimals).map_or((U256::ZERO, raw), |scale| (raw / scale, raw % scale))
}

/// Convert a raw amount to its human value as `f64`.
///
/// Goes through the exact decimal string so that values like `1.5` come
/// out bit-identical to the literal.
pub fn to_decimal_value(raw: U256, decimals: u8) -> f64 {
    let (whole, rem) = split_whole(raw, decimals);

    let text = if decimals == 0 {
        whole.to_string()
    } else {
        format!(
            "{whole}.{:0>width$}",
            rem.to_string(),
            width = usize::from(decimals)
        )
    };

    text.parse().unwrap_or(0.0)
}

/// Convert a raw amount to an exact `Decimal`.
///
/// Returns `None` when the amount exceeds Decimal's 96-bit mantissa or
/// `decimals` exceeds its maximum scale of 28.
pub fn to_exact_amount(raw: U256, decimals: u8) -> Option<Decimal> {
    if raw > U256::from(u128::MAX) {
        return None;
    }
    let mantissa = i128::try_from(raw.to::<u128>()).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, u32::from(decimals)).ok()
}

/// Format a raw amount for display.
///
/// Zero minimum and two maximum fraction digits, rounded half away from
/// zero, trailing zeros trimmed. A zero balance renders as `"0"`.
pub fn format_display(raw: U256, decimals: u8, locale: &NumberLocale) -> String {
    let Some(amount) = to_exact_amount(raw, decimals) else {
        return format_display_wide(raw, decimals, locale);
    };

    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();

    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    render(whole, fraction, locale)
}

/// `U256` rounding for amounts `Decimal` cannot hold.
fn format_display_wide(raw: U256, decimals: u8, locale: &NumberLocale) -> String {
    let (mut whole, rem) = split_whole(raw, decimals);

    let mut cents = if decimals < 2 {
        rem * U256::from(10u8).pow(U256::from(2 - decimals))
    } else {
        // One unit of the second fraction digit; zero once even that overflows
        pow10(decimals - 2).map_or(U256::ZERO, |unit| {
            let half = unit / U256::from(2u8);
            let cents = rem / unit;
            if half > U256::ZERO && rem % unit >= half {
                cents + U256::from(1u8)
            } else {
                cents
            }
        })
    };

    if cents == HUNDRED {
        whole += U256::from(1u8);
        cents = U256::ZERO;
    }

    let fraction = format!("{:02}", cents.to::<u64>());
    render(&whole.to_string(), fraction.trim_end_matches('0'), locale)
}

/// Join grouped integer digits and an already trimmed fraction.
fn render(whole: &str, fraction: &str, locale: &NumberLocale) -> String {
    let mut out = group_digits(whole, locale.group_separator);
    if !fraction.is_empty() {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// Insert `separator` every three digits from the right.
fn group_digits(digits: &str, separator: Option<char>) -> String {
    let Some(sep) = separator else {
        return digits.to_string();
    };

    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * sep.len_utf8());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
