//! Unit price parsing and display.
//!
//! Prices arrive from the page as strings and are parsed leniently: the
//! longest numeric prefix wins and anything unparseable becomes NaN. A NaN
//! price is kept on the line item so the bad input shows up in the total
//! instead of being silently replaced.

use serde::{Deserialize, Deserializer, Serializer};

/// Parse a price the way `parseFloat` does.
///
/// Leading whitespace is skipped, then the longest prefix that forms a
/// decimal number (optional sign, digits, fraction, exponent) or
/// `Infinity` is parsed. Input with no such prefix yields NaN.
///
/// ```
/// use cart_core::price::parse_price;
/// assert_eq!(parse_price(" 89.90"), 89.90);
/// assert_eq!(parse_price("120abc"), 120.0);
/// assert!(parse_price("R$ 10").is_nan());
/// ```
pub fn parse_price(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Format an amount with a currency label and two decimals, e.g. `"R$ 35.00"`.
///
/// Non-finite amounts print as `NaN`, `Infinity` or `-Infinity`.
pub fn format_price(label: &str, amount: f64) -> String {
    let amount = match amount {
        a if a.is_nan() => "NaN".to_string(),
        a if a.is_infinite() && a > 0.0 => "Infinity".to_string(),
        a if a.is_infinite() => "-Infinity".to_string(),
        a => format!("{:.2}", a),
    };

    if label.is_empty() {
        amount
    } else {
        format!("{} {}", label, amount)
    }
}

/// Price of a persisted row that carries no price at all.
pub(crate) fn missing() -> f64 {
    f64::NAN
}

/// Serde adapter for prices: NaN and infinities are written as `null`, and
/// `null` is read back as NaN.
pub(crate) mod nan_as_null {
    use super::*;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_price("10"), 10.0);
        assert_eq!(parse_price("149.9"), 149.9);
        assert_eq!(parse_price("-3.5"), -3.5);
        assert_eq!(parse_price("+7"), 7.0);
        assert_eq!(parse_price(".5"), 0.5);
        assert_eq!(parse_price("5."), 5.0);
    }

    #[test]
    fn test_prefix_wins() {
        assert_eq!(parse_price("  42.10 BRL"), 42.10);
        assert_eq!(parse_price("3.14.15"), 3.14);
        assert_eq!(parse_price("1e3x"), 1000.0);
        assert_eq!(parse_price("2e"), 2.0);
        assert_eq!(parse_price("2e+"), 2.0);
    }

    #[test]
    fn test_infinity() {
        assert_eq!(parse_price("Infinity"), f64::INFINITY);
        assert_eq!(parse_price("-Infinityish"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_non_numeric_is_nan() {
        assert!(parse_price("").is_nan());
        assert!(parse_price("abc").is_nan());
        assert!(parse_price(".").is_nan());
        assert!(parse_price("-").is_nan());
        assert!(parse_price("R$ 89,90").is_nan());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("R$", 35.0), "R$ 35.00");
        assert_eq!(format_price("R$", 89.9), "R$ 89.90");
        assert_eq!(format_price("", 9.5), "9.50");
        assert_eq!(format_price("R$", f64::NAN), "R$ NaN");
        assert_eq!(format_price("R$", f64::INFINITY), "R$ Infinity");
        assert_eq!(format_price("", f64::NEG_INFINITY), "-Infinity");
    }
}
