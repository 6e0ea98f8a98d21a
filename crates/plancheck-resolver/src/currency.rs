//! Amount parsing and US-dollar formatting

use serde_json::Value;

/// Accept a structured value as a dollar amount.
///
/// Numbers are taken as-is. Strings may carry a `$` and thousands separators
/// (`"$1,500"`). Negative, non-finite and non-numeric values are rejected.
pub fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|c| *c != '$' && *c != ',')
                .collect();
            cleaned.trim().parse::<f64>().ok()?
        }
        _ => return None,
    };

    valid_amount(amount)
}

/// Dollar amount from a run of digits and commas captured by a text pattern
pub(crate) fn usd_from_grouped(digits: &str) -> Option<String> {
    let plain: String = digits.chars().filter(|c| *c != ',').collect();
    usd_from_digits(&plain)
}

/// Keep only the ASCII digits of a free-text span and format them as dollars.
///
/// `"$2,000 per year"` becomes `"$2,000"`. The digits are grouped as written, so
/// long spans keep every digit. A span without digits yields `None`.
pub(crate) fn usd_from_digits(span: &str) -> Option<String> {
    let digits: String = span.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let significant = digits.trim_start_matches('0');
    let whole = if significant.is_empty() { "0" } else { significant };
    Some(format!("${}", group_thousands(whole)))
}

fn valid_amount(amount: f64) -> Option<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Some(amount)
    } else {
        None
    }
}

/// Format an amount as US currency: `$`, comma thousands separators, and up to
/// three fractional digits with trailing zeros dropped. Negative amounts keep
/// their sign after the `$` (`$-1,000`).
///
/// ```
/// use plancheck_resolver::format_usd;
///
/// assert_eq!(format_usd(1500.0), "$1,500");
/// assert_eq!(format_usd(1234.5), "$1,234.5");
/// ```
pub fn format_usd(amount: f64) -> String {
    let rendered = format!("{:.3}", amount.abs());
    let (whole, fraction) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut formatted = String::from("$");
    if amount < 0.0 && (whole != "0" || !fraction.is_empty()) {
        formatted.push('-');
    }
    formatted.push_str(&group_thousands(whole));

    if !fraction.is_empty() {
        formatted.push('.');
        formatted.push_str(fraction);
    }

    formatted
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
