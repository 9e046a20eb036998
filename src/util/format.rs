//! Number formatting utilities.

/// Round to 2 decimal places.
#[must_use]
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a revenue amount in USD.
#[must_use]
pub fn format_money(value: f64) -> String {
    format!("${value:.2}")
}

/// Format a visitor count with thousands separators.
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
