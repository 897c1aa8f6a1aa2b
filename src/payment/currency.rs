//! US-dollar display formatting (`$1,234.56`).
//!
//! Matches the en-US currency style: leading `$`, comma thousands separators,
//! exactly two decimals, minus sign before the symbol. Non-finite values are
//! rendered rather than rejected (`$NaN`, `$∞`, `-$∞`).

/// Format `amount` as US dollars.
///
/// Rounds to the nearest cent; exact half-cent ties round to even.
pub fn format_usd(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{sign}$∞");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
