//! Fixed-rate amortization.
//!
//! For a monthly rate `r` and `n` payments, the payment per unit of principal is:
//!
//! `r / (1 - (1 + r)^(-n))`
//!
//! The annual rate is quoted in percent and split into twelve equal monthly
//! periods (`r = annual / 100 / 12`). Inputs are not validated: a negative
//! principal gives a negative payment, NaN propagates.

use crate::domain::ZeroRatePolicy;
use crate::payment::format_usd;

/// Monthly rate (decimal) from an annual rate in percent.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Payment per unit of principal for `term_months` payments at `monthly_rate`.
///
/// `monthly_rate == 0` yields NaN (`0 / 0`).
pub fn amortization_factor(monthly_rate: f64, term_months: u32) -> f64 {
    monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-f64::from(term_months)))
}

/// Fixed monthly payment.
pub fn monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
    zero_rate: ZeroRatePolicy,
) -> f64 {
    let r = monthly_rate(annual_rate_percent);
    if r == 0.0 && zero_rate == ZeroRatePolicy::StraightLine {
        return principal / f64::from(term_months);
    }
    principal * amortization_factor(r, term_months)
}

/// Fixed monthly payment as a US-dollar display string.
pub fn calculate_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
    zero_rate: ZeroRatePolicy,
) -> String {
    format_usd(monthly_payment(
        principal,
        annual_rate_percent,
        term_months,
        zero_rate,
    ))
}
