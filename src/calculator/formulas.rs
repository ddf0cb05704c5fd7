//! Closed-form loan formulas.
//!
//! Each function is pure: no I/O, no hidden state, same inputs always give
//! the same outputs. They take values as given; range handling lives in
//! [`super::input`].

use super::catalog::LoanType;
use super::{MAX_CREDIT_SCORE, MIN_CREDIT_SCORE};
use serde::Serialize;

/// Width of the credit score range, used to normalize the rate factor.
const SCORE_SPAN: f64 = (MAX_CREDIT_SCORE - MIN_CREDIT_SCORE) as f64;

/// Annual interest rate (percent) for a credit score.
///
/// Interpolates linearly across the loan type's rate band: a score of 900
/// gets `min_rate`, 300 gets `max_rate`. The score factor is clamped to
/// `[0, 1]` so out-of-band scores never leave the band. Rounded to two
/// decimal places.
pub fn compute_interest_rate(loan_type: LoanType, credit_score: u32) -> f64 {
    let config = loan_type.config();
    let cibil_factor =
        ((f64::from(MAX_CREDIT_SCORE) - f64::from(credit_score)) / SCORE_SPAN).clamp(0.0, 1.0);
    let rate = config.min_rate + (config.max_rate - config.min_rate) * cibil_factor;
    round_to_hundredths(rate)
}

/// Principal the applicant qualifies for.
///
/// The ceiling is `max_amount × score / 900`; the result is the smaller of
/// that ceiling and the requested amount, rounded to a whole currency unit.
/// Never exceeds `requested_amount`.
pub fn compute_eligible_amount(loan_type: LoanType, requested_amount: u64, credit_score: u32) -> u64 {
    let config = loan_type.config();
    let cibil_eligibility = f64::from(credit_score) / f64::from(MAX_CREDIT_SCORE);
    let max_eligible = config.max_amount as f64 * cibil_eligibility;
    let eligible = (requested_amount as f64).min(max_eligible).round();
    (eligible.max(0.0) as u64).min(requested_amount)
}

/// Fixed-rate amortization outputs, each rounded to a whole currency unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Amortization {
    pub monthly_payment: u64,
    pub total_payment: u64,
    pub total_interest: u64,
}

/// Equated monthly installment schedule for a principal.
///
/// `EMI = P × r × (1+r)^n / ((1+r)^n − 1)` with `r` the monthly rate and
/// `n` the number of months. A zero principal, non-positive rate or zero
/// tenure yields all zeros.
pub fn compute_amortization(eligible_amount: u64, interest_rate: f64, tenure_years: u32) -> Amortization {
    if eligible_amount == 0 || !(interest_rate > 0.0) || tenure_years == 0 {
        return Amortization::default();
    }

    let principal = eligible_amount as f64;
    let monthly_rate = interest_rate / 12.0 / 100.0;
    let months = f64::from(tenure_years) * 12.0;

    let growth = (1.0 + monthly_rate).powf(months);
    let monthly_payment = if growth > 1.0 && growth.is_finite() {
        principal * monthly_rate * growth / (growth - 1.0)
    } else {
        // rate too small to register in f64; the limit is straight-line repayment
        principal / months
    };
    let total_payment = (monthly_payment * months).round() as u64;

    Amortization {
        monthly_payment: monthly_payment.round() as u64,
        total_payment,
        // total_payment is already whole, so this equals round(total - principal)
        total_interest: total_payment.saturating_sub(eligible_amount),
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
