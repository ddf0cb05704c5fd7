//! Loan EMI and eligibility calculator.
//!
//! The calculator is a pipeline of three closed-form steps, evaluated eagerly
//! in dependency order every time an input changes:
//!
//! 1. interest rate, from credit score and the loan type's rate band
//! 2. eligible amount, from credit score and the loan type's maximum
//! 3. amortization (monthly payment, total payment, total interest)
//!
//! All of it is O(1) arithmetic with no I/O, so there is nothing to cache.
//!
//! # Example
//!
//! ```rust
//! use cognibank::calculator::{compute_all, CalculatorInput, LoanType};
//!
//! let input = CalculatorInput::new(LoanType::Home)
//!     .with_requested_amount(500_000)
//!     .with_credit_score(750)
//!     .with_tenure_years(5);
//!
//! let result = compute_all(&input);
//! assert_eq!(result.interest_rate, 8.75);
//! assert_eq!(result.eligible_amount, 500_000);
//! assert_eq!(result.monthly_payment, 10_319);
//! ```

mod catalog;
mod formulas;
mod input;

pub use catalog::{LoanType, LoanTypeConfig};
pub use formulas::{
    compute_amortization, compute_eligible_amount, compute_interest_rate, Amortization,
};
pub use input::{CalculatorInput, InputAdjustment, InputField, InputPolicy};

use crate::errors::CalculatorError;
use serde::Serialize;

pub const MIN_CREDIT_SCORE: u32 = 300;
pub const MAX_CREDIT_SCORE: u32 = 900;
pub const MIN_TENURE_YEARS: u32 = 1;
pub const MAX_TENURE_YEARS: u32 = 30;
pub const DEFAULT_CREDIT_SCORE: u32 = 750;
pub const DEFAULT_TENURE_YEARS: u32 = 5;

/// Derived figures for one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculatorResult {
    /// Percent per annum
    pub interest_rate: f64,
    pub eligible_amount: u64,
    pub monthly_payment: u64,
    pub total_payment: u64,
    pub total_interest: u64,
}

/// Compute every derived figure for `input`, taking its values as given.
///
/// Callers that cannot guarantee in-range input should go through
/// [`Calculator::calculate`] instead.
pub fn compute_all(input: &CalculatorInput) -> CalculatorResult {
    let interest_rate = compute_interest_rate(input.loan_type, input.credit_score);
    let eligible_amount =
        compute_eligible_amount(input.loan_type, input.requested_amount, input.credit_score);
    let amortization = compute_amortization(eligible_amount, interest_rate, input.tenure_years);

    CalculatorResult {
        interest_rate,
        eligible_amount,
        monthly_payment: amortization.monthly_payment,
        total_payment: amortization.total_payment,
        total_interest: amortization.total_interest,
    }
}

/// A completed calculation: the input actually used, the result, and any
/// adjustments the input policy made along the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub input: CalculatorInput,
    pub config: LoanTypeConfig,
    pub result: CalculatorResult,
    pub adjustments: Vec<InputAdjustment>,
}

/// Calculator bound to an [`InputPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    policy: InputPolicy,
}

impl Calculator {
    pub fn new(policy: InputPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    /// Normalize `input` under the configured policy and compute all figures.
    pub fn calculate(&self, input: &CalculatorInput) -> Result<Calculation, CalculatorError> {
        let (effective, adjustments) = input.normalize(self.policy)?;
        let result = compute_all(&effective);
        tracing::trace!(
            loan_type = %effective.loan_type,
            rate = result.interest_rate,
            eligible = result.eligible_amount,
            "computed loan figures"
        );
        Ok(Calculation {
            input: effective,
            config: *effective.loan_type.config(),
            result,
            adjustments,
        })
    }
}
