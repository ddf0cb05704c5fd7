//! Calculator input and out-of-range handling.

use super::catalog::LoanType;
use super::{
    DEFAULT_CREDIT_SCORE, DEFAULT_TENURE_YEARS, MAX_CREDIT_SCORE, MAX_TENURE_YEARS,
    MIN_CREDIT_SCORE, MIN_TENURE_YEARS,
};
use crate::errors::CalculatorError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the calculator treats input outside its documented ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Pull values into range and report each change as an [`InputAdjustment`]
    #[default]
    Clamp,
    /// Fail with [`CalculatorError::OutOfRange`]
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    RequestedAmount,
    CreditScore,
    TenureYears,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestedAmount => write!(f, "requested amount"),
            Self::CreditScore => write!(f, "credit score"),
            Self::TenureYears => write!(f, "tenure (years)"),
        }
    }
}

/// A value the calculator pulled into range under [`InputPolicy::Clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputAdjustment {
    pub field: InputField,
    pub original: u64,
    pub adjusted: u64,
}

impl fmt::Display for InputAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} adjusted from {} to {}", self.field, self.original, self.adjusted)
    }
}

/// The four values a calculation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInput {
    pub loan_type: LoanType,
    pub requested_amount: u64,
    pub credit_score: u32,
    pub tenure_years: u32,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self::new(LoanType::Home)
    }
}

impl CalculatorInput {
    /// Start from the loan type's minimum amount, a 750 score and a 5 year tenure.
    pub fn new(loan_type: LoanType) -> Self {
        Self {
            loan_type,
            requested_amount: loan_type.config().min_amount,
            credit_score: DEFAULT_CREDIT_SCORE,
            tenure_years: DEFAULT_TENURE_YEARS,
        }
    }

    pub fn with_requested_amount(mut self, amount: u64) -> Self {
        self.requested_amount = amount;
        self
    }

    pub fn with_credit_score(mut self, score: u32) -> Self {
        self.credit_score = score;
        self
    }

    pub fn with_tenure_years(mut self, years: u32) -> Self {
        self.tenure_years = years;
        self
    }

    /// Switch loan type, pulling the requested amount into the new type's bounds.
    pub fn with_loan_type(mut self, loan_type: LoanType) -> Self {
        self.loan_type = loan_type;
        self.requested_amount = loan_type.config().clamp_amount(self.requested_amount);
        self
    }

    /// Bring the input into its documented ranges according to `policy`.
    ///
    /// Returns the effective input together with the adjustments made. Under
    /// [`InputPolicy::Reject`] the adjustment list is always empty.
    pub fn normalize(
        &self,
        policy: InputPolicy,
    ) -> Result<(CalculatorInput, Vec<InputAdjustment>), CalculatorError> {
        let config = self.loan_type.config();
        let mut adjustments = Vec::new();

        let requested_amount = bound(
            InputField::RequestedAmount,
            self.requested_amount,
            config.min_amount,
            config.max_amount,
            policy,
            &mut adjustments,
        )?;
        let credit_score = bound(
            InputField::CreditScore,
            u64::from(self.credit_score),
            u64::from(MIN_CREDIT_SCORE),
            u64::from(MAX_CREDIT_SCORE),
            policy,
            &mut adjustments,
        )?;
        let tenure_years = bound(
            InputField::TenureYears,
            u64::from(self.tenure_years),
            u64::from(MIN_TENURE_YEARS),
            u64::from(MAX_TENURE_YEARS),
            policy,
            &mut adjustments,
        )?;

        let effective = CalculatorInput {
            loan_type: self.loan_type,
            requested_amount,
            // both bounded by u32 limits above
            credit_score: credit_score as u32,
            tenure_years: tenure_years as u32,
        };
        Ok((effective, adjustments))
    }
}

fn bound(
    field: InputField,
    value: u64,
    min: u64,
    max: u64,
    policy: InputPolicy,
    adjustments: &mut Vec<InputAdjustment>,
) -> Result<u64, CalculatorError> {
    if (min..=max).contains(&value) {
        return Ok(value);
    }
    match policy {
        InputPolicy::Reject => Err(CalculatorError::OutOfRange {
            field,
            value,
            min,
            max,
        }),
        InputPolicy::Clamp => {
            let adjusted = value.clamp(min, max);
            tracing::debug!(%field, original = value, adjusted, "clamped calculator input");
            adjustments.push(InputAdjustment {
                field,
                original: value,
                adjusted,
            });
            Ok(adjusted)
        }
    }
}
