//! Local EMI calculation and loan catalog listing.

use super::CommandContext;
use crate::calculator::{Calculator, CalculatorInput, InputPolicy, LoanType};
use crate::config::CalculatorConfig;
use crate::errors::CogniError;
use crate::observability::{set_loan_type, set_operation, Operation};
use anyhow::Result;
use std::io::Write;

/// Requested amount used when none is given, clamped into the type's range.
pub const DEFAULT_REQUESTED_AMOUNT: u64 = 500_000;

#[derive(Debug, Clone, Default)]
pub struct CalcArgs {
    pub loan_type: Option<LoanType>,
    pub amount: Option<u64>,
    pub credit_score: Option<u32>,
    pub tenure: Option<u32>,
    pub policy: Option<InputPolicy>,
}

/// Fill unset arguments from the `[calculator]` config section.
pub fn build_input(args: &CalcArgs, defaults: &CalculatorConfig) -> CalculatorInput {
    let loan_type = args.loan_type.unwrap_or(defaults.default_loan_type);
    let amount = args
        .amount
        .unwrap_or_else(|| loan_type.config().clamp_amount(DEFAULT_REQUESTED_AMOUNT));

    CalculatorInput::new(loan_type)
        .with_requested_amount(amount)
        .with_credit_score(args.credit_score.unwrap_or(defaults.default_credit_score))
        .with_tenure_years(args.tenure.unwrap_or(defaults.default_tenure_years))
}

pub fn run_calc(ctx: &CommandContext, args: &CalcArgs, out: &mut dyn Write) -> Result<()> {
    let _op = set_operation(Operation::Calculate);
    let input = build_input(args, &ctx.config.calculator);
    let _loan = set_loan_type(input.loan_type);

    let policy = args.policy.unwrap_or(ctx.config.calculator.input_policy);
    let calculation = Calculator::new(policy)
        .calculate(&input)
        .map_err(CogniError::from)?;

    for adjustment in &calculation.adjustments {
        tracing::info!("{}", adjustment);
    }
    ctx.writer(out).write_calculation(&calculation)
}

pub fn show_loan_types(ctx: &CommandContext, out: &mut dyn Write) -> Result<()> {
    let _op = set_operation(Operation::Catalog);
    ctx.writer(out).write_catalog()
}
