//! Property tests for the loan calculator.

use cognibank::calculator::{
    compute_all, compute_amortization, compute_eligible_amount, compute_interest_rate, Calculator,
    CalculatorInput, InputPolicy, LoanType, MAX_CREDIT_SCORE, MIN_CREDIT_SCORE,
};
use proptest::prelude::*;

fn loan_type() -> impl Strategy<Value = LoanType> {
    prop::sample::select(LoanType::ALL.to_vec())
}

/// A loan type with a requested amount inside its bounds.
fn loan_with_amount() -> impl Strategy<Value = (LoanType, u64)> {
    loan_type().prop_flat_map(|lt| {
        let config = lt.config();
        (Just(lt), config.min_amount..=config.max_amount)
    })
}

fn valid_input() -> impl Strategy<Value = CalculatorInput> {
    (loan_with_amount(), MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE, 1u32..=30).prop_map(
        |((lt, amount), score, years)| {
            CalculatorInput::new(lt)
                .with_requested_amount(amount)
                .with_credit_score(score)
                .with_tenure_years(years)
        },
    )
}

proptest! {
    #[test]
    fn rate_stays_within_band(lt in loan_type(), score in MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE) {
        let rate = compute_interest_rate(lt, score);
        let config = lt.config();
        prop_assert!(rate >= config.min_rate && rate <= config.max_rate, "{} at {}: {}", lt, score, rate);
    }

    #[test]
    fn rate_never_rises_with_score(
        lt in loan_type(),
        a in MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE,
        b in MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(compute_interest_rate(lt, low) >= compute_interest_rate(lt, high));
    }

    #[test]
    fn eligible_never_exceeds_requested(
        (lt, amount) in loan_with_amount(),
        score in MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE,
    ) {
        prop_assert!(compute_eligible_amount(lt, amount, score) <= amount);
    }

    #[test]
    fn perfect_score_gets_full_request_within_max(lt in loan_type(), amount in 0u64..50_000_000) {
        let expected = amount.min(lt.config().max_amount);
        prop_assert_eq!(compute_eligible_amount(lt, amount, MAX_CREDIT_SCORE), expected);
    }

    #[test]
    fn amortization_identities_hold(input in valid_input()) {
        let result = compute_all(&input);
        let months = u64::from(input.tenure_years) * 12;

        let scheduled = result.monthly_payment * months;
        let drift = scheduled.abs_diff(result.total_payment);
        // each monthly payment is off by at most half a unit after rounding
        prop_assert!(drift <= months / 2 + 1, "drift {} over {} months", drift, months);

        prop_assert!(result.total_payment >= result.eligible_amount);
        prop_assert_eq!(result.total_interest, result.total_payment - result.eligible_amount);
    }

    #[test]
    fn zero_principal_means_zero_payments(rate in 0.0f64..30.0, years in 0u32..=30) {
        let amortization = compute_amortization(0, rate, years);
        prop_assert_eq!(amortization.monthly_payment, 0);
        prop_assert_eq!(amortization.total_payment, 0);
        prop_assert_eq!(amortization.total_interest, 0);
    }

    #[test]
    fn clamp_policy_accepts_anything(
        lt in loan_type(),
        amount in any::<u64>(),
        score in any::<u32>(),
        years in any::<u32>(),
    ) {
        let input = CalculatorInput::new(lt)
            .with_requested_amount(amount)
            .with_credit_score(score)
            .with_tenure_years(years);
        let calculation = Calculator::new(InputPolicy::Clamp).calculate(&input).unwrap();
        let config = lt.config();

        prop_assert!(config.contains_amount(calculation.input.requested_amount));
        prop_assert!((MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&calculation.input.credit_score));
        prop_assert!((1..=30).contains(&calculation.input.tenure_years));
        prop_assert!(calculation.result.interest_rate >= config.min_rate);
        prop_assert!(calculation.result.interest_rate <= config.max_rate);
    }

    #[test]
    fn reject_policy_accepts_exactly_valid_input(input in valid_input()) {
        let calculation = Calculator::new(InputPolicy::Reject).calculate(&input).unwrap();
        prop_assert!(calculation.adjustments.is_empty());
        prop_assert_eq!(calculation.result, compute_all(&input));
    }
}

#[test]
fn worst_and_best_scores_hit_band_edges() {
    for lt in LoanType::ALL {
        let config = lt.config();
        assert_eq!(compute_interest_rate(lt, MIN_CREDIT_SCORE), config.max_rate, "{}", lt);
        assert_eq!(compute_interest_rate(lt, MAX_CREDIT_SCORE), config.min_rate, "{}", lt);
    }
}
