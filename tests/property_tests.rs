use payoff::application::orderer::ReorderPolicy;
use payoff::{Money, PayoffEngine, PayoffError, SimulationConfig, Strategy, order, simulate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

mod common;

#[test]
fn test_top_priority_dominates_every_other_debt() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let count = rng.gen_range(1..=8);
        let debts = common::random_debts(&mut rng, count);

        let avalanche = order(&debts, Strategy::Avalanche);
        assert!(avalanche
            .iter()
            .all(|d| avalanche[0].annual_rate_percent >= d.annual_rate_percent));
        assert!(avalanche
            .windows(2)
            .all(|w| w[0].annual_rate_percent >= w[1].annual_rate_percent));

        let snowball = order(&debts, Strategy::Snowball);
        assert!(snowball.iter().all(|d| snowball[0].balance <= d.balance));
        assert!(snowball.windows(2).all(|w| w[0].balance <= w[1].balance));
    }
}

#[test]
fn test_order_is_reproducible() {
    let mut rng = StdRng::seed_from_u64(11);
    let debts = common::random_debts(&mut rng, 6);
    for strategy in Strategy::ALL {
        assert_eq!(order(&debts, strategy), order(&debts, strategy));
    }
}

#[test]
fn test_more_extra_never_costs_more_interest() {
    let mut rng = StdRng::seed_from_u64(42);
    let extras = [dec!(0), dec!(25), dec!(100), dec!(250), dec!(600), dec!(1500)];

    for _ in 0..25 {
        let count = rng.gen_range(1..=5);
        let debts = common::random_debts(&mut rng, count);
        for strategy in Strategy::ALL {
            let interest: Vec<Decimal> = extras
                .iter()
                .map(|&extra| {
                    simulate(&debts, strategy, Money::new(extra))
                        .unwrap()
                        .total_interest_paid
                        .value()
                        .round_dp(6)
                })
                .collect();
            assert!(
                interest.windows(2).all(|w| w[1] <= w[0]),
                "{strategy}: {interest:?}"
            );
        }
    }
}

#[test]
fn test_zero_interest_closed_form() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let balance = Decimal::new(rng.gen_range(1..=5_000_000), 2);
        let payment = Decimal::new(rng.gen_range(100..=500_000), 2);
        let debts = vec![payoff::Debt::new("only", "Only", balance, dec!(0), payment)];

        let config = SimulationConfig {
            max_months: 100_000,
            record_trace: false,
        };
        let result = PayoffEngine::with_policy(ReorderPolicy::Static, config)
            .simulate(&debts, Strategy::Avalanche, Money::ZERO)
            .unwrap();

        let expected = (balance / payment).ceil();
        assert_eq!(Decimal::from(result.total_months), expected);
        assert_eq!(result.total_interest_paid, Money::ZERO);
        assert_eq!(result.payoff_month("only"), Some(result.total_months));
    }
}

#[test]
fn test_outlay_is_conserved_while_no_debt_retires() {
    let mut rng = StdRng::seed_from_u64(99);
    let engine = PayoffEngine::with_policy(
        ReorderPolicy::Static,
        SimulationConfig {
            record_trace: true,
            ..Default::default()
        },
    );

    for _ in 0..20 {
        let count = rng.gen_range(2..=5);
        let debts = common::random_debts(&mut rng, count);
        let minimums: HashMap<_, _> = debts
            .iter()
            .map(|d| (d.id.clone(), d.minimum_payment))
            .collect();
        let extra = Money::new(Decimal::new(rng.gen_range(0..=50_000), 2));

        for strategy in Strategy::ALL {
            let result = engine.simulate(&debts, strategy, extra).unwrap();
            for month in result.trace.as_ref().unwrap() {
                if month.entries.iter().any(|e| e.remaining_balance == Money::ZERO) {
                    continue;
                }
                let paid: Money = month.entries.iter().map(|e| e.payment_applied).sum();
                let due: Money = month.entries.iter().map(|e| minimums[&e.debt_id]).sum();
                assert_eq!(
                    paid.value().round_dp(10),
                    (due + month.extra_pool).value().round_dp(10),
                    "month {}",
                    month.month
                );
            }
        }
    }
}

#[test]
fn test_pool_only_grows_as_debts_retire() {
    let mut rng = StdRng::seed_from_u64(5);
    let debts = common::random_debts(&mut rng, 4);
    let engine = PayoffEngine::with_policy(
        ReorderPolicy::Static,
        SimulationConfig {
            record_trace: true,
            ..Default::default()
        },
    );
    let result = engine
        .simulate(&debts, Strategy::Snowball, Money::new(dec!(75)))
        .unwrap();
    let trace = result.trace.unwrap();
    assert_eq!(trace[0].extra_pool, Money::new(dec!(75)));
    assert!(trace.windows(2).all(|w| w[1].extra_pool >= w[0].extra_pool));
}

#[test]
fn test_interest_exceeding_minimum_never_converges() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..10 {
        let balance = Decimal::new(rng.gen_range(100_000..=5_000_000), 2);
        let rate = Decimal::new(rng.gen_range(600..=3_000), 2);
        let interest = balance * rate / Decimal::from(1200);
        let minimum = (interest / Decimal::TWO).round_dp(2).max(dec!(0.01));
        let debts = vec![payoff::Debt::new("stuck", "Stuck", balance, rate, minimum)];

        let err = simulate(&debts, Strategy::Avalanche, Money::ZERO).unwrap_err();
        assert!(matches!(err, PayoffError::NonConvergence { .. }), "{err:?}");
    }
}
