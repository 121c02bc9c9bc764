use chrono::NaiveDate;
use debt_payoff::{
    Debt, MAX_MONTHS, Money, Outcome, PayoffPlan, SimulationRequest, Strategy, simulate_with,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{HashMap, HashSet};

mod common;

fn request(strategy: Strategy, extra: Decimal) -> SimulationRequest {
    SimulationRequest::new(strategy, extra, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
}

fn payoff_month(plan: &PayoffPlan, debt_id: u32) -> Option<u32> {
    plan.debt_summaries()
        .into_iter()
        .find(|s| s.debt_id == debt_id)
        .and_then(|s| s.payoff_month)
}

fn assert_plan_invariants(plan: &PayoffPlan) {
    assert!(plan.month_count() <= MAX_MONTHS as usize);

    let line_interest: Money = plan.lines().map(|(_, line)| line.interest_paid).sum();
    assert_eq!(plan.total_interest, line_interest);

    let mut last_remaining: HashMap<u32, Money> = HashMap::new();
    let mut retired: HashSet<u32> = HashSet::new();

    for (i, month) in plan.months.iter().enumerate() {
        assert_eq!(month.month_index, i as u32 + 1, "months must be gapless");
        assert!(!month.lines.is_empty(), "empty months must not be emitted");

        for line in &month.lines {
            assert!(
                !retired.contains(&line.debt_id),
                "debt {} reappeared after payoff",
                line.debt_id
            );
            assert_eq!(line.payment, line.interest_paid + line.principal_paid);
            if let Some(previous) = last_remaining.get(&line.debt_id) {
                assert!(line.remaining_balance <= *previous);
            }
            last_remaining.insert(line.debt_id, line.remaining_balance);
            if line.remaining_balance.is_paid_off() {
                retired.insert(line.debt_id);
            }
        }
    }
}

#[test]
fn test_random_debt_sets_hold_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let count = rng.gen_range(1..=6);
        let debts = common::random_debts(&mut rng, count);
        let extra = Decimal::new(rng.gen_range(0..30_000), 2);

        for strategy in [Strategy::Snowball, Strategy::Avalanche] {
            let plan = simulate_with(&debts, &request(strategy, extra));
            assert_plan_invariants(&plan);
        }
    }
}

#[test]
fn test_single_card_interest_equals_payments_minus_principal() {
    let debts = vec![Debt::new(1, "Card", dec!(1200), dec!(19.99), dec!(35))];
    let plan = simulate_with(&debts, &request(Strategy::Snowball, dec!(0)));

    assert_eq!(plan.outcome, Outcome::PaidOff);
    assert_eq!(plan.month_count(), 52);
    let last = plan.months.last().unwrap().lines.last().unwrap();
    assert!(last.remaining_balance.is_paid_off());
    assert_eq!(plan.total_interest, Money::new(dec!(593.62)));
    assert_eq!(plan.total_interest, plan.total_paid() - Money::new(dec!(1200)));
}

#[test]
fn test_snowball_retires_smaller_balance_first() {
    let debts = common::household()[..2].to_vec();
    let plan = simulate_with(&debts, &request(Strategy::Snowball, dec!(100)));

    assert_eq!(plan.outcome, Outcome::PaidOff);
    assert!(payoff_month(&plan, 1).unwrap() < payoff_month(&plan, 2).unwrap());
}

#[test]
fn test_avalanche_retires_higher_rate_first() {
    let debts = common::household()[..2].to_vec();
    let plan = simulate_with(&debts, &request(Strategy::Avalanche, dec!(100)));

    assert_eq!(plan.months[0].lines[0].debt_id, 1);
    assert!(payoff_month(&plan, 1).unwrap() < payoff_month(&plan, 2).unwrap());
}

#[test]
fn test_strategies_diverge_when_rank_disagrees() {
    let debts = common::household();
    let snowball = simulate_with(&debts, &request(Strategy::Snowball, dec!(100)));
    let avalanche = simulate_with(&debts, &request(Strategy::Avalanche, dec!(100)));

    // Snowball clears C (smallest) first, avalanche clears A (highest rate) first.
    assert_eq!(payoff_month(&snowball, 3), Some(1));
    assert!(payoff_month(&snowball, 3) < payoff_month(&snowball, 1));
    assert!(payoff_month(&avalanche, 1) < payoff_month(&avalanche, 3));

    assert_ne!(snowball.total_interest, avalanche.total_interest);
    assert!(avalanche.total_interest <= snowball.total_interest);
    assert_eq!(snowball.total_interest, Money::new(dec!(216.30)));
    assert_eq!(avalanche.total_interest, Money::new(dec!(200.61)));
}

#[test]
fn test_empty_input_yields_empty_plan() {
    let debts: Vec<Debt> = Vec::new();
    let plan = simulate_with(&debts, &request(Strategy::Avalanche, dec!(250)));

    assert_eq!(plan.month_count(), 0);
    assert_eq!(plan.total_interest, Money::ZERO);
    assert_eq!(plan.lines().count(), 0);
    assert_eq!(plan.outcome, Outcome::NothingOwed);
}

#[test]
fn test_identical_inputs_give_identical_plans() {
    let debts = common::household();
    let req = request(Strategy::Snowball, dec!(75));
    assert_eq!(simulate_with(&debts, &req), simulate_with(&debts, &req));
}

#[test]
fn test_budget_and_extra_are_equivalent_inputs() {
    let debts = common::household();
    let from_budget = SimulationRequest::from_budget(
        &debts,
        dec!(185),
        Strategy::Avalanche,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    );

    assert_eq!(
        simulate_with(&debts, &from_budget),
        simulate_with(&debts, &request(Strategy::Avalanche, dec!(100)))
    );
}

#[test]
fn test_plans_never_exceed_month_cap() {
    let debts = vec![
        Debt::new(1, "Slow", dec!(90000), dec!(0), dec!(5)),
        Debt::new(2, "Slower", dec!(50000), dec!(0.5), dec!(25)),
    ];
    let plan = simulate_with(&debts, &request(Strategy::Snowball, dec!(0)));
    assert_eq!(plan.outcome, Outcome::MonthCap);
    assert_eq!(plan.month_count(), MAX_MONTHS as usize);
    assert_plan_invariants(&plan);
}
