use crate::domain::debt::{DebtId, DebtLike};
use crate::domain::money::Money;
use crate::domain::plan::{Outcome, PayoffLine, PayoffMonth, PayoffPlan};
use crate::domain::strategy::Strategy;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Hard limit on schedule length (50 years).
pub const MAX_MONTHS: u32 = 600;

/// Rates above this many percent a year are treated as this rate.
pub const MAX_INTEREST_RATE: Decimal = dec!(100);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Inputs of a single simulation, other than the debts themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub strategy: Strategy,
    /// Paid on top of the sum of minimums every month. Never negative.
    pub extra_payment: Money,
    /// Keep paying the minimums of retired debts into the pool.
    pub rollover_minimums: bool,
    /// Date shown for month 1.
    pub start_date: NaiveDate,
}

impl SimulationRequest {
    /// Extra payments are clamped into `0..=MAX_AMOUNT`.
    pub fn new(strategy: Strategy, extra_payment: Decimal, start_date: NaiveDate) -> Self {
        Self {
            strategy,
            extra_payment: Money::clamped(extra_payment),
            rollover_minimums: false,
            start_date,
        }
    }

    /// Builds a request from a fixed monthly budget.
    ///
    /// The extra payment is whatever the budget leaves after the minimums of the
    /// debts that are still owed; a budget below those minimums means no extra.
    pub fn from_budget<D: DebtLike>(
        debts: &[D],
        budget: Decimal,
        strategy: Strategy,
        start_date: NaiveDate,
    ) -> Self {
        let budget = Money::clamped(budget);
        Self::new(
            strategy,
            (budget - sum_of_minimums(debts)).value(),
            start_date,
        )
    }

    pub fn with_rollover(mut self, rollover_minimums: bool) -> Self {
        self.rollover_minimums = rollover_minimums;
        self
    }
}

/// Sum of the (clamped) minimum payments of debts that are not yet paid off.
pub fn sum_of_minimums<D: DebtLike>(debts: &[D]) -> Money {
    debts
        .iter()
        .map(WorkingDebt::from_debt)
        .filter(|d| !d.balance.is_paid_off())
        .map(|d| d.minimum_payment)
        .sum()
}

/// Runs a simulation without rollover whose first month is dated `start_date`.
pub fn simulate<D: DebtLike>(
    debts: &[D],
    strategy: Strategy,
    extra_payment: Decimal,
    start_date: NaiveDate,
) -> PayoffPlan {
    simulate_with(
        debts,
        &SimulationRequest::new(strategy, extra_payment, start_date),
    )
}

/// Builds the month-by-month payoff schedule for `debts`.
///
/// Each month every active debt accrues a month of simple interest, then the
/// pool (`Σ minimums + extra`) is handed out in strategy order. Each debt takes
/// as much as it can while leaving enough for the minimums of the debts after
/// it, so anything beyond the minimums lands on the first debt in order and
/// spills to the next once that one is retired.
///
/// Never fails: bad numbers are clamped (amounts into `0..=MAX_AMOUNT`, rates
/// into `0..=MAX_INTEREST_RATE`), and the run ends early once a month passes
/// without any balance going down.
pub fn simulate_with<D: DebtLike>(debts: &[D], request: &SimulationRequest) -> PayoffPlan {
    let strategy = request.strategy;
    let extra = Money::clamped(request.extra_payment.value());
    let mut plan = PayoffPlan::empty(strategy, extra);

    let mut active: Vec<WorkingDebt> = debts
        .iter()
        .map(WorkingDebt::from_debt)
        .filter(|d| !d.balance.is_paid_off())
        .enumerate()
        .map(|(position, debt)| WorkingDebt { position, ..debt })
        .collect();

    if active.is_empty() {
        debug!("No outstanding debts, returning an empty {} plan", strategy);
        return plan;
    }

    debug!(
        "Simulating {} plan for {} debts with {} extra",
        strategy,
        active.len(),
        extra
    );

    let mut freed_minimums = Money::ZERO;
    let mut month_index: u32 = 0;

    plan.outcome = loop {
        if active.is_empty() {
            break Outcome::PaidOff;
        }
        if month_index >= MAX_MONTHS {
            warn!(
                "Stopped {} plan at {} months with {} debts outstanding",
                strategy,
                MAX_MONTHS,
                active.len()
            );
            break Outcome::MonthCap;
        }
        month_index += 1;

        active.sort_by(|a, b| strategy_order(strategy, a, b));

        let mut available = active.iter().map(|d| d.minimum_payment).sum::<Money>() + extra;
        if request.rollover_minimums {
            available += freed_minimums;
        }

        // Interest and minimum due are fixed before any money moves.
        let dues: Vec<(Money, Money)> = active
            .iter()
            .map(|d| {
                let interest = d.accrued_interest();
                (interest, d.minimum_payment.min(d.balance + interest))
            })
            .collect();
        let mut reserved: Money = dues.iter().map(|(_, due)| *due).sum();

        let mut lines = Vec::new();
        let mut progressed = false;

        for (debt, (interest, minimum_due)) in active.iter_mut().zip(dues) {
            reserved -= minimum_due;
            if !available.is_positive() {
                continue;
            }

            let payoff = debt.balance + interest;
            let mut payment = available.saturating_sub(reserved).min(payoff);
            if payment < minimum_due {
                payment = available.min(minimum_due);
            }
            if !payment.is_positive() {
                continue;
            }

            let interest_paid = payment.min(interest);
            let principal_paid = payment - interest_paid;

            debt.balance = debt.balance.saturating_sub(principal_paid);
            available -= payment;
            progressed |= principal_paid.is_positive();

            let line = PayoffLine {
                debt_id: debt.id,
                debt_name: debt.name.clone(),
                payment: payment.round2(),
                interest_paid: interest_paid.round2(),
                principal_paid: principal_paid.round2(),
                remaining_balance: debt.balance.round2(),
            };
            plan.total_interest += line.interest_paid;
            lines.push(line);
        }

        freed_minimums += active
            .iter()
            .filter(|d| d.balance.is_paid_off())
            .map(|d| d.minimum_payment)
            .sum::<Money>();
        active.retain(|d| !d.balance.is_paid_off());

        if lines.is_empty() {
            warn!(
                "Nothing could be paid in month {} of the {} plan",
                month_index, strategy
            );
            break Outcome::Stalled;
        }

        plan.months.push(PayoffMonth {
            month_index,
            date: month_date(request.start_date, month_index),
            lines,
        });

        if !progressed {
            warn!(
                "Minimum payments do not cover interest; {} plan stalled in month {}",
                strategy, month_index
            );
            break Outcome::Stalled;
        }
    };

    debug!(
        "{} plan finished after {} months ({:?}), total interest {}",
        strategy,
        plan.month_count(),
        plan.outcome,
        plan.total_interest
    );

    plan
}

fn month_date(start: NaiveDate, month_index: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(month_index.saturating_sub(1)))
        .unwrap_or(start)
}

fn strategy_order(strategy: Strategy, a: &WorkingDebt, b: &WorkingDebt) -> Ordering {
    let ranked = match strategy {
        Strategy::Snowball => a
            .balance
            .cmp(&b.balance)
            .then_with(|| b.annual_rate.cmp(&a.annual_rate)),
        Strategy::Avalanche => b
            .annual_rate
            .cmp(&a.annual_rate)
            .then_with(|| a.balance.cmp(&b.balance)),
    };
    ranked.then_with(|| a.position.cmp(&b.position))
}

/// The engine's private, mutable copy of a caller's debt.
#[derive(Debug, Clone)]
struct WorkingDebt {
    /// Index in the caller's list, the final tie-break.
    position: usize,
    id: DebtId,
    name: String,
    balance: Money,
    annual_rate: Decimal,
    minimum_payment: Money,
}

impl WorkingDebt {
    fn from_debt<D: DebtLike>(debt: &D) -> Self {
        Self {
            position: 0,
            id: debt.id(),
            name: debt.name().to_string(),
            balance: Money::clamped(debt.balance()),
            annual_rate: debt
                .interest_rate()
                .clamp(Decimal::ZERO, MAX_INTEREST_RATE),
            minimum_payment: Money::clamped(debt.minimum_payment()),
        }
    }

    fn accrued_interest(&self) -> Money {
        let monthly_rate = self.annual_rate / PERCENT / MONTHS_PER_YEAR;
        Money::new(self.balance.value() * monthly_rate).round2()
    }
}
