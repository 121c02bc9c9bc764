//! "Where am I heading" numbers: paying every debt at its minimum versus a
//! snowball plan on the same monthly outlay, and what the freed-up payment
//! could grow into if invested for the years saved.

use super::engine::{SimulationRequest, simulate_with};
use crate::domain::debt::DebtLike;
use crate::domain::money::Money;
use crate::domain::strategy::Strategy;
use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

pub const DEFAULT_ANNUAL_ROI_PERCENT: Decimal = dec!(5);

/// Used when a payment can never retire its debt (100 years).
const UNPAYABLE_MONTHS: f64 = 1200.0;
const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub years_to_freedom: f64,
    pub total_paid: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WealthProjection {
    pub monthly_contribution: Money,
    pub years: f64,
    pub roi_percent: Decimal,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlook {
    pub total_debt: Money,
    pub monthly_debt: Money,
    /// Each debt paid on its own at its minimum.
    pub current: Scenario,
    /// Snowball on a fixed budget equal to `monthly_debt`.
    pub plan: Scenario,
    pub years_saved: f64,
    pub savings: Money,
    /// Projected wealth given up per day of staying on the current path.
    pub cost_per_day: Money,
    pub wealth: WealthProjection,
}

pub fn outlook<D: DebtLike>(debts: &[D], annual_roi_percent: Decimal, start: NaiveDate) -> Outlook {
    let total_debt: Money = debts.iter().map(|d| Money::clamped(d.balance())).sum();
    let monthly_debt: Money = debts
        .iter()
        .map(|d| Money::clamped(d.minimum_payment()))
        .sum();

    let current = current_scenario(debts);
    let plan = plan_scenario(debts, start);

    let years_saved = (current.years_to_freedom - plan.years_to_freedom).max(0.0);
    let wealth_value = future_value(monthly_debt, years_saved, annual_roi_percent);

    let cost_per_day = if years_saved > 0.0 {
        rounded_to_even(wealth_value / (years_saved * DAYS_PER_YEAR), 2)
    } else {
        Money::ZERO
    };

    Outlook {
        total_debt,
        monthly_debt,
        savings: current.total_paid - plan.total_paid,
        current,
        plan,
        years_saved,
        cost_per_day,
        wealth: WealthProjection {
            monthly_contribution: monthly_debt,
            years: years_saved,
            roi_percent: annual_roi_percent,
            total: rounded_to_even(wealth_value, 0),
        },
    }
}

fn current_scenario<D: DebtLike>(debts: &[D]) -> Scenario {
    let mut longest = 0.0_f64;
    let mut total_paid = Money::ZERO;

    for debt in debts {
        let balance = Money::clamped(debt.balance());
        let payment = Money::clamped(debt.minimum_payment());
        if !balance.is_positive() || !payment.is_positive() {
            continue;
        }

        let mut months = months_to_payoff(
            to_f64(balance.value()),
            to_f64(debt.interest_rate()),
            to_f64(payment.value()),
        );
        if !months.is_finite() {
            months = UNPAYABLE_MONTHS;
        }

        longest = longest.max(months);
        total_paid += Money::new(to_money(months).value() * payment.value());
    }

    Scenario {
        years_to_freedom: longest / 12.0,
        total_paid: total_paid.round2(),
    }
}

/// Only debts the current scenario pays are planned, so both sides cover the same debts.
fn plan_scenario<D: DebtLike>(debts: &[D], start: NaiveDate) -> Scenario {
    let payable: Vec<&D> = debts
        .iter()
        .filter(|d| {
            Money::clamped(d.balance()).is_positive()
                && Money::clamped(d.minimum_payment()).is_positive()
        })
        .collect();
    let request =
        SimulationRequest::new(Strategy::Snowball, Decimal::ZERO, start).with_rollover(true);
    let plan = simulate_with(&payable, &request);

    Scenario {
        years_to_freedom: plan.month_count() as f64 / 12.0,
        total_paid: plan.total_paid(),
    }
}

/// Months for a fixed payment to retire a balance: `ln(P / (P - rB)) / ln(1 + r)`.
fn months_to_payoff(balance: f64, annual_rate_percent: f64, payment: f64) -> f64 {
    if balance <= 0.0 || payment <= 0.0 {
        return 0.0;
    }

    let r = annual_rate_percent / 100.0 / 12.0;
    if r <= 0.0 {
        return balance / payment;
    }
    if payment <= balance * r {
        return UNPAYABLE_MONTHS;
    }

    (payment / (payment - r * balance)).ln() / (1.0 + r).ln()
}

/// Future value of an ordinary annuity with monthly compounding.
fn future_value(monthly_contribution: Money, years: f64, annual_roi_percent: Decimal) -> f64 {
    let pmt = to_f64(monthly_contribution.value());
    let roi = to_f64(annual_roi_percent) / 100.0;
    if pmt <= 0.0 || years <= 0.0 || roi <= 0.0 {
        return 0.0;
    }

    let r = roi / 12.0;
    let n = (years * 12.0).round() as i32;
    pmt * ((1.0 + r).powi(n) - 1.0) / r
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn to_money(value: f64) -> Money {
    Money::new(Decimal::from_f64(value).unwrap_or(Decimal::ZERO))
}

/// Banker's rounding, unlike the half-away-from-zero used for schedule lines.
fn rounded_to_even(value: f64, dp: u32) -> Money {
    Money::new(
        to_money(value)
            .value()
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven),
    )
}
