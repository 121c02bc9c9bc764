use super::engine::{SimulationRequest, simulate_with};
use crate::domain::debt::{Debt, DebtLike};
use crate::domain::money::Money;
use crate::domain::plan::{Outcome, PayoffPlan};
use crate::domain::strategy::Strategy;
use crate::error::{PayoffError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Headline numbers of one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanTotals {
    pub strategy: Strategy,
    pub months: usize,
    pub total_interest: Money,
    pub total_paid: Money,
    pub debt_free_date: Option<NaiveDate>,
    pub outcome: Outcome,
}

impl From<&PayoffPlan> for PlanTotals {
    fn from(plan: &PayoffPlan) -> Self {
        Self {
            strategy: plan.strategy,
            months: plan.month_count(),
            total_interest: plan.total_interest,
            total_paid: plan.total_paid(),
            debt_free_date: plan.debt_free_date(),
            outcome: plan.outcome,
        }
    }
}

/// Snowball and avalanche run against the same debts and budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyComparison {
    pub extra_payment: Money,
    pub snowball: PlanTotals,
    pub avalanche: PlanTotals,
    /// Snowball interest minus avalanche interest; negative when snowball is cheaper.
    pub interest_saved_by_avalanche: Money,
    /// Snowball months minus avalanche months.
    pub months_saved_by_avalanche: i64,
}

impl StrategyComparison {
    pub fn from_plans(snowball: &PayoffPlan, avalanche: &PayoffPlan) -> Self {
        let extra_payment = snowball.extra_payment;
        let snowball = PlanTotals::from(snowball);
        let avalanche = PlanTotals::from(avalanche);
        Self {
            extra_payment,
            interest_saved_by_avalanche: snowball.total_interest - avalanche.total_interest,
            months_saved_by_avalanche: snowball.months as i64 - avalanche.months as i64,
            snowball,
            avalanche,
        }
    }

    pub fn totals(&self) -> [&PlanTotals; 2] {
        [&self.snowball, &self.avalanche]
    }
}

/// Runs both strategies with the settings of `request` (its own strategy is ignored).
pub fn compare<D: DebtLike>(debts: &[D], request: &SimulationRequest) -> StrategyComparison {
    let snowball = simulate_with(debts, &with_strategy(request, Strategy::Snowball));
    let avalanche = simulate_with(debts, &with_strategy(request, Strategy::Avalanche));
    StrategyComparison::from_plans(&snowball, &avalanche)
}

/// Same as [`compare`], with each simulation on its own blocking task.
pub async fn compare_async<D>(debts: &[D], request: &SimulationRequest) -> Result<StrategyComparison>
where
    D: DebtLike,
{
    let snapshot: Vec<Debt> = debts
        .iter()
        .map(|d| {
            Debt::new(
                d.id(),
                d.name(),
                d.balance(),
                d.interest_rate(),
                d.minimum_payment(),
            )
        })
        .collect();

    let snowball = spawn_simulation(snapshot.clone(), with_strategy(request, Strategy::Snowball));
    let avalanche = spawn_simulation(snapshot, with_strategy(request, Strategy::Avalanche));
    let (snowball, avalanche) = tokio::try_join!(snowball, avalanche)
        .map_err(|e| PayoffError::Task(e.to_string()))?;

    Ok(StrategyComparison::from_plans(&snowball, &avalanche))
}

fn spawn_simulation(
    debts: Vec<Debt>,
    request: SimulationRequest,
) -> tokio::task::JoinHandle<PayoffPlan> {
    tokio::task::spawn_blocking(move || simulate_with(&debts, &request))
}

fn with_strategy(request: &SimulationRequest, strategy: Strategy) -> SimulationRequest {
    SimulationRequest {
        strategy,
        ..request.clone()
    }
}
