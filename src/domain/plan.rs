use super::debt::DebtId;
use super::money::Money;
use super::strategy::Strategy;
use chrono::NaiveDate;
use serde::Serialize;

/// Why a simulation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing above the paid-off threshold was supplied.
    NothingOwed,
    /// Every debt reached a zero balance.
    PaidOff,
    /// A month went by without any balance going down.
    Stalled,
    /// The month limit was hit with balances still outstanding.
    MonthCap,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::NothingOwed => "nothing_owed",
            Outcome::PaidOff => "paid_off",
            Outcome::Stalled => "stalled",
            Outcome::MonthCap => "month_cap",
        }
    }
}

/// One debt's payment breakdown for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoffLine {
    pub debt_id: DebtId,
    pub debt_name: String,
    pub payment: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoffMonth {
    /// 1-based.
    pub month_index: u32,
    pub date: NaiveDate,
    pub lines: Vec<PayoffLine>,
}

impl PayoffMonth {
    pub fn total_payment(&self) -> Money {
        self.lines.iter().map(|l| l.payment).sum()
    }

    pub fn line_for(&self, debt_id: DebtId) -> Option<&PayoffLine> {
        self.lines.iter().find(|l| l.debt_id == debt_id)
    }
}

/// Month-by-month schedule produced by the payoff engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoffPlan {
    pub strategy: Strategy,
    pub extra_payment: Money,
    pub months: Vec<PayoffMonth>,
    pub total_interest: Money,
    pub outcome: Outcome,
}

impl PayoffPlan {
    pub fn empty(strategy: Strategy, extra_payment: Money) -> Self {
        Self {
            strategy,
            extra_payment,
            months: Vec::new(),
            total_interest: Money::ZERO,
            outcome: Outcome::NothingOwed,
        }
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    pub fn total_paid(&self) -> Money {
        self.months.iter().map(PayoffMonth::total_payment).sum()
    }

    /// Date of the last scheduled month, if every debt got paid off.
    pub fn debt_free_date(&self) -> Option<NaiveDate> {
        match self.outcome {
            Outcome::PaidOff => self.months.last().map(|m| m.date),
            _ => None,
        }
    }

    /// Lines in schedule order, paired with the month they belong to.
    pub fn lines(&self) -> impl Iterator<Item = (&PayoffMonth, &PayoffLine)> {
        self.months
            .iter()
            .flat_map(|month| month.lines.iter().map(move |line| (month, line)))
    }

    /// Rolls the schedule up per debt, in order of first appearance.
    pub fn debt_summaries(&self) -> Vec<DebtSummary> {
        let mut summaries: Vec<DebtSummary> = Vec::new();

        for (month, line) in self.lines() {
            let idx = match summaries.iter().position(|s| s.debt_id == line.debt_id) {
                Some(idx) => idx,
                None => {
                    summaries.push(DebtSummary::new(line.debt_id, &line.debt_name));
                    summaries.len() - 1
                }
            };
            let summary = &mut summaries[idx];
            summary.months_paid += 1;
            summary.total_paid += line.payment;
            summary.interest_paid += line.interest_paid;
            summary.remaining_balance = line.remaining_balance;
            if line.remaining_balance.is_paid_off() && summary.payoff_month.is_none() {
                summary.payoff_month = Some(month.month_index);
                summary.payoff_date = Some(month.date);
            }
        }

        summaries
    }
}

/// Per-debt totals derived from a [`PayoffPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebtSummary {
    pub debt_id: DebtId,
    pub debt_name: String,
    pub months_paid: u32,
    pub payoff_month: Option<u32>,
    pub payoff_date: Option<NaiveDate>,
    pub total_paid: Money,
    pub interest_paid: Money,
    pub remaining_balance: Money,
}

impl DebtSummary {
    fn new(debt_id: DebtId, debt_name: &str) -> Self {
        Self {
            debt_id,
            debt_name: debt_name.to_string(),
            months_paid: 0,
            payoff_month: None,
            payoff_date: None,
            total_paid: Money::ZERO,
            interest_paid: Money::ZERO,
            remaining_balance: Money::ZERO,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.payoff_month.is_some()
    }
}
