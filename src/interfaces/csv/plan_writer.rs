use crate::application::comparison::StrategyComparison;
use crate::domain::debt::DebtId;
use crate::domain::money::Money;
use crate::domain::plan::{DebtSummary, PayoffPlan};
use crate::domain::strategy::Strategy;
use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ScheduleRow<'a> {
    month: u32,
    date: NaiveDate,
    debt_id: DebtId,
    debt_name: &'a str,
    payment: Money,
    interest: Money,
    principal: Money,
    remaining: Money,
}

#[derive(Serialize)]
struct ComparisonRow {
    strategy: Strategy,
    months: usize,
    total_interest: Money,
    total_paid: Money,
    debt_free_date: Option<NaiveDate>,
    outcome: &'static str,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    debt_id: DebtId,
    debt_name: &'a str,
    months_paid: u32,
    payoff_month: Option<u32>,
    payoff_date: Option<NaiveDate>,
    total_paid: Money,
    interest_paid: Money,
    remaining: Money,
}

/// Writes plans as CSV, one row per line item.
pub struct PlanWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PlanWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// `month,date,debt_id,debt_name,payment,interest,principal,remaining`
    pub fn write_schedule(&mut self, plan: &PayoffPlan) -> Result<()> {
        if plan.months.is_empty() {
            self.writer.write_record([
                "month",
                "date",
                "debt_id",
                "debt_name",
                "payment",
                "interest",
                "principal",
                "remaining",
            ])?;
        }
        for (month, line) in plan.lines() {
            self.writer.serialize(ScheduleRow {
                month: month.month_index,
                date: month.date,
                debt_id: line.debt_id,
                debt_name: &line.debt_name,
                payment: line.payment,
                interest: line.interest_paid,
                principal: line.principal_paid,
                remaining: line.remaining_balance,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// One row per debt, in the order debts first show up in the schedule.
    pub fn write_summaries(&mut self, summaries: &[DebtSummary]) -> Result<()> {
        if summaries.is_empty() {
            self.writer.write_record([
                "debt_id",
                "debt_name",
                "months_paid",
                "payoff_month",
                "payoff_date",
                "total_paid",
                "interest_paid",
                "remaining",
            ])?;
        }
        for summary in summaries {
            self.writer.serialize(SummaryRow {
                debt_id: summary.debt_id,
                debt_name: &summary.debt_name,
                months_paid: summary.months_paid,
                payoff_month: summary.payoff_month,
                payoff_date: summary.payoff_date,
                total_paid: summary.total_paid,
                interest_paid: summary.interest_paid,
                remaining: summary.remaining_balance,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// `strategy,months,total_interest,total_paid,debt_free_date,outcome`
    pub fn write_comparison(&mut self, comparison: &StrategyComparison) -> Result<()> {
        for totals in comparison.totals() {
            self.writer.serialize(ComparisonRow {
                strategy: totals.strategy,
                months: totals.months,
                total_interest: totals.total_interest,
                total_paid: totals.total_paid,
                debt_free_date: totals.debt_free_date,
                outcome: totals.outcome.as_str(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
