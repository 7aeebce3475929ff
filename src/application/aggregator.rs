use super::simulator::{MonthTrace, Schedule};
use crate::domain::debt::DebtId;
use crate::domain::money::Money;
use crate::domain::strategy::Strategy;
use serde::Serialize;
use std::collections::BTreeMap;

/// When and at what interest cost a single debt was retired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffEvent {
    pub debt_id: DebtId,
    pub name: String,
    /// 1-based month in which the balance reached zero.
    pub month: u32,
    #[serde(serialize_with = "Money::serialize_cents")]
    pub interest_paid: Money,
}

/// Outcome of a simulation that cleared every debt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub strategy: Strategy,
    #[serde(serialize_with = "Money::serialize_cents")]
    pub extra_monthly_payment: Money,
    pub total_months: u32,
    #[serde(serialize_with = "Money::serialize_cents")]
    pub total_interest_paid: Money,
    pub payoff_month_by_debt_id: BTreeMap<DebtId, u32>,
    /// Initial priority order, top priority first.
    pub priority_order: Vec<DebtId>,
    /// Payoffs sorted by month, then by priority within a month.
    pub timeline: Vec<PayoffEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<MonthTrace>>,
}

impl SimulationResult {
    pub fn payoff_month(&self, debt_id: &str) -> Option<u32> {
        self.payoff_month_by_debt_id.get(debt_id).copied()
    }

    /// One-line, human readable summary of the plan.
    pub fn narrative(&self) -> String {
        if self.total_months == 0 {
            return "You have no debts to pay off.".to_string();
        }
        format!(
            "Using the {} method with an extra {}/month, you'll be debt-free in {}, paying {} in interest.",
            self.strategy,
            self.extra_monthly_payment,
            describe_months(self.total_months),
            self.total_interest_paid,
        )
    }
}

fn describe_months(months: u32) -> String {
    let plural = |n: u32, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };
    let (years, rest) = (months / 12, months % 12);
    match (years, rest) {
        (0, _) => plural(months, "month"),
        (_, 0) => format!("{} ({})", plural(months, "month"), plural(years, "year")),
        _ => format!(
            "{} ({}, {})",
            plural(months, "month"),
            plural(years, "year"),
            plural(rest, "month")
        ),
    }
}

/// Assembles the caller-facing result from a cleared schedule.
pub fn aggregate(
    schedule: Schedule,
    strategy: Strategy,
    extra_monthly_payment: Money,
) -> SimulationResult {
    let payoff_month_by_debt_id = schedule
        .payoffs
        .iter()
        .map(|p| (p.debt_id.clone(), p.month))
        .collect();

    let timeline = schedule
        .payoffs
        .into_iter()
        .map(|p| PayoffEvent {
            debt_id: p.debt_id,
            name: p.name,
            month: p.month,
            interest_paid: p.interest_paid,
        })
        .collect();

    SimulationResult {
        strategy,
        extra_monthly_payment,
        total_months: schedule.total_months,
        total_interest_paid: schedule.total_interest_paid,
        payoff_month_by_debt_id,
        priority_order: schedule.priority_order,
        timeline,
        trace: schedule.trace,
    }
}
