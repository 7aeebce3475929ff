use crate::domain::debt::{Debt, DebtId};
use crate::domain::money::Money;
use crate::domain::ports::Orderer;
use crate::domain::strategy::Strategy;
use crate::error::{PartialState, PayoffError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// Months after which a run is declared non-convergent.
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// Tunables for a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Safety cap on the number of simulated months.
    pub max_months: u32,
    /// Record a per-month, per-debt trace alongside the totals.
    pub record_trace: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            record_trace: false,
        }
    }
}

/// One debt's activity within one simulated month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub debt_id: DebtId,
    #[serde(serialize_with = "Money::serialize_cents")]
    pub interest_accrued: Money,
    /// Share of the extra-payment pool directed at this debt.
    #[serde(serialize_with = "Money::serialize_cents")]
    pub extra_applied: Money,
    /// Amount actually absorbed by the debt, never more than it owed.
    #[serde(serialize_with = "Money::serialize_cents")]
    pub payment_applied: Money,
    #[serde(serialize_with = "Money::serialize_cents")]
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTrace {
    pub month: u32,
    /// Extra-payment pool available at the start of the month.
    #[serde(serialize_with = "Money::serialize_cents")]
    pub extra_pool: Money,
    /// Entries in the priority order used for the month.
    pub entries: Vec<TraceEntry>,
}

/// A debt reaching zero balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Payoff {
    pub debt_id: DebtId,
    pub name: String,
    pub month: u32,
    pub interest_paid: Money,
}

/// Final state of a run that cleared every debt.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub priority_order: Vec<DebtId>,
    pub total_months: u32,
    pub total_interest_paid: Money,
    /// Payoffs in the order they happened.
    pub payoffs: Vec<Payoff>,
    pub trace: Option<Vec<MonthTrace>>,
}

struct SettledDebt {
    interest: Money,
    owed: Money,
    extra: Money,
    payment: Money,
    balance: Money,
}

struct Settlement {
    total_interest: Money,
    next_pool: Money,
    rows: Vec<SettledDebt>,
}

/// Month-by-month amortization state machine.
///
/// Owns its working copy of the debts; the caller's list is never touched.
/// The extra-payment pool always goes in full to the debt at position 0, and
/// capacity freed by a retired debt (its minimum payment plus any overpayment)
/// joins the pool from the following month.
pub struct Simulator<'a> {
    orderer: &'a dyn Orderer,
    strategy: Strategy,
    config: SimulationConfig,
    priority_order: Vec<DebtId>,
    active: Vec<Debt>,
    pool: Money,
    month: u32,
    total_interest: Money,
    interest_by_debt: HashMap<DebtId, Money>,
    payoffs: Vec<Payoff>,
    trace: Option<Vec<MonthTrace>>,
}

impl<'a> Simulator<'a> {
    /// `ordered` must already be in initial priority order.
    pub fn new(
        orderer: &'a dyn Orderer,
        strategy: Strategy,
        config: SimulationConfig,
        ordered: Vec<Debt>,
        extra_monthly_payment: Money,
    ) -> Self {
        Self {
            orderer,
            strategy,
            config,
            priority_order: ordered.iter().map(|d| d.id.clone()).collect(),
            interest_by_debt: ordered
                .iter()
                .map(|d| (d.id.clone(), Money::ZERO))
                .collect(),
            active: ordered,
            pool: extra_monthly_payment,
            month: 1,
            total_interest: Money::ZERO,
            payoffs: Vec::new(),
            trace: config.record_trace.then(Vec::new),
        }
    }

    /// Advances month by month until every debt is paid.
    pub fn run(mut self) -> Result<Schedule> {
        while !self.active.is_empty() {
            if self.month > self.config.max_months {
                let months = self.config.max_months;
                return Err(self.abandon(months));
            }
            if !self.step() {
                let months = self.month - 1;
                return Err(self.abandon(months));
            }
        }

        Ok(Schedule {
            priority_order: self.priority_order,
            total_months: self.month - 1,
            total_interest_paid: self.total_interest,
            payoffs: self.payoffs,
            trace: self.trace,
        })
    }

    /// Simulates the current month. Returns `false`, leaving every balance as
    /// of the previous month, if any amount leaves the representable range.
    fn step(&mut self) -> bool {
        let month = self.month;
        if month > 1 {
            self.orderer.reorder(&mut self.active, self.strategy);
        }

        let pool = self.pool;
        debug!(month, pool = %pool, active = self.active.len(), "simulating month");

        let Some(settlement) = self.settle(pool) else {
            return false;
        };

        let mut entries = Vec::new();
        for (debt, row) in self.active.iter_mut().zip(settlement.rows) {
            debt.balance = row.balance;
            if let Some(accrued) = self.interest_by_debt.get_mut(&debt.id) {
                *accrued += row.interest;
            }

            if debt.is_paid() {
                info!(debt_id = %debt.id, month, "debt paid off");
                self.payoffs.push(Payoff {
                    debt_id: debt.id.clone(),
                    name: debt.name.clone(),
                    month,
                    interest_paid: self.interest_by_debt[&debt.id],
                });
            }

            if self.trace.is_some() {
                entries.push(TraceEntry {
                    debt_id: debt.id.clone(),
                    interest_accrued: row.interest,
                    extra_applied: row.extra,
                    payment_applied: row.payment.min(row.owed),
                    remaining_balance: debt.balance.floor_zero(),
                });
            }
        }

        if let Some(trace) = self.trace.as_mut() {
            trace.push(MonthTrace {
                month,
                extra_pool: pool,
                entries,
            });
        }

        self.active.retain(|debt| !debt.is_paid());
        self.total_interest = settlement.total_interest;
        self.pool = settlement.next_pool;
        self.month += 1;
        true
    }

    /// Computes the month's outcome for every active debt without applying it.
    fn settle(&self, pool: Money) -> Option<Settlement> {
        let mut total_interest = self.total_interest;
        let mut freed = Money::ZERO;
        let mut rows = Vec::with_capacity(self.active.len());

        for (position, debt) in self.active.iter().enumerate() {
            let interest = debt.balance.monthly_interest(debt.annual_rate_percent)?;
            total_interest = total_interest.checked_add(interest)?;
            let owed = debt.balance.checked_add(interest)?;

            let extra = if position == 0 { pool } else { Money::ZERO };
            let payment = debt.minimum_payment.checked_add(extra)?;
            let balance = owed.checked_sub(payment)?;

            if !balance.is_positive() {
                freed = freed
                    .checked_add(debt.minimum_payment)?
                    .checked_add(balance.abs())?;
            }

            rows.push(SettledDebt {
                interest,
                owed,
                extra,
                payment,
                balance,
            });
        }

        Some(Settlement {
            total_interest,
            next_pool: pool.checked_add(freed)?,
            rows,
        })
    }

    fn abandon(self, months: u32) -> PayoffError {
        warn!(
            months,
            remaining = self.active.len(),
            "payments never clear the remaining debts"
        );
        let payoff_month_by_debt_id: BTreeMap<DebtId, u32> = self
            .payoffs
            .iter()
            .map(|p| (p.debt_id.clone(), p.month))
            .collect();
        PayoffError::NonConvergence {
            months,
            partial: Box::new(PartialState {
                total_interest_paid: self.total_interest,
                payoff_month_by_debt_id,
                remaining: self
                    .active
                    .into_iter()
                    .filter(|d| !d.is_paid())
                    .map(|d| (d.id, d.balance))
                    .collect(),
            }),
        }
    }
}
