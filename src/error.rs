use crate::domain::debt::DebtId;
use crate::domain::money::Money;
use miette::Diagnostic;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PayoffError>;

#[derive(Error, Diagnostic, Debug)]
pub enum PayoffError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("debts were not cleared after {months} months")]
    #[diagnostic(
        code(payoff::non_convergence),
        help(
            "the payments never outpace the interest on at least one debt; \
             raise its minimum payment or the extra monthly payment"
        )
    )]
    NonConvergence {
        months: u32,
        partial: Box<PartialState>,
    },

    #[error("CSV error: {0}")]
    #[diagnostic(code(payoff::csv))]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(payoff::io))]
    Io(#[from] std::io::Error),

    #[error("simulation task failed: {0}")]
    #[diagnostic(code(payoff::task))]
    Task(#[from] tokio::task::JoinError),
}

/// Malformed simulation input. The whole batch is rejected on the first violation.
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum ValidationError {
    #[error("debt `{debt_id}` has a non-positive balance ({balance})")]
    #[diagnostic(
        code(payoff::validation::balance),
        help("paid-off debts should be left out of the input")
    )]
    NonPositiveBalance { debt_id: DebtId, balance: Decimal },

    #[error("debt `{debt_id}` has a negative interest rate ({rate}%)")]
    #[diagnostic(code(payoff::validation::rate))]
    NegativeRate { debt_id: DebtId, rate: Decimal },

    #[error("debt `{debt_id}` has a non-positive minimum payment ({payment})")]
    #[diagnostic(code(payoff::validation::minimum_payment))]
    NonPositiveMinimumPayment { debt_id: DebtId, payment: Decimal },

    #[error("extra monthly payment must not be negative ({0})")]
    #[diagnostic(code(payoff::validation::extra_payment))]
    NegativeExtraPayment(Decimal),

    #[error("debt id `{0}` appears more than once")]
    #[diagnostic(code(payoff::validation::duplicate_id))]
    DuplicateDebtId(DebtId),
}

/// Simulator state at the moment a run was abandoned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartialState {
    pub total_interest_paid: Money,
    pub payoff_month_by_debt_id: BTreeMap<DebtId, u32>,
    /// Debts still carrying a balance, in priority order.
    pub remaining: Vec<(DebtId, Money)>,
}
