use super::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque, caller-assigned identifier of a debt.
pub type DebtId = String;

/// One owed balance being tracked.
///
/// The engine never mutates a caller's `Debt`; simulations run on their own
/// copies and only ever reduce `balance` on those copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    /// Display label, carried through to the payoff timeline.
    #[serde(default)]
    pub name: String,
    pub balance: Money,
    /// Annual percentage rate, e.g. `24.99` for 24.99% APR.
    pub annual_rate_percent: Decimal,
    pub minimum_payment: Money,
}

impl Debt {
    pub fn new(
        id: impl Into<DebtId>,
        name: impl Into<String>,
        balance: Decimal,
        annual_rate_percent: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance: Money::new(balance),
            annual_rate_percent,
            minimum_payment: Money::new(minimum_payment),
        }
    }

    pub fn is_paid(&self) -> bool {
        !self.balance.is_positive()
    }
}
