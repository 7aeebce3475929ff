use crate::domain::debt::Debt;
use crate::domain::ports::{Orderer, OrdererBox};
use crate::domain::strategy::Strategy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Orders once from the initial balances and rates and never again.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticOrderer;

impl Orderer for StaticOrderer {
    fn order(&self, debts: &[Debt], strategy: Strategy) -> Vec<Debt> {
        let mut ordered = debts.to_vec();
        // `sort_by` is stable: ties keep their input position.
        ordered.sort_by(|a, b| strategy.compare(a, b));
        ordered
    }
}

/// Re-sorts the active debts every month from their current balances.
///
/// Ties keep their current relative position, which itself derives from
/// input order, so runs stay reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonthlyOrderer;

impl Orderer for MonthlyOrderer {
    fn order(&self, debts: &[Debt], strategy: Strategy) -> Vec<Debt> {
        StaticOrderer.order(debts, strategy)
    }

    fn reorder(&self, active: &mut [Debt], strategy: Strategy) {
        active.sort_by(|a, b| strategy.compare(a, b));
    }
}

/// Selects which `Orderer` a `PayoffEngine` is built with.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReorderPolicy {
    #[default]
    Static,
    Monthly,
}

impl ReorderPolicy {
    pub fn orderer(self) -> OrdererBox {
        match self {
            ReorderPolicy::Static => Box::new(StaticOrderer),
            ReorderPolicy::Monthly => Box::new(MonthlyOrderer),
        }
    }
}

impl FromStr for ReorderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(ReorderPolicy::Static),
            "monthly" => Ok(ReorderPolicy::Monthly),
            other => Err(format!(
                "unknown reorder policy `{other}` (expected `static` or `monthly`)"
            )),
        }
    }
}
