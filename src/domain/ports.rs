use super::debt::Debt;
use super::strategy::Strategy;

/// Decides which active debt receives the extra-payment pool.
///
/// The simulator only ever talks to this trait, so the ordering policy can be
/// replaced without touching the month loop.
pub trait Orderer: Send + Sync {
    /// Initial priority order. Index 0 is the top priority.
    fn order(&self, debts: &[Debt], strategy: Strategy) -> Vec<Debt>;

    /// Called at the start of every month after the first with the still-active
    /// debts in their current priority order.
    fn reorder(&self, active: &mut [Debt], strategy: Strategy) {
        let _ = (active, strategy);
    }
}

pub type OrdererBox = Box<dyn Orderer>;
