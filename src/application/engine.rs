use super::aggregator::{SimulationResult, aggregate};
use super::orderer::{ReorderPolicy, StaticOrderer};
use super::simulator::{SimulationConfig, Simulator};
use super::validator::validate;
use crate::domain::debt::Debt;
use crate::domain::money::Money;
use crate::domain::ports::{Orderer, OrdererBox};
use crate::domain::strategy::Strategy;
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// The main entry point for debt payoff simulations.
///
/// `PayoffEngine` owns the ordering policy and run configuration. It holds no
/// per-run state, so one engine can serve any number of concurrent callers.
pub struct PayoffEngine {
    orderer: OrdererBox,
    config: SimulationConfig,
}

impl PayoffEngine {
    /// Creates a new `PayoffEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `orderer` - The policy deciding which debt receives the extra payment.
    /// * `config` - Month cap and trace recording.
    pub fn new(orderer: OrdererBox, config: SimulationConfig) -> Self {
        Self { orderer, config }
    }

    /// Creates an engine using the built-in orderer for `policy`.
    pub fn with_policy(policy: ReorderPolicy, config: SimulationConfig) -> Self {
        Self::new(policy.orderer(), config)
    }

    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    /// Priority order for `strategy` without running a simulation.
    pub fn order(&self, debts: &[Debt], strategy: Strategy) -> Vec<Debt> {
        self.orderer.order(debts, strategy)
    }

    /// Validates the input, then simulates until every debt is paid.
    ///
    /// The caller's `debts` are only read; the run works on its own copy.
    pub fn simulate(
        &self,
        debts: &[Debt],
        strategy: Strategy,
        extra_monthly_payment: Money,
    ) -> Result<SimulationResult> {
        validate(debts, extra_monthly_payment)?;

        let ordered = self.orderer.order(debts, strategy);
        debug!(
            %strategy,
            debts = ordered.len(),
            extra = %extra_monthly_payment,
            "starting simulation"
        );

        let schedule = Simulator::new(
            self.orderer.as_ref(),
            strategy,
            self.config,
            ordered,
            extra_monthly_payment,
        )
        .run()?;

        Ok(aggregate(schedule, strategy, extra_monthly_payment))
    }

    /// Simulates every strategy side by side, each on its own blocking task.
    ///
    /// Results come back in `Strategy::ALL` order.
    pub async fn compare(
        self: Arc<Self>,
        debts: Arc<[Debt]>,
        extra_monthly_payment: Money,
    ) -> Result<Vec<SimulationResult>> {
        let handles: Vec<_> = Strategy::ALL
            .into_iter()
            .map(|strategy| {
                let engine = Arc::clone(&self);
                let debts = Arc::clone(&debts);
                tokio::task::spawn_blocking(move || {
                    engine.simulate(&debts, strategy, extra_monthly_payment)
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await??);
        }
        Ok(results)
    }
}

impl Default for PayoffEngine {
    fn default() -> Self {
        Self::new(Box::new(StaticOrderer), SimulationConfig::default())
    }
}

/// Simulates `debts` with the default static ordering and a 600-month cap.
pub fn simulate(
    debts: &[Debt],
    strategy: Strategy,
    extra_monthly_payment: Money,
) -> Result<SimulationResult> {
    PayoffEngine::default().simulate(debts, strategy, extra_monthly_payment)
}

/// Priority order for `strategy`, computed from the debts as given.
pub fn order(debts: &[Debt], strategy: Strategy) -> Vec<Debt> {
    StaticOrderer.order(debts, strategy)
}
