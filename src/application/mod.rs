//! Application layer: the simulation pipeline.
//!
//! Input flows validator -> orderer -> simulator -> aggregator. `PayoffEngine`
//! wires the stages together and exposes the two boundary operations,
//! `simulate` and `order`.

pub mod aggregator;
pub mod engine;
pub mod orderer;
pub mod simulator;
pub mod validator;

pub use aggregator::{PayoffEvent, SimulationResult};
pub use engine::{PayoffEngine, order, simulate};
pub use orderer::ReorderPolicy;
pub use simulator::SimulationConfig;
