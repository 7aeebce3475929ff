//! Domain layer: value objects and the pure policies the engine is built from.

pub mod debt;
pub mod money;
pub mod ports;
pub mod strategy;
