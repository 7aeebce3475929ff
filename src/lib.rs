pub mod application;
pub mod domain;
pub mod error;
pub mod interfaces;
pub mod logging;

pub use application::{PayoffEngine, SimulationConfig, SimulationResult, order, simulate};
pub use domain::debt::Debt;
pub use domain::money::Money;
pub use domain::strategy::Strategy;
pub use error::{PayoffError, Result, ValidationError};
