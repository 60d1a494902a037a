//! MolFS Simulation
//!
//! Canal de transmission ADN bruité pour éprouver le codec:
//! substitutions, insertions et délétions à taux configurables,
//! reproductibles par seed.

pub mod channel;
pub mod error_model;
pub mod metrics;

pub use channel::NoisyChannel;
pub use error_model::ErrorModel;
pub use metrics::{MetricsCollector, SimulationMetrics};
