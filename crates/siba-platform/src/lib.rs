//! Browser adapters for the core ports.

pub mod timer;
pub mod entropy;

pub use timer::TimeoutDelay;
pub use entropy::MathRandom;
