//! Common types shared across the simulator.
//!
//! This module collects the small cross-cutting definitions:
//! 1. **Registers:** the architectural register domain visible to traces.
//! 2. **Errors:** the configuration and simulation error taxonomy.

/// Error taxonomy for configuration and simulation failures.
pub mod error;
/// Architectural register domain.
pub mod reg;

pub use error::{ConfigError, SimError};
pub use reg::{REG_COUNT, RegIndex};
