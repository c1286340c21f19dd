//! The out-of-order pipeline.
//!
//! This module contains the simulated machine proper:
//! 1. **Records:** [`inst`] — in-flight instruction records with stage stamps.
//! 2. **Hazard tracking:** [`scoreboard`] — latest pending writer per register.
//! 3. **Resources:** [`fu_pool`] — per-class function-unit availability.
//! 4. **Buffering:** [`station`] — the bounded reservation station.
//! 5. **Control:** [`driver`] — the cycle loop and its half-cycle phases.

/// Pipeline driver: the cycle loop and half-cycle phase ordering.
pub mod driver;
/// Per-class function-unit pools.
pub mod fu_pool;
/// In-flight instruction records, tags, and function-unit classes.
pub mod inst;
/// Register scoreboard with conditional release.
pub mod scoreboard;
/// Bounded reservation station.
pub mod station;

pub use driver::Pipeline;
pub use inst::{FuClass, Instruction, Tag};
