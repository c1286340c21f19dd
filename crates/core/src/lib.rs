//! Cycle-accurate out-of-order pipeline simulator library.
//!
//! This crate implements a Tomasulo-style superscalar pipeline simulator with the following:
//! 1. **Pipeline:** six-stage state machine (Fetch, Dispatch, Schedule, Execute, State Update)
//!    driven by a cycle loop split into half-cycle phases.
//! 2. **Scheduling:** register scoreboard with conditional release, bounded reservation
//!    station, and per-class function-unit pools.
//! 3. **Trace input:** pull-based `TraceSource` abstraction and a text-format reader.
//! 4. **Observability:** per-cycle stage-transition event stream and aggregate statistics.
//! 5. **Simulation:** `Simulator` facade (validates configuration, owns the pipeline,
//!    runs to completion) and the final report.

/// Shared types: architectural register domain and error taxonomy.
pub mod common;
/// Simulator configuration (defaults, validation, JSON deserialization).
pub mod config;
/// Stage-transition event stream.
pub mod event;
/// Pipeline: driver, instruction records, scoreboard, station, function units.
pub mod pipeline;
/// Simulation: `Simulator` facade and run loop.
pub mod sim;
/// Statistics accumulation and the final report.
pub mod stats;
/// Trace input: records, sources, and the text-format reader.
pub mod trace;

/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Top-level simulator; owns the pipeline and runs it to completion.
pub use crate::sim::Simulator;
/// Final report with the headline numbers.
pub use crate::stats::{SimReport, SimStats};
