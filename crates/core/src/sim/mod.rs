//! Simulation: the `Simulator` facade and its run loop.

/// Top-level simulator; validates configuration and runs the pipeline.
pub mod simulator;

pub use simulator::Simulator;
