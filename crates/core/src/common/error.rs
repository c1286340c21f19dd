//! Error taxonomy for the simulator.
//!
//! The error surface is deliberately small:
//! 1. **Configuration:** zero-valued structural parameters, rejected before setup.
//! 2. **I/O:** event-stream write or flush failures, propagated to the caller.
//!
//! A malformed trace is *not* an error — the reader treats it as a clean
//! end-of-trace and the pipeline drains (see [`crate::trace`]).

use thiserror::Error;

/// Invalid configuration detected before setup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A structural parameter was zero; the pipeline assumes positive counts.
    #[error("configuration field `{0}` must be positive")]
    ZeroField(&'static str),
}

/// Top-level simulation failure.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected by [`crate::config::SimConfig::validate`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The event stream could not be written or flushed.
    #[error("event stream write failed: {0}")]
    Io(#[from] std::io::Error),
}
