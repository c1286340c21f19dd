//! Configuration for the pipeline simulator.
//!
//! This module defines the structural parameters of the simulated machine. It provides:
//! 1. **Defaults:** baseline hardware constants (result buses, function units, fetch rate).
//! 2. **Validation:** rejection of zero-valued parameters before setup.
//! 3. **Deserialization:** JSON via serde for the CLI `--config` path; every field
//!    defaults independently, so partial documents are accepted.
//!
//! The register file is fixed at [`REG_COUNT`](crate::common::reg::REG_COUNT)
//! architectural registers and is not configurable. The reservation-station
//! capacity is derived, never set directly.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulated machine.
mod defaults {
    /// Result buses: completed instructions that may state-update per cycle.
    pub const RESULT_BUSES: usize = 8;

    /// Function units per class (classes 0, 1, 2).
    pub const FU_COUNTS: [usize; 3] = [1, 2, 3];

    /// Instructions fetched from the trace per cycle.
    pub const FETCH_RATE: usize = 4;
}

/// Structural parameters of the simulated pipeline.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use tomsim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.result_buses, 8);
/// assert_eq!(config.fu_counts, [1, 2, 3]);
/// assert_eq!(config.rs_capacity(), 12);
/// ```
///
/// Deserializing a partial JSON document (unset fields keep their defaults):
///
/// ```
/// use tomsim_core::config::SimConfig;
///
/// let json = r#"{ "result_buses": 2, "fu_counts": [1, 1, 1] }"#;
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.result_buses, 2);
/// assert_eq!(config.fetch_rate, 4);
/// assert_eq!(config.rs_capacity(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimConfig {
    /// Result buses: state updates per cycle (`R`).
    #[serde(default = "SimConfig::default_result_buses")]
    pub result_buses: usize,

    /// Function units per class (`k0`, `k1`, `k2`).
    #[serde(default = "SimConfig::default_fu_counts")]
    pub fu_counts: [usize; 3],

    /// Instructions fetched from the trace per cycle (`F`).
    #[serde(default = "SimConfig::default_fetch_rate")]
    pub fetch_rate: usize,
}

impl SimConfig {
    /// Returns the default result-bus count.
    fn default_result_buses() -> usize {
        defaults::RESULT_BUSES
    }

    /// Returns the default function-unit counts per class.
    fn default_fu_counts() -> [usize; 3] {
        defaults::FU_COUNTS
    }

    /// Returns the default fetch rate.
    fn default_fetch_rate() -> usize {
        defaults::FETCH_RATE
    }

    /// Reservation-station capacity, derived as twice the total function-unit count.
    pub fn rs_capacity(&self) -> usize {
        2 * self.fu_counts.iter().sum::<usize>()
    }

    /// Rejects zero-valued structural parameters.
    ///
    /// The pipeline assumes every count is positive; callers must validate
    /// before setup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.result_buses == 0 {
            return Err(ConfigError::ZeroField("result_buses"));
        }
        const CLASS_NAMES: [&str; 3] = ["k0", "k1", "k2"];
        for (&name, &count) in CLASS_NAMES.iter().zip(self.fu_counts.iter()) {
            if count == 0 {
                return Err(ConfigError::ZeroField(name));
            }
        }
        if self.fetch_rate == 0 {
            return Err(ConfigError::ZeroField("fetch_rate"));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            result_buses: defaults::RESULT_BUSES,
            fu_counts: defaults::FU_COUNTS,
            fetch_rate: defaults::FETCH_RATE,
        }
    }
}
