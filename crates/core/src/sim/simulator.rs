//! Top-level simulator: configuration + pipeline, run side-by-side.
//!
//! `Simulator` validates the configuration once, owns the pipeline, and
//! drives the cycle loop until the trace drains. Long runs log a progress
//! line periodically; the event stream is flushed before the report is
//! returned.

use std::io::Write;

use tracing::{debug, info};

use crate::common::error::SimError;
use crate::config::SimConfig;
use crate::pipeline::driver::Pipeline;
use crate::stats::SimReport;
use crate::trace::TraceSource;

/// Cycles between progress lines on the diagnostic stream.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Top-level simulator: owns the pipeline and runs it to completion.
#[derive(Debug)]
pub struct Simulator<T, W> {
    pipeline: Pipeline<T, W>,
}

impl<T: TraceSource, W: Write> Simulator<T, W> {
    /// Creates a simulator, rejecting zero-valued configuration fields.
    pub fn new(config: &SimConfig, trace: T, out: W) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            pipeline: Pipeline::new(config, trace, out),
        })
    }

    /// Runs the cycle loop until the pipeline drains, then returns the report.
    pub fn run(mut self) -> Result<SimReport, SimError> {
        while !self.pipeline.is_drained() {
            self.pipeline.tick()?;
            let cycle = self.pipeline.cycle();
            if cycle % PROGRESS_INTERVAL == 0 {
                info!(
                    cycle,
                    retired = self.pipeline.stats().total_retired,
                    "simulation progress"
                );
            }
        }
        self.pipeline.flush_events()?;

        let report = self.pipeline.stats().report();
        debug!(
            cycles = report.cycles,
            retired = report.total_retired,
            "simulation complete"
        );
        Ok(report)
    }
}
