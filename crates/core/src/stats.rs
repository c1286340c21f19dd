//! Simulation statistics collection and reporting.
//!
//! This module tracks the aggregate performance numbers. It provides:
//! 1. **Running counters:** fired and retired instruction totals plus
//!    dispatch-queue occupancy sums and maxima, sampled at cycle start.
//! 2. **Report:** the six headline numbers derived once the pipeline drains.

use serde::Serialize;

/// Running statistics accumulated by the pipeline driver.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Total simulated cycles elapsed.
    pub cycles: u64,
    /// Instructions that seized a function unit (entered execute).
    pub total_fired: u64,
    /// Instructions that completed state update.
    pub total_retired: u64,
    /// Sum over cycles of the dispatch-queue depth sampled at cycle start.
    pub total_dispatch_size: u64,
    /// Largest dispatch-queue depth sampled at any cycle start.
    pub max_dispatch_size: usize,
}

impl SimStats {
    /// Records the dispatch-queue depth observed at the start of a cycle.
    pub fn sample_dispatch_queue(&mut self, depth: usize) {
        self.total_dispatch_size += depth as u64;
        self.max_dispatch_size = self.max_dispatch_size.max(depth);
    }

    /// Derives the final report.
    pub fn report(&self) -> SimReport {
        // Guard: a report taken before the first tick divides by one, not zero.
        let cycles = self.cycles.max(1) as f64;
        SimReport {
            avg_inst_fired: self.total_fired as f64 / cycles,
            avg_inst_retired: self.total_retired as f64 / cycles,
            avg_disp_size: self.total_dispatch_size as f64 / cycles,
            total_retired: self.total_retired,
            max_disp_size: self.max_dispatch_size,
            cycles: self.cycles,
        }
    }
}

/// Final report: the headline numbers of a completed run.
#[derive(Clone, Debug, Serialize)]
pub struct SimReport {
    /// Average instructions fired per cycle.
    pub avg_inst_fired: f64,
    /// Average instructions retired per cycle.
    pub avg_inst_retired: f64,
    /// Average dispatch-queue depth at cycle start.
    pub avg_disp_size: f64,
    /// Instructions that completed state update.
    pub total_retired: u64,
    /// Maximum dispatch-queue depth at any cycle start.
    pub max_disp_size: usize,
    /// Total simulated cycles.
    pub cycles: u64,
}

impl SimReport {
    /// Prints the report to stdout in the fixed-width text layout.
    pub fn print(&self) {
        println!("==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts_retired        {}", self.total_retired);
        println!("avg_inst_fired           {:.4}", self.avg_inst_fired);
        println!("avg_inst_retired         {:.4}", self.avg_inst_retired);
        println!("avg_disp_size            {:.4}", self.avg_disp_size);
        println!("max_disp_size            {}", self.max_disp_size);
        println!("==========================================================");
    }
}
