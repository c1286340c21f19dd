//! Pipeline driver: the cycle loop.
//!
//! Advances simulated time one cycle at a time. Each cycle increments the
//! clock, samples the dispatch-queue depth, then runs two half-cycles that
//! mirror the hardware convention:
//!
//! * **first half** — complete execution (results fired last cycle become
//!   available), state update (up to `R` results broadcast), ready-bit
//!   propagation (sources waiting on a broadcast producer wake), fire (ready
//!   entries seize function units in tag order);
//! * **second half** — schedule (dispatch-queue heads move into free station
//!   slots), dispatch (the fetch buffer latches into the dispatch queue,
//!   capturing source producers and claiming destinations), eviction (entries
//!   that broadcast this cycle leave the station), fetch (up to `F` records
//!   read from the trace).
//!
//! The ordering carries the latency semantics: state update runs before
//! ready-bit propagation so a result broadcast in cycle `c` can release a
//! consumer that fires in cycle `c`; fire runs before schedule so a newly
//! scheduled instruction never fires in its schedule cycle; dispatch runs
//! after schedule so the queue depth sampled at cycle start reflects the
//! latched queue, not this cycle's departures.
//!
//! Source readiness is captured at dispatch, check-before-claim in program
//! order, so the producer a source waits on is always the most recent
//! *earlier* writer of its register. Waiting on the live scoreboard instead
//! would interlock a write-after-read pair dispatched in one group, each
//! watching the other's claim.

use std::collections::VecDeque;
use std::io::Write;

use crate::common::error::SimError;
use crate::config::SimConfig;
use crate::event::{EventLog, Stage};
use crate::pipeline::fu_pool::FuPool;
use crate::pipeline::inst::{Instruction, Tag};
use crate::pipeline::scoreboard::Scoreboard;
use crate::pipeline::station::ReservationStation;
use crate::stats::SimStats;
use crate::trace::TraceSource;

/// Cycle-accurate pipeline over a trace source, reporting events into `out`.
#[derive(Debug)]
pub struct Pipeline<T, W> {
    trace: T,
    events: EventLog<W>,
    scoreboard: Scoreboard,
    fu_pool: FuPool,
    station: ReservationStation,
    dispatch_queue: VecDeque<Instruction>,
    fetch_buffer: Vec<Instruction>,
    /// Tags that broadcast in the current first half, evicted in the second.
    retired_this_cycle: Vec<Tag>,
    stats: SimStats,
    cycle: u64,
    next_tag: u64,
    result_buses: usize,
    fetch_rate: usize,
    done_fetching: bool,
}

impl<T: TraceSource, W: Write> Pipeline<T, W> {
    /// Builds a pipeline. The configuration must already be validated.
    pub fn new(config: &SimConfig, trace: T, out: W) -> Self {
        Self {
            trace,
            events: EventLog::new(out),
            scoreboard: Scoreboard::new(),
            fu_pool: FuPool::new(config.fu_counts),
            station: ReservationStation::new(config.rs_capacity()),
            dispatch_queue: VecDeque::new(),
            fetch_buffer: Vec::new(),
            retired_this_cycle: Vec::new(),
            stats: SimStats::default(),
            cycle: 0,
            next_tag: 1,
            result_buses: config.result_buses,
            fetch_rate: config.fetch_rate,
            done_fetching: false,
        }
    }

    /// Current cycle number (0 before the first tick).
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Running statistics.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// True when the trace is exhausted and every buffer has drained.
    pub fn is_drained(&self) -> bool {
        self.done_fetching
            && self.fetch_buffer.is_empty()
            && self.dispatch_queue.is_empty()
            && self.station.is_empty()
    }

    /// Flushes the event stream so line ordering survives process exit.
    pub fn flush_events(&mut self) -> Result<(), SimError> {
        self.events.flush()?;
        Ok(())
    }

    /// Advances the pipeline by one cycle.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.cycle += 1;
        self.stats.sample_dispatch_queue(self.dispatch_queue.len());

        // First half
        self.complete_execution();
        self.state_update()?;
        self.propagate_ready();
        self.fire()?;

        // Second half
        self.schedule()?;
        self.dispatch()?;
        self.evict_retired();
        self.fetch()?;

        self.stats.cycles = self.cycle;
        debug_assert!(self.station.len() <= self.station.capacity());
        Ok(())
    }

    /// Results fired last cycle become available now (single-cycle latency).
    fn complete_execution(&mut self) {
        let cycle = self.cycle;
        for inst in self.station.iter_mut() {
            if inst.fired && !inst.execution_complete && inst.execute_cycle.is_some_and(|c| c < cycle)
            {
                inst.execution_complete = true;
                inst.complete_cycle = Some(cycle);
            }
        }
    }

    /// Broadcasts up to `R` completed results.
    ///
    /// Selection is `(complete_cycle, tag)` ascending: older completions win
    /// buses, tag order breaks ties. Each broadcast frees the instruction's
    /// function unit and conditionally releases its scoreboard claim — a
    /// later dispatch to the same register must keep its claim.
    fn state_update(&mut self) -> Result<(), SimError> {
        let mut pending: Vec<(u64, Tag)> = self
            .station
            .iter()
            .filter(|inst| inst.execution_complete && inst.state_update_cycle.is_none())
            .filter_map(|inst| inst.complete_cycle.map(|cycle| (cycle, inst.tag)))
            .collect();
        pending.sort_unstable();
        pending.truncate(self.result_buses);

        let cycle = self.cycle;
        for (_, tag) in pending {
            let Some(inst) = self.station.get_mut(tag) else {
                continue;
            };
            if let Some(slot) = inst.fu_slot.take() {
                self.fu_pool.release(inst.class, slot);
            }
            if let Some(dest) = inst.dest {
                self.scoreboard.release(dest, inst.tag);
            }
            inst.state_update_cycle = Some(cycle);
            self.stats.total_retired += 1;
            self.retired_this_cycle.push(tag);
            self.events.emit(cycle, Stage::StateUpdate, tag)?;
        }
        Ok(())
    }

    /// Wakes source operands whose captured producer broadcast this cycle.
    ///
    /// Runs after state update so this cycle's broadcasts release consumers
    /// that can still fire this cycle. Waiters in the dispatch queue are
    /// woken too; a producer can retire before its consumer is scheduled.
    /// Ready bits are sticky: a later reclaim of the register must not
    /// re-clear them.
    fn propagate_ready(&mut self) {
        if self.retired_this_cycle.is_empty() {
            return;
        }
        let broadcasts = &self.retired_this_cycle;
        for inst in self
            .station
            .iter_mut()
            .chain(self.dispatch_queue.iter_mut())
        {
            if inst.fired {
                continue;
            }
            for operand in &mut inst.src {
                if !operand.ready
                    && operand
                        .producer
                        .is_some_and(|producer| broadcasts.contains(&producer))
                {
                    operand.ready = true;
                }
            }
        }
    }

    /// Wakeup/select: ready, unfired entries seize function units in tag order.
    fn fire(&mut self) -> Result<(), SimError> {
        let cycle = self.cycle;
        let candidates = self
            .station
            .tags_where(|inst| !inst.fired && inst.operands_ready());
        for tag in candidates {
            let Some(inst) = self.station.get_mut(tag) else {
                continue;
            };
            let Some(slot) = self.fu_pool.acquire(inst.class) else {
                continue;
            };
            inst.fired = true;
            inst.execute_cycle = Some(cycle);
            inst.fu_slot = Some(slot);
            self.stats.total_fired += 1;
            self.events.emit(cycle, Stage::Executed, tag)?;
        }
        Ok(())
    }

    /// Moves dispatch-queue heads into free station slots.
    ///
    /// Ready bits were captured at dispatch and kept current by broadcasts,
    /// so scheduling is a pure move into the station.
    fn schedule(&mut self) -> Result<(), SimError> {
        let cycle = self.cycle;
        while self.station.has_space() {
            let Some(mut inst) = self.dispatch_queue.pop_front() else {
                break;
            };
            inst.schedule_cycle = Some(cycle);
            let tag = inst.tag;
            self.station.insert(inst);
            self.events.emit(cycle, Stage::Scheduled, tag)?;
        }
        Ok(())
    }

    /// Latches the fetch buffer into the dispatch queue.
    ///
    /// Per instruction, in program order: sources are checked *before* the
    /// destination is claimed, so a captured producer is always an earlier
    /// instruction. A source with no register is ready; a source naming the
    /// instruction's own destination is ready (self-dependence carries no
    /// hazard); otherwise the source waits on the scoreboard's current
    /// claimant, if any. The claim itself is unconditional: the latest
    /// dispatched writer always owns the scoreboard entry.
    fn dispatch(&mut self) -> Result<(), SimError> {
        let cycle = self.cycle;
        for mut inst in self.fetch_buffer.drain(..) {
            inst.dispatch_cycle = Some(cycle);
            for operand in &mut inst.src {
                match operand.reg {
                    None => operand.ready = true,
                    Some(reg) if Some(reg) == inst.dest => operand.ready = true,
                    Some(reg) => match self.scoreboard.producer(reg) {
                        None => operand.ready = true,
                        Some(producer) => operand.producer = Some(producer),
                    },
                }
            }
            if let Some(dest) = inst.dest {
                self.scoreboard.claim(dest, inst.tag);
            }
            let tag = inst.tag;
            self.dispatch_queue.push_back(inst);
            self.events.emit(cycle, Stage::Dispatched, tag)?;
        }
        Ok(())
    }

    /// Entries that broadcast this cycle leave the station.
    fn evict_retired(&mut self) {
        if !self.retired_this_cycle.is_empty() {
            self.station.evict(&self.retired_this_cycle);
            self.retired_this_cycle.clear();
        }
    }

    /// Reads up to the fetch rate from the trace into the fetch buffer.
    /// End-of-trace stops fetching for good; there is no partial retry.
    fn fetch(&mut self) -> Result<(), SimError> {
        if self.done_fetching {
            return Ok(());
        }
        let cycle = self.cycle;
        for _ in 0..self.fetch_rate {
            let Some(record) = self.trace.next_record() else {
                self.done_fetching = true;
                break;
            };
            let tag = Tag(self.next_tag);
            self.next_tag += 1;
            self.fetch_buffer.push(Instruction::fetch(tag, &record, cycle));
            self.events.emit(cycle, Stage::Fetched, tag)?;
        }
        Ok(())
    }
}
