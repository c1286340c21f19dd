//! Stage-transition event stream.
//!
//! Every observable stage transition is reported as one line
//! `<cycle>\t<STAGE>\t<tag>` on an append-only text stream. Within a cycle,
//! lines appear in the order the originating phases run; within a phase, in
//! the phase's own order (tag order for fire and state-update selection,
//! FIFO order for schedule, dispatch, and fetch). The stream must be flushed
//! before statistics are reported so line ordering survives process exit.

use std::fmt;
use std::io::{self, Write};

use crate::pipeline::inst::Tag;

/// Pipeline stage named in an event line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Instruction read from the trace into the fetch buffer.
    Fetched,
    /// Instruction latched into the dispatch queue; destination claimed.
    Dispatched,
    /// Instruction moved from the dispatch queue into the reservation station.
    Scheduled,
    /// Instruction seized a function unit and is executing this cycle.
    Executed,
    /// Instruction broadcast its result and retired.
    StateUpdate,
}

impl Stage {
    /// Stage label exactly as it appears in the event stream.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Fetched => "FETCHED",
            Stage::Dispatched => "DISPATCHED",
            Stage::Scheduled => "SCHEDULED",
            Stage::Executed => "EXECUTED",
            Stage::StateUpdate => "STATE UPDATE",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Append-only writer for the event stream.
#[derive(Debug)]
pub struct EventLog<W> {
    out: W,
}

impl<W: Write> EventLog<W> {
    /// Wraps an output stream.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Appends one event line.
    pub fn emit(&mut self, cycle: u64, stage: Stage, tag: Tag) -> io::Result<()> {
        writeln!(self.out, "{cycle}\t{stage}\t{tag}")
    }

    /// Flushes the underlying stream.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
