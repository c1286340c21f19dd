//! In-flight instruction records.
//!
//! An [`Instruction`] is created at fetch with a fresh tag and destroyed when
//! it leaves the reservation station after state update. It accumulates one
//! cycle stamp per stage on the way through, which is what the event stream
//! and the stage-monotonicity guarantees are built on.

use std::fmt;

use crate::common::reg::RegIndex;
use crate::trace::TraceRecord;

/// Unique, monotonically assigned identifier of an in-flight instruction (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tag(pub u64);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Function-unit class resolved from the trace opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FuClass {
    /// Class 0 units.
    Class0,
    /// Class 1 units (also the home of the −1 "none" opcode).
    Class1,
    /// Class 2 units.
    Class2,
}

impl FuClass {
    /// Resolves a trace opcode: 0 and 2 map verbatim, everything else
    /// (including the −1 sentinel) lands in class 1.
    pub fn from_op_code(op_code: i32) -> Self {
        match op_code {
            0 => FuClass::Class0,
            2 => FuClass::Class2,
            _ => FuClass::Class1,
        }
    }

    /// Pool index of this class.
    pub fn index(self) -> usize {
        match self {
            FuClass::Class0 => 0,
            FuClass::Class1 => 1,
            FuClass::Class2 => 2,
        }
    }
}

/// One source operand: an optional register, the pending writer it waits on,
/// and a sticky ready bit.
#[derive(Clone, Copy, Debug)]
pub struct Operand {
    /// Architectural register this operand reads, if any.
    pub reg: Option<RegIndex>,
    /// Pending writer captured at dispatch. Always an earlier instruction:
    /// the capture happens before this instruction's own claim.
    pub producer: Option<Tag>,
    /// Readiness. Set at dispatch or by a matching broadcast; never cleared,
    /// even if a later dispatch reclaims the same register.
    pub ready: bool,
}

/// An in-flight instruction, from fetch until eviction after state update.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Unique tag, assigned at fetch.
    pub tag: Tag,
    /// Originating address from the trace. Opaque; reported only.
    pub address: u32,
    /// Function-unit class this instruction executes on.
    pub class: FuClass,
    /// Destination register, if the instruction writes one.
    pub dest: Option<RegIndex>,
    /// Source operands.
    pub src: [Operand; 2],
    /// Cycle the instruction was read from the trace.
    pub fetch_cycle: u64,
    /// Cycle the instruction entered the dispatch queue.
    pub dispatch_cycle: Option<u64>,
    /// Cycle the instruction entered the reservation station.
    pub schedule_cycle: Option<u64>,
    /// Cycle the instruction seized its function unit.
    pub execute_cycle: Option<u64>,
    /// Cycle the result became available (always execute + 1).
    pub complete_cycle: Option<u64>,
    /// Cycle the result was broadcast on a result bus.
    pub state_update_cycle: Option<u64>,
    /// Whether the instruction has seized a function unit.
    pub fired: bool,
    /// Whether the result is available for state update.
    pub execution_complete: bool,
    /// Function-unit slot held between fire and state update.
    pub fu_slot: Option<usize>,
}

impl Instruction {
    /// Builds a fresh record at fetch time.
    pub fn fetch(tag: Tag, record: &TraceRecord, cycle: u64) -> Self {
        let operand = |slot| Operand {
            reg: record.src(slot),
            producer: None,
            ready: false,
        };
        Self {
            tag,
            address: record.address,
            class: FuClass::from_op_code(record.op_code),
            dest: record.dest(),
            src: [operand(0), operand(1)],
            fetch_cycle: cycle,
            dispatch_cycle: None,
            schedule_cycle: None,
            execute_cycle: None,
            complete_cycle: None,
            state_update_cycle: None,
            fired: false,
            execution_complete: false,
            fu_slot: None,
        }
    }

    /// True when both source operands are ready.
    pub fn operands_ready(&self) -> bool {
        self.src.iter().all(|operand| operand.ready)
    }
}
