//! Tag-based scoreboard for register dependency tracking.
//!
//! Maps each architectural register to the tag of its most recently
//! dispatched in-flight writer, or `None` if the value is architecturally
//! ready. This gives the wakeup logic a single lookup per source operand
//! instead of a scan over the reservation station.

use crate::common::reg::{REG_COUNT, RegIndex};
use crate::pipeline::inst::Tag;

/// Register scoreboard: latest pending writer per architectural register.
#[derive(Debug)]
pub struct Scoreboard {
    slots: [Option<Tag>; REG_COUNT],
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    /// Creates a scoreboard with every register ready (no pending writers).
    pub fn new() -> Self {
        Self {
            slots: [None; REG_COUNT],
        }
    }

    /// Marks `reg` as pending on `tag`. Unconditional: the most recently
    /// dispatched writer always owns the entry (WAW resolution).
    pub fn claim(&mut self, reg: RegIndex, tag: Tag) {
        self.slots[reg] = Some(tag);
    }

    /// Tag of the latest pending writer for `reg`, or `None` when ready.
    pub fn producer(&self, reg: RegIndex) -> Option<Tag> {
        self.slots[reg]
    }

    /// True when no writer is pending for `reg`.
    pub fn is_ready(&self, reg: RegIndex) -> bool {
        self.slots[reg].is_none()
    }

    /// Clears `reg`'s pending writer, but ONLY if the current tag matches.
    /// This prevents a retiring instruction from clearing a claim made by a
    /// later dispatch to the same register (WAW handling).
    pub fn release(&mut self, reg: RegIndex, tag: Tag) {
        if self.slots[reg] == Some(tag) {
            self.slots[reg] = None;
        }
    }
}
