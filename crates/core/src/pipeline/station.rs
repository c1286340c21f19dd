//! Reservation station: bounded pool of scheduled instructions.
//!
//! Physical storage order is irrelevant; every phase that needs fairness
//! walks entries in tag order via [`ReservationStation::tags_where`].
//! Entries are addressed by tag and re-resolved per phase, so eviction can
//! reorder storage freely (`swap_remove`) without invalidating anything.

use crate::pipeline::inst::{Instruction, Tag};

/// Bounded, unordered pool of scheduled instructions.
#[derive(Debug)]
pub struct ReservationStation {
    entries: Vec<Instruction>,
    capacity: usize,
}

impl ReservationStation {
    /// Creates an empty station with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when another instruction can be scheduled.
    pub fn has_space(&self) -> bool {
        self.entries.len() < self.capacity
    }

    /// Inserts a newly scheduled instruction.
    ///
    /// Capacity is enforced by the scheduler; inserting past it is a defect.
    pub fn insert(&mut self, inst: Instruction) {
        debug_assert!(self.has_space(), "reservation station overfilled");
        self.entries.push(inst);
    }

    /// Iterates entries in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.entries.iter()
    }

    /// Iterates entries mutably in storage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Instruction> {
        self.entries.iter_mut()
    }

    /// Looks up an entry by tag.
    pub fn get_mut(&mut self, tag: Tag) -> Option<&mut Instruction> {
        self.entries.iter_mut().find(|inst| inst.tag == tag)
    }

    /// Tags of entries matching `pred`, in ascending tag order.
    pub fn tags_where(&self, pred: impl Fn(&Instruction) -> bool) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .entries
            .iter()
            .filter(|inst| pred(inst))
            .map(|inst| inst.tag)
            .collect();
        tags.sort_unstable();
        tags
    }

    /// Removes the given tags from the pool.
    pub fn evict(&mut self, tags: &[Tag]) {
        for &tag in tags {
            if let Some(index) = self.entries.iter().position(|inst| inst.tag == tag) {
                let _ = self.entries.swap_remove(index);
            }
        }
    }
}
