//! Trace input: records, sources, and the text-format reader.
//!
//! This module is the input boundary of the simulator. It provides:
//! 1. **Records:** [`TraceRecord`], one decoded instruction exactly as traced.
//! 2. **Sources:** the [`TraceSource`] pull interface; in-memory record
//!    vectors are sources directly, which is what tests use.
//! 3. **Text format:** [`TextTrace`], a line-oriented reader for the on-disk
//!    format `<address-hex> <op_code> <dest_reg> <src_reg1> <src_reg2>`, with
//!    −1 as the "no register" sentinel.
//!
//! A malformed line or a failed read is treated as a clean end-of-trace: the
//! reader logs a warning, stops producing records, and the pipeline drains.
//! No distinction is made between true EOF and a parse failure.

use std::io::BufRead;

use tracing::warn;

use crate::common::reg::RegIndex;

/// One decoded instruction as read from a trace.
///
/// Fields keep the raw signed trace encoding; use [`dest`](Self::dest) and
/// [`src`](Self::src) for the decoded register indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Originating instruction address. Opaque; reported only.
    pub address: u32,
    /// Opcode selecting the function-unit class: −1, 0, 1, or 2.
    pub op_code: i32,
    /// Destination register, or −1 for none.
    pub dest_reg: i32,
    /// Source registers, each −1 for none.
    pub src_reg: [i32; 2],
}

impl TraceRecord {
    /// Destination register index, if the instruction writes one.
    pub fn dest(&self) -> Option<RegIndex> {
        decode_reg(self.dest_reg)
    }

    /// Source register index `slot` (0 or 1), if that operand reads one.
    pub fn src(&self, slot: usize) -> Option<RegIndex> {
        decode_reg(self.src_reg[slot])
    }
}

/// Decodes a signed trace field; −1 (and any negative value) means "none".
fn decode_reg(raw: i32) -> Option<RegIndex> {
    usize::try_from(raw).ok()
}

/// Pull interface over a stream of trace records.
///
/// Returning `None` signals end-of-trace; the pipeline stops fetching and
/// drains. Sources are never polled again after they return `None`.
pub trait TraceSource {
    /// Produces the next record, or `None` at end-of-trace.
    fn next_record(&mut self) -> Option<TraceRecord>;
}

/// In-memory traces (tests, generated workloads) are sources directly.
impl TraceSource for std::vec::IntoIter<TraceRecord> {
    fn next_record(&mut self) -> Option<TraceRecord> {
        self.next()
    }
}

/// Text-format trace reader over any buffered input.
///
/// One instruction per line: an unprefixed hexadecimal address followed by
/// four signed decimal fields (`op_code`, `dest_reg`, `src_reg1`,
/// `src_reg2`). Blank lines are skipped.
#[derive(Debug)]
pub struct TextTrace<R> {
    input: R,
    line: String,
    line_number: u64,
    finished: bool,
}

impl<R: BufRead> TextTrace<R> {
    /// Wraps a buffered reader.
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
            line_number: 0,
            finished: false,
        }
    }

    /// Parses one non-blank trace line.
    fn parse_line(text: &str) -> Option<TraceRecord> {
        let mut fields = text.split_whitespace();
        let address = u32::from_str_radix(fields.next()?, 16).ok()?;
        let op_code = fields.next()?.parse().ok()?;
        let dest_reg = fields.next()?.parse().ok()?;
        let src1 = fields.next()?.parse().ok()?;
        let src2 = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(TraceRecord {
            address,
            op_code,
            dest_reg,
            src_reg: [src1, src2],
        })
    }
}

impl<R: BufRead> TraceSource for TextTrace<R> {
    fn next_record(&mut self) -> Option<TraceRecord> {
        if self.finished {
            return None;
        }
        loop {
            self.line.clear();
            match self.input.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "trace read failed, treating as end-of-trace");
                    self.finished = true;
                    return None;
                }
            }
            self.line_number += 1;
            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }
            match Self::parse_line(text) {
                Some(record) => return Some(record),
                None => {
                    warn!(
                        line = self.line_number,
                        "malformed trace line, treating as end-of-trace"
                    );
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}
