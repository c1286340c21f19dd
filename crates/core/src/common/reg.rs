//! Architectural register domain.
//!
//! The trace format addresses a flat file of 128 architectural registers.
//! Register operands are optional: the trace encodes "no register" as −1,
//! which the reader surfaces as `None`.

/// Number of architectural registers visible to the trace format.
pub const REG_COUNT: usize = 128;

/// Index of an architectural register, in `[0, REG_COUNT)`.
pub type RegIndex = usize;
