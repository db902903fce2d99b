//! Typed faults raised by the archive and its grid.
//!
//! Policy rejections (a dominated or crowding-neutral candidate) are not
//! errors; they are reported through [`AddOutcome`](super::AddOutcome).
//! The variants below cover configuration mistakes, malformed objective
//! vectors, and internal invariant failures.

use thiserror::Error;

/// Error type for archive construction and mutation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArchiveError {
    /// The archive was configured without any objective dimension.
    #[error("archive requires at least one objective dimension")]
    EmptyDimensions,

    /// The same objective dimension was configured (or supplied) twice.
    #[error("objective dimension `{0}` appears more than once")]
    DuplicateDimension(String),

    /// The global bound box is empty or not finite.
    #[error("invalid objective bounds: min {min} must be finite and below max {max}")]
    InvalidBounds { min: f64, max: f64 },

    /// An archive must be able to hold at least one candidate.
    #[error("archive capacity must be at least 1")]
    ZeroCapacity,

    /// A candidate omitted a configured dimension.
    #[error("candidate is missing objective dimension `{0}`")]
    MissingDimension(String),

    /// A candidate supplied a dimension the archive was not configured with.
    #[error("candidate has unconfigured objective dimension `{0}`")]
    UnexpectedDimension(String),

    /// A candidate supplied NaN or an infinite value.
    #[error("objective `{dimension}` is not a finite number")]
    NonFiniteObjective { dimension: String },

    /// A value fell outside `[min, max]` under [`BoundsPolicy::Reject`](super::BoundsPolicy::Reject).
    #[error("objective `{dimension}` = {value} lies outside [{min}, {max}]")]
    OutOfBounds {
        dimension: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Grid counts and archive membership disagree. Not recoverable.
    #[error("archive invariant violated: {0}")]
    InvariantViolation(String),
}
