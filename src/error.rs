//! Error types shared by the tree, the point loader and the query stream.

use std::collections::TryReserveError;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the index and its input collaborators.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Reading the point file or the query stream failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The arena could not grow to hold another node.
    #[error("Memory allocation error: {0}")]
    Allocation(#[from] TryReserveError),

    /// The tree already holds `u32::MAX` points.
    #[error("Tree capacity exceeded")]
    CapacityExceeded,

    /// A structural invariant does not hold.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// A query line was rejected.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}

/// Why a query line was not accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryError {
    /// The line is empty or only whitespace.
    #[error("blank line")]
    Blank,

    /// The line does not hold exactly three tokens.
    #[error("expected 3 values, found {0}")]
    WrongTokenCount(usize),

    /// A token is not a decimal integer that fits in 32 bits.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    /// The radius is below zero.
    #[error("negative radius {0}")]
    NegativeRadius(i32),
}

impl QueryError {
    /// Returns true for the clean end-of-queries marker (a blank line).
    pub fn is_terminator(&self) -> bool {
        matches!(self, Self::Blank)
    }
}
