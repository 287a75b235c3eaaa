//! This module contains all custom errors used in this library.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import: IoError")]
    IoError(#[from] std::io::Error),
    #[error("Import: Input is malformed.")]
    InputMalformedError,
    #[error("Import: Integer is malformed.")]
    BadIntError(#[from] std::num::ParseIntError),
    /// An edge references a vertex outside of `0..n`.
    #[error("Import: Vertex {0} is out of range.")]
    VertexOutOfRange(usize),
}

#[derive(Debug, Error)]
pub enum ProcessingError {
    /// An internal consistency check failed, e.g. the König cover and the matching differ in
    /// size. Never expected on well formed input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("InvalidSolution: {0}")]
    InvalidSolution(String),
}
