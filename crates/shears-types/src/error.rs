//! Error types for the shears simulator.
//!
//! All crates return `ShearsResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the shears simulator.
#[derive(Debug, Error)]
pub enum ShearsError {
    /// Configuration value is invalid (grid dimensions, spacing, shape...).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The caller broke a usage invariant (tensioning while unpinned,
    /// overlapping grasps, pinning outside the mesh...).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The solver produced a non-finite or degenerate state.
    #[error("Numeric degeneracy at step {step}, particle {particle}: {detail}")]
    NumericDegeneracy {
        step: u64,
        particle: u32,
        detail: String,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShearsError {
    /// Returns true for errors that leave the simulation unusable
    /// until it is reset or rebuilt.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShearsError::NumericDegeneracy { .. })
    }
}

/// Convenience alias for `Result<T, ShearsError>`.
pub type ShearsResult<T> = Result<T, ShearsError>;
