//! Error types for the algo crate.

use thiserror::Error;

/// Errors produced while building or decoding phase-estimation circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QpeError {
    /// Number of measurement qubits out of range.
    #[error("resolution must be between 1 and {max} measurement qubits, got {m}", max = crate::MAX_RESOLUTION)]
    InvalidResolution {
        /// The rejected resolution.
        m: u32,
    },

    /// State preparation and unitary act on different numbers of qubits.
    #[error(
        "state preparation acts on {state_prep} qubits but the unitary acts on {unitary}"
    )]
    RegisterSizeMismatch {
        /// Width of the state-preparation circuit.
        state_prep: usize,
        /// Width of the unitary circuit.
        unitary: usize,
    },

    /// No shots recorded.
    #[error("measurement outcome is empty")]
    EmptyOutcome,

    /// A bitstring that is not a non-empty string of `0` and `1`.
    #[error("malformed bitstring '{0}'")]
    MalformedBitstring(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qpe_ir::IrError),

    /// Backend failure, surfaced unchanged.
    #[error(transparent)]
    Backend(#[from] qpe_hal::HalError),
}

/// Result type for phase-estimation operations.
pub type QpeResult<T> = Result<T, QpeError>;
