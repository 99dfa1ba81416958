//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building or transforming circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the circuit.
    #[error(
        "Qubit {qubit} is out of range for a circuit of {num_qubits} qubits{}",
        format_gate_context(.gate_name)
    )]
    InvalidQubitIndex {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit index outside the circuit.
    #[error(
        "Classical bit {clbit} is out of range for a circuit of {num_clbits} bits{}",
        format_gate_context(.gate_name)
    )]
    InvalidClbitIndex {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        num_clbits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A measurement appeared where only unitary operations are allowed.
    #[error("Non-unitary operation in '{0}'")]
    NonUnitary(String),

    /// Qubit map passed to `append` does not cover the sub-circuit.
    #[error("Qubit map has {got} entries, sub-circuit has {expected} qubits")]
    QubitMapMismatch {
        /// Qubits in the appended circuit.
        expected: usize,
        /// Entries in the map.
        got: usize,
    },

    /// A controlled gate needs at least one control.
    #[error("Controlled gate requires at least one control")]
    InvalidControlCount,
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
