//! Reusable, immutable sub-circuits.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::Instruction;

const DAGGER_SUFFIX: &str = "_dg";

/// A named unitary sub-circuit that can be applied as a single gate.
///
/// The body is shared, so cloning a box (or repeating it many times in a
/// circuit) does not copy its instructions. Instruction qubits are local
/// indices `0..num_qubits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitBox {
    name: String,
    num_qubits: u32,
    body: Arc<[Instruction]>,
}

impl CircuitBox {
    /// Wrap a circuit. Fails if the circuit contains measurements.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(circuit: &Circuit) -> IrResult<Self> {
        if circuit.has_measurements() {
            return Err(IrError::NonUnitary(circuit.name().to_string()));
        }
        Ok(Self {
            name: circuit.name().to_string(),
            num_qubits: circuit.num_qubits() as u32,
            body: circuit.instructions().cloned().collect(),
        })
    }

    /// A copy of this box under a different name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: self.num_qubits,
            body: Arc::clone(&self.body),
        }
    }

    /// Box name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits the box acts on.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The body, in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.body
    }

    /// The adjoint box: operations reversed, each one inverted.
    ///
    /// The name gains a `_dg` suffix, or loses it if already present, so
    /// daggering twice restores the original box.
    pub fn dagger(&self) -> Self {
        let name = match self.name.strip_suffix(DAGGER_SUFFIX) {
            Some(base) => base.to_string(),
            None => format!("{}{DAGGER_SUFFIX}", self.name),
        };
        let body: Arc<[Instruction]> = self
            .body
            .iter()
            .rev()
            .filter_map(Instruction::inverse)
            .collect();
        Self {
            name,
            num_qubits: self.num_qubits,
            body,
        }
    }

    /// This box with `num_controls` control qubits.
    pub fn controlled(&self, num_controls: u32) -> IrResult<Gate> {
        Gate::Boxed(self.clone()).controlled(num_controls)
    }

    /// Expand the box back into a standalone circuit.
    pub fn to_circuit(&self) -> Circuit {
        let mut circuit = Circuit::with_size(self.name.clone(), self.num_qubits, 0);
        for inst in self.body.iter() {
            circuit.push_unchecked(inst.clone());
        }
        circuit
    }
}
