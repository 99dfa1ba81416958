//! Quantum gate types.
//!
//! A [`Gate`] is a closed tagged union: a primitive [`StandardGate`], a
//! reference to a reusable [`CircuitBox`], or a controlled wrapper around
//! another gate. Every gate knows its arity and its inverse.

use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::circuit_box::CircuitBox;
use crate::error::{IrError, IrResult};

/// Primitive gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Rotation around X axis.
    Rx(Angle),
    /// Rotation around Y axis.
    Ry(Angle),
    /// Rotation around Z axis.
    Rz(Angle),
    /// Phase gate `diag(1, e^{iπλ})`, also known as U1.
    P(Angle),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled phase gate.
    CP(Angle),
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ | StandardGate::CP(_) | StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// The rotation angle, for parameterized gates.
    pub fn angle(&self) -> Option<Angle> {
        match self {
            StandardGate::Rx(a)
            | StandardGate::Ry(a)
            | StandardGate::Rz(a)
            | StandardGate::P(a)
            | StandardGate::CP(a) => Some(*a),
            _ => None,
        }
    }

    /// Whether this is a single-qubit gate.
    #[inline]
    pub fn is_single_qubit(&self) -> bool {
        self.num_qubits() == 1
    }

    /// Whether this is a controlled rotation (`CX`, `CZ`, `CP`).
    #[inline]
    pub fn is_controlled(&self) -> bool {
        matches!(
            self,
            StandardGate::CX | StandardGate::CZ | StandardGate::CP(_)
        )
    }

    /// Check if this gate is its own inverse.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            StandardGate::H
                | StandardGate::X
                | StandardGate::Y
                | StandardGate::Z
                | StandardGate::CX
                | StandardGate::CZ
                | StandardGate::Swap
        )
    }

    /// The inverse gate: S↔Sdg, T↔Tdg, rotations negate their angle.
    pub fn inverse(&self) -> StandardGate {
        match *self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::Rx(a) => StandardGate::Rx(-a),
            StandardGate::Ry(a) => StandardGate::Ry(-a),
            StandardGate::Rz(a) => StandardGate::Rz(-a),
            StandardGate::P(a) => StandardGate::P(-a),
            StandardGate::CP(a) => StandardGate::CP(-a),
            other => other,
        }
    }
}

/// A gate with `num_controls` control qubits prepended to its operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlledGate {
    num_controls: u32,
    base: Box<Gate>,
}

impl ControlledGate {
    /// Wrap `base` with `num_controls` controls.
    ///
    /// A base that is already controlled is flattened, so the controls of
    /// the result always precede a non-controlled base.
    pub fn new(num_controls: u32, base: Gate) -> IrResult<Self> {
        if num_controls == 0 {
            return Err(IrError::InvalidControlCount);
        }
        Ok(match base {
            Gate::Controlled(inner) => Self {
                num_controls: num_controls + inner.num_controls,
                base: inner.base,
            },
            other => Self {
                num_controls,
                base: Box::new(other),
            },
        })
    }

    /// Number of control qubits.
    #[inline]
    pub fn num_controls(&self) -> u32 {
        self.num_controls
    }

    /// The controlled operation.
    #[inline]
    pub fn base(&self) -> &Gate {
        &self.base
    }
}

/// A gate that can appear in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A primitive gate.
    Standard(StandardGate),
    /// A reusable named sub-circuit.
    Boxed(CircuitBox),
    /// A controlled version of another gate.
    Controlled(ControlledGate),
}

impl Gate {
    /// Create a gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }

    /// Wrap this gate with `num_controls` controls.
    pub fn controlled(self, num_controls: u32) -> IrResult<Self> {
        Ok(Gate::Controlled(ControlledGate::new(num_controls, self)?))
    }

    /// Name of the gate (the base name for controlled gates).
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Boxed(b) => b.name(),
            Gate::Controlled(c) => c.base.name(),
        }
    }

    /// Number of qubits, controls included.
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Boxed(b) => b.num_qubits(),
            Gate::Controlled(c) => c.num_controls + c.base.num_qubits(),
        }
    }

    /// Number of control qubits added by a controlled wrapper.
    pub fn num_controls(&self) -> u32 {
        match self {
            Gate::Controlled(c) => c.num_controls,
            _ => 0,
        }
    }

    /// The inverse gate. Boxes are daggered, controls are kept.
    pub fn inverse(&self) -> Gate {
        match self {
            Gate::Standard(g) => Gate::Standard(g.inverse()),
            Gate::Boxed(b) => Gate::Boxed(b.dagger()),
            Gate::Controlled(c) => Gate::Controlled(ControlledGate {
                num_controls: c.num_controls,
                base: Box::new(c.base.inverse()),
            }),
        }
    }

    /// The standard gate, if this is one.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        match self {
            Gate::Standard(g) => Some(g),
            _ => None,
        }
    }

    /// The box, if this is one.
    pub fn as_box(&self) -> Option<&CircuitBox> {
        match self {
            Gate::Boxed(b) => Some(b),
            _ => None,
        }
    }

    /// True for standard gates and controlled standard gates.
    pub fn is_primitive(&self) -> bool {
        match self {
            Gate::Standard(_) => true,
            Gate::Boxed(_) => false,
            Gate::Controlled(c) => matches!(*c.base, Gate::Standard(_)),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<CircuitBox> for Gate {
    fn from(b: CircuitBox) -> Self {
        Gate::Boxed(b)
    }
}

impl From<ControlledGate> for Gate {
    fn from(c: ControlledGate) -> Self {
        Gate::Controlled(c)
    }
}
