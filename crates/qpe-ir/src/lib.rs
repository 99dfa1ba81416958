//! Circuit intermediate representation for phase estimation.
//!
//! This crate provides the data structures the phase-estimation builders
//! are written against: qubit and classical registers, primitive gates,
//! reusable [`CircuitBox`]es, controlled wrappers, and the [`Circuit`]
//! builder itself.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`], grouped into
//!   named registers with [`Circuit::add_qreg`] / [`Circuit::add_creg`]
//! - **Angles**: [`Angle`], measured in half-turns (1 half-turn = π rad)
//! - **Gates**: [`Gate`], a tagged union of [`StandardGate`], boxes and
//!   [`ControlledGate`]s
//! - **Boxes**: [`CircuitBox`], named immutable sub-circuits with a
//!   [`CircuitBox::dagger`]
//! - **DAG**: [`CircuitDag`], the dependency graph used for depth
//!
//! # Example: Controlled box
//!
//! ```rust
//! use qpe_ir::{Circuit, CircuitBox, QubitId};
//!
//! let mut u = Circuit::with_size("u", 1, 0);
//! u.p(0.73, QubitId(0)).unwrap();
//! let u = CircuitBox::new(&u).unwrap().with_name("U");
//!
//! let mut circuit = Circuit::with_size("demo", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit
//!     .add_controlled_box(&u, &[QubitId(0)], &[QubitId(1)])
//!     .unwrap();
//!
//! assert_eq!(circuit.count_ops()["cU"], 1);
//! assert_eq!(circuit.decompose_boxes().count_ops()["cp"], 1);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `P` | 1 | Phase gate (U1) |
//! | `CX`, `CZ` | 2 | Controlled-X and Controlled-Z |
//! | `CP` | 2 | Controlled phase |
//! | `Swap` | 2 | SWAP gate |

pub mod angle;
pub mod circuit;
pub mod circuit_box;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use angle::Angle;
pub use circuit::Circuit;
pub use circuit_box::CircuitBox;
pub use dag::{CircuitDag, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{ControlledGate, Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClassicalRegister, Clbit, ClbitId, QuantumRegister, Qubit, QubitId};
