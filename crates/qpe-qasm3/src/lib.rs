//! `OpenQASM` 3 emitter for phase-estimation circuits.
//!
//! Renders a [`qpe_ir::Circuit`] as `OpenQASM` 3.0 text:
//!
//! | Circuit element | Output |
//! |-----------------|--------|
//! | Named register | `qubit[4] m;`, `bit[4] c;` |
//! | Loose qubit | `qubit q3;` |
//! | Standard gate | `h m[0];`, `cp(pi/2) m[1], m[0];` |
//! | Box | one `gate U q0 { ... }` definition, then `U p[0];` |
//! | Controlled box | `ctrl @ U m[3], p[0];` |
//! | Measurement | `c[0] = measure m[0];` |
//!
//! Angles that are small dyadic fractions of π print as `pi` expressions;
//! everything else prints in radians with six decimals.
//!
//! # Example
//!
//! ```rust
//! use qpe_ir::{Circuit, CircuitBox, QubitId};
//! use qpe_qasm3::emit;
//!
//! let mut body = Circuit::with_size("U", 1, 0);
//! body.p(0.5, QubitId(0)).unwrap();
//! let u = CircuitBox::new(&body).unwrap();
//!
//! let mut circuit = Circuit::new("demo");
//! let q = circuit.add_qreg("q", 2);
//! circuit.h(q[0]).unwrap();
//! circuit.add_controlled_box(&u, &[q[0]], &[q[1]]).unwrap();
//!
//! let qasm = emit(&circuit);
//! assert!(qasm.contains("gate U q0 {"));
//! assert!(qasm.contains("ctrl @ U q[0], q[1];"));
//! ```

mod emitter;

pub use emitter::{emit, format_angle};
