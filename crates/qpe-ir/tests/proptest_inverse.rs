//! Property-based tests for circuit and box inversion.

use proptest::prelude::*;
use qpe_ir::{Angle, Circuit, CircuitBox, QubitId};

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    S(u32),
    T(u32),
    Rx(u32, f64),
    P(u32, f64),
    CX(u32, u32),
    CP(u32, u32, f64),
    Swap(u32, u32),
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) {
        // Ops with repeated qubits are rejected by the builder; skip them.
        let _ = match self {
            GateOp::H(q) => circuit.h(QubitId(q)),
            GateOp::S(q) => circuit.s(QubitId(q)),
            GateOp::T(q) => circuit.t(QubitId(q)),
            GateOp::Rx(q, a) => circuit.rx(Angle::half_turns(a), QubitId(q)),
            GateOp::P(q, a) => circuit.p(Angle::half_turns(a), QubitId(q)),
            GateOp::CX(c, t) => circuit.cx(QubitId(c), QubitId(t)),
            GateOp::CP(c, t, a) => circuit.cp(Angle::half_turns(a), QubitId(c), QubitId(t)),
            GateOp::Swap(a, b) => circuit.swap(QubitId(a), QubitId(b)),
        };
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    let q = 0..num_qubits;
    let angle = -2.0_f64..2.0;
    prop_oneof![
        q.clone().prop_map(GateOp::H),
        q.clone().prop_map(GateOp::S),
        q.clone().prop_map(GateOp::T),
        (q.clone(), angle.clone()).prop_map(|(q, a)| GateOp::Rx(q, a)),
        (q.clone(), angle.clone()).prop_map(|(q, a)| GateOp::P(q, a)),
        (q.clone(), q.clone()).prop_map(|(c, t)| GateOp::CX(c, t)),
        (q.clone(), q.clone(), angle).prop_map(|(c, t, a)| GateOp::CP(c, t, a)),
        (q.clone(), q).prop_map(|(a, b)| GateOp::Swap(a, b)),
    ]
}

fn arb_unitary_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=4).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 0..=16).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("body", num_qubits, 0);
            for op in ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn dagger_is_involution(circuit in arb_unitary_circuit()) {
        let b = CircuitBox::new(&circuit).unwrap();
        prop_assert_eq!(b.dagger().dagger(), b);
    }

    #[test]
    fn dagger_preserves_size(circuit in arb_unitary_circuit()) {
        let b = CircuitBox::new(&circuit).unwrap();
        let dg = b.dagger();
        prop_assert_eq!(dg.num_qubits(), b.num_qubits());
        prop_assert_eq!(dg.instructions().len(), b.instructions().len());
    }

    #[test]
    fn circuit_inverse_is_involution(circuit in arb_unitary_circuit()) {
        let twice = circuit.inverse().unwrap().inverse().unwrap();
        prop_assert!(twice.instructions().eq(circuit.instructions()));
    }

    #[test]
    fn depth_bounded_by_ops(circuit in arb_unitary_circuit()) {
        prop_assert!(circuit.depth() <= circuit.num_ops());
    }
}
