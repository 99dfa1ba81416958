//! Structural and functional tests for the QFT builder.

use proptest::prelude::*;
use qpe_adapter_sim::SimulatorBackend;
use qpe_algo::{build_qft, inverse_qft_box, qft_box};
use qpe_hal::Backend;
use qpe_ir::{Circuit, QubitId};

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn qft_gate_counts(n in 0_u32..=12) {
        let counts = build_qft(n).unwrap().count_ops();
        let get = |k: &str| counts.get(k).copied().unwrap_or(0);
        let n = n as usize;
        prop_assert_eq!(get("h"), n);
        prop_assert_eq!(get("cp"), n * n.saturating_sub(1) / 2);
        prop_assert_eq!(get("swap"), n / 2);
    }

    #[test]
    fn inverse_of_inverse_is_qft(n in 1_u32..=8) {
        let inv = inverse_qft_box(n).unwrap();
        prop_assert_eq!(inv.dagger(), qft_box(n).unwrap());
    }
}

#[test]
fn qft_is_named_and_sized() {
    let qft = build_qft(4).unwrap();
    assert_eq!(qft.name(), "QFT");
    assert_eq!(qft.num_qubits(), 4);
    assert!(!qft.has_measurements());
}

// ---------------------------------------------------------------------------
// Semantics (noiseless simulator)
// ---------------------------------------------------------------------------

/// Prepare basis state `state`, apply QFT then its inverse, measure.
fn qft_round_trip(n: u32, state: u32) -> Circuit {
    let qubits: Vec<QubitId> = (0..n).map(QubitId).collect();
    let mut c = Circuit::with_size("roundtrip", n, n);
    for &q in &qubits {
        if state >> q.0 & 1 == 1 {
            c.x(q).unwrap();
        }
    }
    c.add_box(&qft_box(n).unwrap(), &qubits).unwrap();
    c.add_box(&inverse_qft_box(n).unwrap(), &qubits).unwrap();
    c.measure_all().unwrap();
    c
}

#[tokio::test]
async fn qft_then_inverse_is_identity() {
    let backend = SimulatorBackend::with_seed(2024);
    for n in 1..=4_u32 {
        for state in 0..1_u32 << n {
            let result = backend.run(&qft_round_trip(n, state), 64).await.unwrap();
            let expected: String = (0..n)
                .map(|q| if state >> q & 1 == 1 { '1' } else { '0' })
                .collect();
            assert_eq!(
                result.counts.get(&expected),
                64,
                "n={n} state={state:0b} counts={:?}",
                result.counts
            );
        }
    }
}

#[tokio::test]
async fn qft_of_zero_is_uniform() {
    let n = 3;
    let qubits: Vec<QubitId> = (0..n).map(QubitId).collect();
    let mut c = Circuit::with_size("uniform", n, n);
    c.add_box(&qft_box(n).unwrap(), &qubits).unwrap();
    c.measure_all().unwrap();

    let result = SimulatorBackend::with_seed(5).run(&c, 8000).await.unwrap();
    assert_eq!(result.counts.len(), 8);
    for (_, &count) in result.counts.iter() {
        assert!((700..=1300).contains(&count), "count {count} far from 1000");
    }
}
