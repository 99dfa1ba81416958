//! Phase estimation circuit assembly.
//!
//! Layout of the circuit built for `m` measurement qubits and a unitary `U`
//! on `p` qubits:
//!
//! ```text
//!   m[0]   ─H──────────────────────■^(2^(m-1))──┤       ├─M─ c[0]
//!   ...                            │            │ QFT†  │
//!   m[m-1] ─H──■^(2^0)─────────────│────────────┤       ├─M─ c[m-1]
//!   p      ─S──U───────── ... ─────U────────────────────────
//! ```
//!
//! `S` is the state preparation. `c[0]` is the most significant bit of the
//! result, so the bitstring reads directly as `j` in `phase = j / 2^m`.

use qpe_hal::Backend;
use qpe_ir::{Circuit, CircuitBox, IrError};
use tracing::debug;

use crate::decode::{PhaseEstimate, estimate_phase};
use crate::error::{QpeError, QpeResult};
use crate::qft::inverse_qft_box;

/// Largest supported number of measurement qubits.
///
/// The circuit holds `2^m - 1` controlled-unitary instances.
pub const MAX_RESOLUTION: u32 = 16;

/// Name given to the boxed unitary.
pub const UNITARY_NAME: &str = "U";

/// Build the phase estimation circuit.
///
/// `state_prep` prepares an eigenstate of `unitary` on the target register;
/// both must act on the same number of qubits and neither may measure.
/// Neither input is modified.
///
/// Registers: `m` (measurement, `m` qubits), `p` (target), `c` (classical,
/// `m` bits).
pub fn build_phase_estimation(
    m: u32,
    state_prep: &Circuit,
    unitary: &Circuit,
) -> QpeResult<Circuit> {
    if m == 0 || m > MAX_RESOLUTION {
        return Err(QpeError::InvalidResolution { m });
    }
    if state_prep.num_qubits() != unitary.num_qubits() {
        return Err(QpeError::RegisterSizeMismatch {
            state_prep: state_prep.num_qubits(),
            unitary: unitary.num_qubits(),
        });
    }
    // Nothing may be measured before the final readout.
    if state_prep.has_measurements() {
        return Err(IrError::NonUnitary(state_prep.name().to_string()).into());
    }
    let u = CircuitBox::new(&unitary.renamed(UNITARY_NAME))?;
    let inverse_qft = inverse_qft_box(m)?;

    #[allow(clippy::cast_possible_truncation)]
    let p = unitary.num_qubits() as u32;
    let mut circuit = Circuit::new("QPE");
    let meas = circuit.add_qreg("m", m);
    let target = circuit.add_qreg("p", p);
    let creg = circuit.add_creg("c", m);
    debug!(
        m,
        p,
        controlled_unitaries = (1u64 << m) - 1,
        "synthesising phase estimation circuit"
    );

    circuit.append(state_prep, &target)?;

    for &q in &meas {
        circuit.h(q)?;
    }

    for b in 0..m {
        let control = meas[(m - 1 - b) as usize];
        for _ in 0..1u64 << b {
            circuit.add_controlled_box(&u, &[control], &target)?;
        }
    }

    circuit.add_box(&inverse_qft, &meas)?;
    circuit.measure_qubits(&meas, &creg)?;

    Ok(circuit)
}

/// Build the circuit, run it on `backend` and decode the result.
pub async fn run_phase_estimation<B>(
    backend: &B,
    m: u32,
    state_prep: &Circuit,
    unitary: &Circuit,
    shots: u32,
) -> QpeResult<PhaseEstimate>
where
    B: Backend + ?Sized,
{
    let circuit = build_phase_estimation(m, state_prep, unitary)?;
    let result = backend.run(&circuit, shots).await?;
    let estimate = estimate_phase(&result.counts)?;
    debug!(
        backend = backend.name(),
        bitstring = %estimate.bitstring,
        phase = estimate.phase,
        "phase estimated"
    );
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpe_ir::{Angle, ClbitId, Gate, QubitId};

    fn phase_gate(theta: f64) -> Circuit {
        let mut u = Circuit::with_size("phase", 1, 0);
        u.p(Angle::half_turns(theta), QubitId(0)).unwrap();
        u
    }

    fn x_prep() -> Circuit {
        let mut s = Circuit::with_size("prep", 1, 0);
        s.x(QubitId(0)).unwrap();
        s
    }

    #[test]
    fn test_registers() {
        let c = build_phase_estimation(3, &x_prep(), &phase_gate(0.5)).unwrap();
        assert_eq!(c.num_qubits(), 4);
        assert_eq!(c.num_clbits(), 3);
        assert_eq!(c.qreg("m").unwrap().qubits.len(), 3);
        assert_eq!(c.qreg("p").unwrap().qubits, vec![QubitId(3)]);
        assert_eq!(c.creg("c").unwrap().clbits.len(), 3);
    }

    #[test]
    fn test_controlled_unitary_repetitions() {
        for m in 1..=5 {
            let c = build_phase_estimation(m, &x_prep(), &phase_gate(0.73)).unwrap();
            assert_eq!(c.count_ops()["cU"], (1 << m) - 1);
        }
    }

    #[test]
    fn test_most_significant_control_repeats_least() {
        let c = build_phase_estimation(3, &x_prep(), &phase_gate(0.1)).unwrap();
        let controls: Vec<u32> = c
            .instructions()
            .filter(|i| i.name() == UNITARY_NAME)
            .map(|i| i.qubits[0].0)
            .collect();
        assert_eq!(controls, vec![2, 1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_op_order() {
        let c = build_phase_estimation(2, &x_prep(), &phase_gate(0.1)).unwrap();
        let names: Vec<&str> = c.instructions().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec!["x", "h", "h", "U", "U", "U", "QFT_dg", "measure", "measure"]
        );
    }

    #[test]
    fn test_inputs_untouched() {
        let u = phase_gate(0.2);
        let s = x_prep();
        build_phase_estimation(2, &s, &u).unwrap();
        assert_eq!(u.name(), "phase");
        assert_eq!(u.num_ops(), 1);
        assert_eq!(s.num_ops(), 1);
    }

    #[test]
    fn test_invalid_resolution() {
        assert!(matches!(
            build_phase_estimation(0, &x_prep(), &phase_gate(0.5)),
            Err(QpeError::InvalidResolution { m: 0 })
        ));
        assert!(matches!(
            build_phase_estimation(MAX_RESOLUTION + 1, &x_prep(), &phase_gate(0.5)),
            Err(QpeError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_register_size_mismatch() {
        let wide = Circuit::with_size("prep2", 2, 0);
        assert!(matches!(
            build_phase_estimation(3, &wide, &phase_gate(0.5)),
            Err(QpeError::RegisterSizeMismatch {
                state_prep: 2,
                unitary: 1
            })
        ));
    }

    #[test]
    fn test_measuring_unitary_rejected() {
        let mut u = Circuit::with_size("bad", 1, 1);
        u.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(matches!(
            build_phase_estimation(2, &x_prep(), &u),
            Err(QpeError::Ir(IrError::NonUnitary(_)))
        ));
    }

    #[test]
    fn test_measuring_state_prep_rejected() {
        let mut prep = Circuit::with_size("measured_prep", 1, 1);
        prep.x(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();
        assert!(matches!(
            build_phase_estimation(3, &prep, &phase_gate(0.5)),
            Err(QpeError::Ir(IrError::NonUnitary(name))) if name == "measured_prep"
        ));
    }

    #[test]
    fn test_decomposes_to_primitives() {
        let c = build_phase_estimation(3, &x_prep(), &phase_gate(0.73)).unwrap();
        let flat = c.decompose_boxes();
        assert!(
            flat.instructions()
                .filter_map(|i| i.as_gate())
                .all(Gate::is_primitive)
        );
        assert_eq!(flat.count_ops()["cp"], 7 + 3);
    }
}
