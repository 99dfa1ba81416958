//! Circuits used by the phase estimation demo.

use qpe_ir::{Angle, Circuit, IrResult, QubitId};

/// Three-qubit QFT written out gate by gate.
///
/// Matches `qpe_algo::build_qft(3)` instruction for instruction.
pub fn qft3_reference() -> IrResult<Circuit> {
    let (q0, q1, q2) = (QubitId(0), QubitId(1), QubitId(2));
    let mut circuit = Circuit::with_size("QFT", 3, 0);
    circuit
        .h(q0)?
        .cp(Angle::half_turns(0.5), q1, q0)?
        .cp(Angle::half_turns(0.25), q2, q0)?
        .h(q1)?
        .cp(Angle::half_turns(0.5), q2, q1)?
        .h(q2)?
        .swap(q0, q2)?;
    Ok(circuit)
}

/// Single-qubit phase gate `P(θ)`, θ in half-turns.
///
/// `|1⟩` is an eigenstate with eigenphase `θ/2` turns.
pub fn phase_unitary(theta: f64) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("phase", 1, 0);
    circuit.p(Angle::half_turns(theta), QubitId(0))?;
    Ok(circuit)
}

/// Prepares `|1⟩` from `|0⟩`.
pub fn excited_state() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("prep", 1, 0);
    circuit.x(QubitId(0))?;
    Ok(circuit)
}
