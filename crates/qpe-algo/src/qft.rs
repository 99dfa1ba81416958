//! Quantum Fourier transform.
//!
//! For `n` qubits the transform is built from `n` Hadamards, `n(n-1)/2`
//! controlled phase rotations and `⌊n/2⌋` swaps:
//!
//! ```text
//!   for i in 0..n:
//!       H(i)
//!       for j in i+1..n:  CP(π/2^(j-i)) control j, target i
//!   for k in 0..n/2:      SWAP(k, n-1-k)
//! ```
//!
//! The final swaps put the output in the same bit order as the input.

use qpe_ir::{Angle, Circuit, CircuitBox, QubitId};

use crate::error::QpeResult;

/// Name of the QFT circuit and box.
pub const QFT_NAME: &str = "QFT";

/// Build the `n`-qubit QFT as a standalone circuit named `QFT`.
///
/// `n = 0` gives an empty circuit.
pub fn build_qft(n: u32) -> QpeResult<Circuit> {
    let mut circuit = Circuit::with_size(QFT_NAME, n, 0);
    for i in 0..n {
        circuit.h(QubitId(i))?;
        for j in i + 1..n {
            circuit.cp(Angle::dyadic(j - i), QubitId(j), QubitId(i))?;
        }
    }
    for k in 0..n / 2 {
        circuit.swap(QubitId(k), QubitId(n - 1 - k))?;
    }
    Ok(circuit)
}

/// The `n`-qubit QFT as a reusable box.
pub fn qft_box(n: u32) -> QpeResult<CircuitBox> {
    Ok(CircuitBox::new(&build_qft(n)?)?)
}

/// The inverse QFT box, named `QFT_dg`.
pub fn inverse_qft_box(n: u32) -> QpeResult<CircuitBox> {
    Ok(qft_box(n)?.dagger())
}
