//! `qpe-algo`: quantum phase estimation.
//!
//! Builds the circuits that estimate the eigenphase of a unitary and turns
//! the measured counts back into a number:
//!
//! - [`qft`]: the quantum Fourier transform, as a circuit or reusable box
//! - [`phase_estimation`]: the full estimation circuit around a boxed,
//!   controlled unitary
//! - [`decode`]: most-frequent-outcome decoding into `j / 2^m`
//!
//! Angles are in half-turns throughout, so `P(θ)` has eigenphase `θ / 2`
//! turns on `|1⟩`.
//!
//! # Quick start
//!
//! ```rust
//! use qpe_algo::{build_phase_estimation, decode_phase};
//! use qpe_hal::Counts;
//! use qpe_ir::{Angle, Circuit, QubitId};
//!
//! let mut unitary = Circuit::with_size("phase", 1, 0);
//! unitary.p(Angle::half_turns(0.75), QubitId(0)).unwrap();
//! let mut prep = Circuit::with_size("prep", 1, 0);
//! prep.x(QubitId(0)).unwrap();
//!
//! let circuit = build_phase_estimation(3, &prep, &unitary).unwrap();
//! assert_eq!(circuit.count_ops()["cU"], 7);
//!
//! // 0.75 half-turns is 3/8 of a turn: a noiseless run always reads 011.
//! let counts: Counts = [("011", 1000)].into_iter().collect();
//! assert_eq!(decode_phase(&counts).unwrap(), 0.375);
//! ```

pub mod decode;
pub mod error;
pub mod phase_estimation;
pub mod qft;

pub use decode::{PhaseEstimate, decode_phase, estimate_phase};
pub use error::{QpeError, QpeResult};
pub use phase_estimation::{MAX_RESOLUTION, build_phase_estimation, run_phase_estimation};
pub use qft::{build_qft, inverse_qft_box, qft_box};
