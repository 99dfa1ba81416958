//! Statevector simulation engine.
//!
//! Amplitude index bit `k` holds the value of qubit `k`. Every gate is
//! applied as a 2x2 matrix (or a swap) restricted to basis states whose
//! control bits are all set, so a controlled gate with any number of
//! controls costs the same as its uncontrolled base.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use qpe_hal::{HalError, HalResult};
use qpe_ir::{Gate, QubitId, StandardGate};

type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A pure state over `num_qubits` qubits.
#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self { amplitudes }
    }

    #[cfg(test)]
    fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Apply a primitive gate: a standard gate, optionally controlled.
    ///
    /// Boxes must be decomposed beforehand.
    pub fn apply_gate(&mut self, gate: &Gate, qubits: &[QubitId]) -> HalResult<()> {
        let qubits: Vec<usize> = qubits.iter().map(|q| q.index()).collect();
        match gate {
            Gate::Standard(g) => {
                self.apply_standard(0, g, &qubits);
                Ok(())
            }
            Gate::Controlled(c) => match c.base() {
                Gate::Standard(g) => {
                    let k = c.num_controls() as usize;
                    let ctrl_mask = qubits[..k].iter().fold(0usize, |m, &q| m | (1 << q));
                    self.apply_standard(ctrl_mask, g, &qubits[k..]);
                    Ok(())
                }
                other => Err(HalError::Unsupported(format!(
                    "controlled non-primitive gate '{}'",
                    other.name()
                ))),
            },
            Gate::Boxed(b) => Err(HalError::Unsupported(format!(
                "undecomposed box '{}'",
                b.name()
            ))),
        }
    }

    fn apply_standard(&mut self, ctrl_mask: usize, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::CX => {
                self.apply_1q(ctrl_mask | (1 << qubits[0]), qubits[1], &matrix_x())
            }
            StandardGate::CZ => {
                self.apply_1q(ctrl_mask | (1 << qubits[0]), qubits[1], &phase(PI))
            }
            StandardGate::CP(lambda) => {
                self.apply_1q(ctrl_mask | (1 << qubits[0]), qubits[1], &phase(lambda.radians()))
            }
            StandardGate::Swap => self.apply_swap(ctrl_mask, qubits[0], qubits[1]),
            single => {
                if let Some(m) = single_qubit_matrix(single) {
                    self.apply_1q(ctrl_mask, qubits[0], &m);
                }
            }
        }
    }

    fn apply_1q(&mut self, ctrl_mask: usize, qubit: usize, m: &Matrix2) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 && i & ctrl_mask == ctrl_mask {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_swap(&mut self, ctrl_mask: usize, q1: usize, q2: usize) {
        let m1 = 1 << q1;
        let m2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if i & m1 != 0 && i & m2 == 0 && i & ctrl_mask == ctrl_mask {
                self.amplitudes.swap(i, i ^ (m1 | m2));
            }
        }
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Draw `shots` basis-state indices.
    pub fn sample_many<R: Rng>(&self, shots: u32, rng: &mut R) -> Vec<usize> {
        let mut cumulative = Vec::with_capacity(self.amplitudes.len());
        let mut acc = 0.0;
        for p in self.probabilities() {
            acc += p;
            cumulative.push(acc);
        }
        let last = self.amplitudes.len() - 1;

        (0..shots)
            .map(|_| {
                let r: f64 = rng.r#gen::<f64>() * acc;
                cumulative.partition_point(|&c| c <= r).min(last)
            })
            .collect()
    }
}

fn matrix_x() -> Matrix2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

fn phase(lambda: f64) -> Matrix2 {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, lambda)]]
}

fn single_qubit_matrix(gate: &StandardGate) -> Option<Matrix2> {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    Some(match gate {
        StandardGate::H => [[h, h], [h, -h]],
        StandardGate::X => matrix_x(),
        StandardGate::Y => [[ZERO, -I], [I, ZERO]],
        StandardGate::Z => [[ONE, ZERO], [ZERO, -ONE]],
        StandardGate::S => phase(FRAC_PI_2),
        StandardGate::Sdg => phase(-FRAC_PI_2),
        StandardGate::T => phase(FRAC_PI_4),
        StandardGate::Tdg => phase(-FRAC_PI_4),
        StandardGate::Rx(theta) => {
            let (s, c) = (theta.radians() / 2.0).sin_cos();
            let mis = Complex64::new(0.0, -s);
            [[Complex64::new(c, 0.0), mis], [mis, Complex64::new(c, 0.0)]]
        }
        StandardGate::Ry(theta) => {
            let (s, c) = (theta.radians() / 2.0).sin_cos();
            [
                [Complex64::new(c, 0.0), Complex64::new(-s, 0.0)],
                [Complex64::new(s, 0.0), Complex64::new(c, 0.0)],
            ]
        }
        StandardGate::Rz(theta) => {
            let half = theta.radians() / 2.0;
            [
                [Complex64::from_polar(1.0, -half), ZERO],
                [ZERO, Complex64::from_polar(1.0, half)],
            ]
        }
        StandardGate::P(lambda) => phase(lambda.radians()),
        StandardGate::CX | StandardGate::CZ | StandardGate::CP(_) | StandardGate::Swap => {
            return None;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpe_ir::Angle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn apply(sv: &mut Statevector, gate: impl Into<Gate>, qubits: &[u32]) {
        let qubits: Vec<QubitId> = qubits.iter().map(|&q| QubitId(q)).collect();
        sv.apply_gate(&gate.into(), &qubits).unwrap();
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes()[0], ONE));
        assert!(sv.amplitudes()[1..].iter().all(|&a| approx_eq(a, ZERO)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        apply(&mut sv, StandardGate::H, &[0]);
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes()[0], h));
        assert!(approx_eq(sv.amplitudes()[1], h));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        apply(&mut sv, StandardGate::H, &[0]);
        apply(&mut sv, StandardGate::CX, &[0, 1]);
        let p = sv.probabilities();
        assert!((p[0] - 0.5).abs() < 1e-10);
        assert!((p[3] - 0.5).abs() < 1e-10);
        assert!(p[1].abs() < 1e-10 && p[2].abs() < 1e-10);
    }

    #[test]
    fn test_swap() {
        let mut sv = Statevector::new(2);
        apply(&mut sv, StandardGate::X, &[0]);
        apply(&mut sv, StandardGate::Swap, &[0, 1]);
        assert!(approx_eq(sv.amplitudes()[2], ONE));
    }

    #[test]
    fn test_phase_is_in_half_turns() {
        let mut sv = Statevector::new(1);
        apply(&mut sv, StandardGate::X, &[0]);
        apply(&mut sv, StandardGate::P(Angle::half_turns(0.5)), &[0]);
        assert!(approx_eq(sv.amplitudes()[1], I));
    }

    #[test]
    fn test_cz_and_cp_agree_at_one_half_turn() {
        let mut a = Statevector::new(2);
        let mut b = Statevector::new(2);
        for sv in [&mut a, &mut b] {
            apply(sv, StandardGate::H, &[0]);
            apply(sv, StandardGate::H, &[1]);
        }
        apply(&mut a, StandardGate::CZ, &[0, 1]);
        apply(&mut b, StandardGate::CP(Angle::half_turns(1.0)), &[0, 1]);
        for (x, y) in a.amplitudes().iter().zip(b.amplitudes()) {
            assert!(approx_eq(*x, *y));
        }
    }

    #[test]
    fn test_controlled_gate_respects_all_controls() {
        let ccx = Gate::from(StandardGate::X).controlled(2).unwrap();

        // Only one control set: target untouched.
        let mut sv = Statevector::new(3);
        apply(&mut sv, StandardGate::X, &[0]);
        apply(&mut sv, ccx.clone(), &[0, 1, 2]);
        assert!(approx_eq(sv.amplitudes()[0b001], ONE));

        // Both controls set: target flips.
        let mut sv = Statevector::new(3);
        apply(&mut sv, StandardGate::X, &[0]);
        apply(&mut sv, StandardGate::X, &[1]);
        apply(&mut sv, ccx, &[0, 1, 2]);
        assert!(approx_eq(sv.amplitudes()[0b111], ONE));
    }

    #[test]
    fn test_controlled_cp_adds_its_own_control() {
        // ctrl(1) @ cp(1.0): phase -1 only on |111⟩.
        let gate = Gate::from(StandardGate::CP(Angle::half_turns(1.0)))
            .controlled(1)
            .unwrap();
        let mut sv = Statevector::new(3);
        for q in 0..3 {
            apply(&mut sv, StandardGate::X, &[q]);
        }
        apply(&mut sv, gate, &[0, 1, 2]);
        assert!(approx_eq(sv.amplitudes()[0b111], -ONE));
    }

    #[test]
    fn test_box_rejected() {
        let mut c = qpe_ir::Circuit::with_size("b", 1, 0);
        c.h(QubitId(0)).unwrap();
        let b = qpe_ir::CircuitBox::new(&c).unwrap();
        let mut sv = Statevector::new(1);
        let err = sv.apply_gate(&Gate::Boxed(b), &[QubitId(0)]).unwrap_err();
        assert!(matches!(err, HalError::Unsupported(_)));
    }

    #[test]
    fn test_sample_deterministic() {
        let mut sv = Statevector::new(2);
        apply(&mut sv, StandardGate::X, &[1]);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(sv.sample_many(50, &mut rng).iter().all(|&i| i == 0b10));
    }
}
