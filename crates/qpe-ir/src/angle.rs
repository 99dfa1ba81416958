//! Rotation angles measured in half-turns.
//!
//! One half-turn is π radians, so `Angle::half_turns(0.5)` is a quarter
//! rotation. Phase-estimation problems are usually stated in this unit, and
//! keeping it avoids repeated multiplication by π when building circuits.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::Neg;

/// A concrete rotation angle in half-turns.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    /// The zero angle.
    pub const ZERO: Angle = Angle(0.0);

    /// Angle of `value` half-turns.
    #[inline]
    pub const fn half_turns(value: f64) -> Self {
        Angle(value)
    }

    /// Angle of `value` radians.
    #[inline]
    pub fn from_radians(value: f64) -> Self {
        Angle(value / PI)
    }

    /// Value in half-turns.
    #[inline]
    pub fn as_half_turns(self) -> f64 {
        self.0
    }

    /// Value in radians.
    #[inline]
    pub fn radians(self) -> f64 {
        self.0 * PI
    }

    /// `1 / 2^k` half-turns, the rotation used by the `k`-th QFT stage.
    pub fn dyadic(k: u32) -> Self {
        Angle(0.5_f64.powi(i32::try_from(k).unwrap_or(i32::MAX)))
    }

    /// Whether two angles agree to within `tol` half-turns.
    pub fn approx_eq(self, other: Angle, tol: f64) -> bool {
        (self.0 - other.0).abs() <= tol
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl From<f64> for Angle {
    /// Interprets the value as half-turns.
    fn from(value: f64) -> Self {
        Angle(value)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}π", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let a = Angle::half_turns(0.5);
        assert!((a.radians() - PI / 2.0).abs() < 1e-12);

        let b = Angle::from_radians(PI / 4.0);
        assert!((b.as_half_turns() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_dyadic() {
        assert_eq!(Angle::dyadic(0), Angle::half_turns(1.0));
        assert_eq!(Angle::dyadic(1), Angle::half_turns(0.5));
        assert_eq!(Angle::dyadic(3), Angle::half_turns(0.125));
    }

    #[test]
    fn test_negation() {
        let a = Angle::half_turns(0.73);
        assert_eq!((-a).as_half_turns(), -0.73);
        assert_eq!(-(-a), a);
    }

    #[test]
    fn test_display() {
        assert_eq!(Angle::half_turns(0.25).to_string(), "0.25π");
    }
}
