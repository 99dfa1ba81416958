//! Decoding measured bitstrings into phase estimates.

use std::fmt;

use qpe_hal::Counts;
use serde::{Deserialize, Serialize};

use crate::error::{QpeError, QpeResult};

/// The phase read off the most frequent outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseEstimate {
    /// Selected bitstring, most significant bit first.
    pub bitstring: String,
    /// The bitstring as an unsigned integer `j`.
    pub value: u64,
    /// Number of shots that produced it.
    pub count: u64,
    /// Number of measurement bits `m`.
    pub resolution: u32,
    /// `j / 2^m`, in turns, in `[0, 1)`.
    pub phase: f64,
}

impl PhaseEstimate {
    /// Decode a single bitstring.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn from_bitstring(bitstring: &str, count: u64) -> QpeResult<Self> {
        let value = parse_bitstring(bitstring)?;
        let resolution = bitstring.len() as u32;
        Ok(Self {
            bitstring: bitstring.to_string(),
            value,
            count,
            resolution,
            phase: value as f64 / 2f64.powi(resolution as i32),
        })
    }

    /// The estimate expressed as the angle of a phase gate, in half-turns.
    pub fn half_turns(&self) -> f64 {
        2.0 * self.phase
    }

    /// Distance between `theta` (half-turns) and the estimated angle.
    pub fn error_against(&self, theta: f64) -> f64 {
        (theta - self.half_turns()).abs()
    }
}

impl fmt::Display for PhaseEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}/2^{} = {}",
            self.bitstring, self.value, self.resolution, self.phase
        )
    }
}

/// Estimate the phase from measurement counts.
///
/// The most frequent bitstring wins; ties go to the lexicographically
/// smallest one, which is also the smallest phase.
pub fn estimate_phase(counts: &Counts) -> QpeResult<PhaseEstimate> {
    for (bitstring, _) in counts.iter() {
        parse_bitstring(bitstring)?;
    }
    let (bitstring, count) = counts.most_frequent().ok_or(QpeError::EmptyOutcome)?;
    PhaseEstimate::from_bitstring(bitstring, count)
}

/// Estimated phase in `[0, 1)`.
pub fn decode_phase(counts: &Counts) -> QpeResult<f64> {
    Ok(estimate_phase(counts)?.phase)
}

/// Unsigned binary, first character most significant.
fn parse_bitstring(bitstring: &str) -> QpeResult<u64> {
    if bitstring.is_empty() || bitstring.len() > 64 {
        return Err(QpeError::MalformedBitstring(bitstring.to_string()));
    }
    bitstring.bytes().try_fold(0u64, |acc, b| match b {
        b'0' => Ok(acc << 1),
        b'1' => Ok(acc << 1 | 1),
        _ => Err(QpeError::MalformedBitstring(bitstring.to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_mass() {
        let counts: Counts = [("101", 1000)].into_iter().collect();
        assert_eq!(decode_phase(&counts).unwrap(), 0.625);
    }

    #[test]
    fn test_most_frequent_wins() {
        let counts: Counts = [("0110", 700), ("0101", 200), ("0111", 100)]
            .into_iter()
            .collect();
        let est = estimate_phase(&counts).unwrap();
        assert_eq!(est.bitstring, "0110");
        assert_eq!(est.value, 6);
        assert_eq!(est.count, 700);
        assert_eq!(est.resolution, 4);
        assert_eq!(est.phase, 0.375);
    }

    #[test]
    fn test_tie_goes_to_smaller_phase() {
        let counts: Counts = [("11", 5), ("01", 5)].into_iter().collect();
        assert_eq!(decode_phase(&counts).unwrap(), 0.25);
    }

    #[test]
    fn test_empty_outcome() {
        assert!(matches!(
            decode_phase(&Counts::new()),
            Err(QpeError::EmptyOutcome)
        ));
        let zero: Counts = [("10", 0)].into_iter().collect();
        assert!(matches!(decode_phase(&zero), Err(QpeError::EmptyOutcome)));
    }

    #[test]
    fn test_malformed() {
        let counts: Counts = [("10x", 3)].into_iter().collect();
        assert!(matches!(
            decode_phase(&counts),
            Err(QpeError::MalformedBitstring(s)) if s == "10x"
        ));
        let counts: Counts = [("", 3)].into_iter().collect();
        assert!(matches!(
            decode_phase(&counts),
            Err(QpeError::MalformedBitstring(_))
        ));
    }

    #[test]
    fn test_all_zero_and_all_one() {
        let zeros: Counts = [("0000", 1)].into_iter().collect();
        assert_eq!(decode_phase(&zeros).unwrap(), 0.0);
        let ones: Counts = [("1111", 1)].into_iter().collect();
        assert_eq!(decode_phase(&ones).unwrap(), 15.0 / 16.0);
    }

    #[test]
    fn test_error_against() {
        let est = PhaseEstimate::from_bitstring("0110", 1).unwrap();
        assert!((est.half_turns() - 0.75).abs() < 1e-12);
        assert!((est.error_against(0.73) - 0.02).abs() < 1e-12);
        assert_eq!(est.to_string(), "0110 -> 6/2^4 = 0.375");
    }
}
