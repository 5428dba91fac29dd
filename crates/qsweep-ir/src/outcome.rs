//! Classical measurement results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered result bits, one per measurement, in recording order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    bits: Vec<bool>,
}

impl MeasurementOutcome {
    /// Create an outcome from bits.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Parse `0`/`1` characters, first character is the first result.
    pub fn from_bitstring(s: &str) -> Option<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }

    /// Append one result bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Number of result bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if no measurement was recorded.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Result bits in recording order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of `1` results.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

impl From<Vec<bool>> for MeasurementOutcome {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl FromIterator<bool> for MeasurementOutcome {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for MeasurementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitstring_is_recording_order() {
        let outcome = MeasurementOutcome::from_bitstring("1010").unwrap();
        assert_eq!(outcome.bits(), &[true, false, true, false]);
        assert_eq!(outcome.to_string(), "1010");
        assert_eq!(outcome.count_ones(), 2);
    }

    #[test]
    fn test_invalid_bitstring() {
        assert!(MeasurementOutcome::from_bitstring("10x").is_none());
    }

    #[test]
    fn test_empty() {
        let outcome = MeasurementOutcome::default();
        assert!(outcome.is_empty());
        assert_eq!(outcome.count_ones(), 0);
    }
}
