use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::extract::NOT_AVAILABLE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub laws: f64,
    pub fees: f64,
    pub time: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            laws: 0.2,
            fees: 0.4,
            time: 0.4,
        }
    }
}

/// Normalized inputs of one state's score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedFields {
    pub laws: Option<f64>,
    pub fees: Option<f64>,
    pub time: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegulatoryAccessScore {
    Score(f64),
    InsufficientData,
}

impl RegulatoryAccessScore {
    pub fn value(self) -> Option<f64> {
        match self {
            RegulatoryAccessScore::Score(v) => Some(v),
            RegulatoryAccessScore::InsufficientData => None,
        }
    }
}

impl fmt::Display for RegulatoryAccessScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegulatoryAccessScore::Score(v) => write!(f, "{v:?}"),
            RegulatoryAccessScore::InsufficientData => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl ScoreWeights {
    /// Weighted mean over the present fields only: the weights of missing
    /// fields drop out of the denominator.
    pub fn compose(&self, fields: &NormalizedFields) -> RegulatoryAccessScore {
        let parts = [
            (fields.laws, self.laws),
            (fields.fees, self.fees),
            (fields.time, self.time),
        ];
        let (weighted, weight_sum) = parts
            .iter()
            .filter_map(|(value, weight)| value.map(|v| (v * weight, *weight)))
            .fold((0.0, 0.0), |(s, w), (vs, vw)| (s + vs, w + vw));

        if weight_sum == 0.0 {
            RegulatoryAccessScore::InsufficientData
        } else {
            RegulatoryAccessScore::Score(weighted / weight_sum)
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn score(laws: Option<f64>, fees: Option<f64>, time: Option<f64>) -> RegulatoryAccessScore {
        ScoreWeights::default().compose(&NormalizedFields { laws, fees, time })
    }

    fn approx(actual: RegulatoryAccessScore, expected: f64) {
        let v = actual.value().unwrap();
        assert!((v - expected).abs() < 1e-12, "expected {expected}, got {v}");
    }

    #[test]
    fn only_fees_present_is_renormalized() {
        approx(score(None, Some(0.8), None), 0.8);
    }

    #[test]
    fn all_present() {
        approx(score(Some(1.0), Some(0.5), Some(0.25)), 0.2 + 0.2 + 0.1);
    }

    #[test]
    fn laws_and_time() {
        // (0.2 * 1 + 0.4 * 0.5) / 0.6
        approx(score(Some(1.0), None, Some(0.5)), 0.4 / 0.6);
    }

    #[test]
    fn nothing_present_is_insufficient() {
        assert_eq!(score(None, None, None), RegulatoryAccessScore::InsufficientData);
    }

    #[test]
    fn zero_is_not_insufficient() {
        assert_eq!(score(Some(0.0), None, None), RegulatoryAccessScore::Score(0.0));
        assert_ne!(
            RegulatoryAccessScore::Score(0.0),
            RegulatoryAccessScore::InsufficientData
        );
    }

    #[test]
    fn display() {
        assert_eq!(RegulatoryAccessScore::Score(0.8).to_string(), "0.8");
        assert_eq!(RegulatoryAccessScore::Score(1.0).to_string(), "1.0");
        assert_eq!(RegulatoryAccessScore::InsufficientData.to_string(), "N/A");
    }
}
