use itertools::{Itertools, MinMaxResult};

/// Range of the present values in one column, computed once per batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    pub min: f64,
    pub max: f64,
    pub present: usize,
}

impl BatchStats {
    /// `None` when no value in the column is present.
    pub fn from_column(values: &[Option<f64>]) -> Option<Self> {
        let present = values.iter().flatten().count();
        let (min, max) = match values.iter().flatten().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };
        Some(BatchStats { min, max, present })
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// What a present value becomes when every present value is equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateStrategy {
    ConstantOne,
    ConstantZero,
}

impl DegenerateStrategy {
    fn value(self) -> f64 {
        match self {
            DegenerateStrategy::ConstantOne => 1.0,
            DegenerateStrategy::ConstantZero => 0.0,
        }
    }
}

/// Min-max scaling onto [0, 1] with an explicit rule for equal-valued batches.
/// Missing values always stay missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationPolicy {
    pub all_equal: DegenerateStrategy,
}

impl NormalizationPolicy {
    pub const REGULATORY: NormalizationPolicy = NormalizationPolicy {
        all_equal: DegenerateStrategy::ConstantOne,
    };

    pub const SUITABILITY: NormalizationPolicy = NormalizationPolicy {
        all_equal: DegenerateStrategy::ConstantZero,
    };

    pub fn apply(&self, value: Option<f64>, stats: &BatchStats) -> Option<f64> {
        let v = value?;
        if stats.is_degenerate() {
            return Some(self.all_equal.value());
        }
        Some((v - stats.min) / (stats.max - stats.min))
    }

    pub fn normalize_column(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        match BatchStats::from_column(values) {
            Some(stats) => values.iter().map(|v| self.apply(*v, &stats)).collect(),
            None => values.to_vec(),
        }
    }
}

// ── Tests ──
