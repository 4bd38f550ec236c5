//! Composite Aquaculture Suitability Index.
//!
//! Folds the per-category regulatory access scores together with per-state
//! environmental, economic and infrastructure indicators. The indicators
//! arrive pre-aggregated per state; producing them from spatial layers
//! happens outside this crate.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::scoring::normalize::NormalizationPolicy;
use crate::states::{self, ALL_STATES};
use crate::table::{format_number, Table, STATE_COL};

/// Raw indicator columns expected in the indicators CSV, in component order.
pub const INDICATOR_COLUMNS: [&str; 5] = ["env_quality", "sales", "programs", "open_coast_km2", "ports"];

pub const INDEX_COL: &str = "SuitabilityIndex";

const OUTPUT_COLUMNS: [&str; 8] = [
    STATE_COL,
    "EnvQuality_norm",
    "perm_norm",
    "sales_norm",
    "program_norm",
    "OpenCoast_norm",
    "port_norm",
    INDEX_COL,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitabilityWeights {
    pub env_quality: f64,
    pub regulatory: f64,
    pub sales: f64,
    pub programs: f64,
    pub open_coast: f64,
    pub ports: f64,
}

impl Default for SuitabilityWeights {
    fn default() -> Self {
        SuitabilityWeights {
            env_quality: 0.25,
            regulatory: 0.20,
            sales: 0.20,
            programs: 0.15,
            open_coast: 0.10,
            ports: 0.10,
        }
    }
}

/// How absent components enter the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingComponents {
    /// Absent components add nothing; the weights are not rescaled.
    #[default]
    ZeroFill,
    /// Divide by the total weight of the components that are present.
    Renormalize,
}

/// Normalized components for one state, all in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Components {
    pub env_quality: Option<f64>,
    pub regulatory: Option<f64>,
    pub sales: Option<f64>,
    pub programs: Option<f64>,
    pub open_coast: Option<f64>,
    pub ports: Option<f64>,
}

impl Components {
    fn weighted(&self, w: &SuitabilityWeights) -> [(Option<f64>, f64); 6] {
        [
            (self.env_quality, w.env_quality),
            (self.regulatory, w.regulatory),
            (self.sales, w.sales),
            (self.programs, w.programs),
            (self.open_coast, w.open_coast),
            (self.ports, w.ports),
        ]
    }

    /// `None` when no component is present.
    pub fn index(&self, weights: &SuitabilityWeights, missing: MissingComponents) -> Option<f64> {
        let present: Vec<(f64, f64)> = self
            .weighted(weights)
            .iter()
            .filter_map(|(v, w)| v.map(|v| (v, *w)))
            .collect();
        if present.is_empty() {
            return None;
        }
        let sum: f64 = present.iter().map(|(v, w)| v * w).sum();
        match missing {
            MissingComponents::ZeroFill => Some(sum),
            MissingComponents::Renormalize => {
                let total: f64 = present.iter().map(|(_, w)| w).sum();
                (total > 0.0).then(|| sum / total)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuitabilityRow {
    pub state: &'static str,
    pub components: Components,
    pub index: Option<f64>,
}

/// Per-state mean of the regulatory scores across report categories,
/// skipping missing scores. Indexed like [`ALL_STATES`].
pub fn mean_regulatory(categories: &[Vec<(String, Option<f64>)>]) -> Vec<Option<f64>> {
    let mut sums = vec![(0.0_f64, 0_usize); ALL_STATES.len()];
    for (raw, score) in categories.iter().flatten() {
        let Some(state) = states::canonicalize(raw) else {
            warn!(state = raw.as_str(), "skipping unknown state in regulatory scores");
            continue;
        };
        if let (Some(idx), Some(v)) = (states::index_of(state), score) {
            sums[idx].0 += v;
            sums[idx].1 += 1;
        }
    }
    sums.into_iter()
        .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
        .collect()
}

/// Raw indicator values per state from the indicators table. Columns are
/// [`INDICATOR_COLUMNS`]; non-numeric cells are missing.
pub fn read_indicators(table: &Table, path: &Path) -> Result<Vec<[Option<f64>; 5]>> {
    let state_col = table.column(STATE_COL, path)?;
    let cols = INDICATOR_COLUMNS
        .iter()
        .map(|c| table.column(c, path))
        .collect::<Result<Vec<usize>>>()?;

    let mut values = vec![[None; 5]; ALL_STATES.len()];
    for row in 0..table.rows.len() {
        let raw = table.cell(row, state_col);
        let Some(idx) = states::canonicalize(raw).and_then(states::index_of) else {
            warn!(state = raw, "skipping unknown state in indicators");
            continue;
        };
        for (slot, &col) in values[idx].iter_mut().zip(&cols) {
            *slot = table.cell(row, col).trim().parse::<f64>().ok().filter(|v| v.is_finite());
        }
    }
    Ok(values)
}

pub fn merge(
    regulatory: &[Option<f64>],
    indicators: &[[Option<f64>; 5]],
    weights: &SuitabilityWeights,
    missing: MissingComponents,
) -> Vec<SuitabilityRow> {
    let policy = NormalizationPolicy::SUITABILITY;
    let indicator = |k: usize| -> Vec<Option<f64>> {
        let column: Vec<Option<f64>> = indicators.iter().map(|row| row[k]).collect();
        policy.normalize_column(&column)
    };
    let perm = policy.normalize_column(regulatory);
    let env = indicator(0);
    let sales = indicator(1);
    let programs = indicator(2);
    let open_coast = indicator(3);
    let ports = indicator(4);

    let rows: Vec<SuitabilityRow> = ALL_STATES
        .iter()
        .enumerate()
        .map(|(i, &state)| {
            let at = |col: &[Option<f64>]| col.get(i).copied().flatten();
            let components = Components {
                env_quality: at(&env),
                regulatory: at(&perm),
                sales: at(&sales),
                programs: at(&programs),
                open_coast: at(&open_coast),
                ports: at(&ports),
            };
            SuitabilityRow {
                state,
                components,
                index: components.index(weights, missing),
            }
        })
        .collect();

    let scored = rows.iter().filter(|r| r.index.is_some()).count();
    info!(states = rows.len(), scored, ?missing, "merged suitability index");
    rows
}

pub fn suitability_table(rows: &[SuitabilityRow]) -> Table {
    let mut table = Table::new(&OUTPUT_COLUMNS);
    table.rows = rows
        .iter()
        .map(|r| {
            let c = &r.components;
            vec![
                r.state.to_string(),
                format_number(c.env_quality),
                format_number(c.regulatory),
                format_number(c.sales),
                format_number(c.programs),
                format_number(c.open_coast),
                format_number(c.ports),
                format_number(r.index),
            ]
        })
        .collect();
    table
}

// ── Tests ──
