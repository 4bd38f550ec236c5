pub mod composite;
pub mod fields;
pub mod normalize;

use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::table::{format_number, Table, FEES_COL, LAWS_COL, STATE_COL, TIMEFRAME_COL};
use composite::{NormalizedFields, RegulatoryAccessScore, ScoreWeights};
use normalize::{BatchStats, NormalizationPolicy};

pub const SCORE_COL: &str = "regulatory_access_score";

/// Numeric and normalized columns of a scored batch, row-aligned with the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredColumns {
    pub laws_numeric: Vec<Option<f64>>,
    pub fees_numeric: Vec<Option<f64>>,
    pub time_numeric: Vec<Option<f64>>,
    pub normalized: Vec<NormalizedFields>,
    pub scores: Vec<RegulatoryAccessScore>,
}

/// Parse, normalize and compose over the whole batch. Normalization needs
/// every row's value, so nothing is emitted until all rows are parsed.
pub fn score_rows(laws: &[&str], fees: &[&str], time: &[&str], weights: &ScoreWeights) -> ScoredColumns {
    let laws_numeric: Vec<Option<f64>> = laws.iter().map(|v| fields::parse_laws(v)).collect();
    let fees_numeric: Vec<Option<f64>> = fees.iter().map(|v| fields::parse_fees(v)).collect();
    let time_numeric: Vec<Option<f64>> = time.iter().map(|v| fields::parse_timeframe(v)).collect();

    let policy = NormalizationPolicy::REGULATORY;
    // Law status is already 0/1 and is not rescaled.
    let laws_norm = laws_numeric.clone();
    let fees_norm = policy.normalize_column(&fees_numeric);
    let time_norm = policy.normalize_column(&time_numeric);
    for (name, column) in [("fees", &fees_numeric), ("time", &time_numeric)] {
        match BatchStats::from_column(column) {
            Some(s) => debug!(field = name, min = s.min, max = s.max, present = s.present, "batch stats"),
            None => debug!(field = name, "no values present"),
        }
    }

    let normalized: Vec<NormalizedFields> = laws_norm
        .iter()
        .zip(&fees_norm)
        .zip(&time_norm)
        .map(|((&laws, &fees), &time)| NormalizedFields { laws, fees, time })
        .collect();
    let scores = normalized.iter().map(|n| weights.compose(n)).collect();

    ScoredColumns {
        laws_numeric,
        fees_numeric,
        time_numeric,
        normalized,
        scores,
    }
}

/// Stage 2 over a parsed table: every input column is kept and the seven
/// computed columns are appended.
pub fn score_table(mut table: Table, path: &Path, weights: &ScoreWeights) -> Result<Table> {
    let state_col = table.column(STATE_COL, path)?;
    let laws_col = table.column(LAWS_COL, path)?;
    let fees_col = table.column(FEES_COL, path)?;
    let time_col = table.column(TIMEFRAME_COL, path)?;

    let n = table.rows.len();
    let laws: Vec<&str> = (0..n).map(|i| table.cell(i, laws_col)).collect();
    let fees: Vec<&str> = (0..n).map(|i| table.cell(i, fees_col)).collect();
    let time: Vec<&str> = (0..n).map(|i| table.cell(i, time_col)).collect();
    let scored = score_rows(&laws, &fees, &time, weights);

    for (i, score) in scored.scores.iter().enumerate() {
        debug!(state = table.cell(i, state_col), %score, "scored");
    }
    let insufficient = scored.scores.iter().filter(|s| s.value().is_none()).count();
    info!(rows = n, insufficient, "scored table");

    let numbers = |values: &[Option<f64>]| values.iter().map(|v| format_number(*v)).collect::<Vec<_>>();
    let norm = |pick: fn(&NormalizedFields) -> Option<f64>| {
        scored.normalized.iter().map(|n| format_number(pick(n))).collect::<Vec<_>>()
    };

    table.push_column("laws_numeric", numbers(&scored.laws_numeric));
    table.push_column("fees_numeric", numbers(&scored.fees_numeric));
    table.push_column("time_numeric", numbers(&scored.time_numeric));
    table.push_column("laws_norm", norm(|n| n.laws));
    table.push_column("fees_norm", norm(|n| n.fees));
    table.push_column("time_norm", norm(|n| n.time));
    table.push_column(SCORE_COL, scored.scores.iter().map(|s| s.to_string()).collect());
    Ok(table)
}

/// `(state, score)` pairs from a scored table; `N/A` and blanks are `None`.
pub fn read_scores(table: &Table, path: &Path, column: &str) -> Result<Vec<(String, Option<f64>)>> {
    let state_col = table.column(STATE_COL, path)?;
    let score_col = table.column(column, path)?;
    Ok((0..table.rows.len())
        .map(|i| {
            let score = table.cell(i, score_col).trim().parse::<f64>().ok().filter(|v| v.is_finite());
            (table.cell(i, state_col).to_string(), score)
        })
        .collect())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn column<'a>(table: &'a Table, name: &str) -> Vec<&'a str> {
        let col = table.column(name, Path::new("t.csv")).unwrap();
        (0..table.rows.len()).map(|i| table.cell(i, col)).collect()
    }

    fn parsed(rows: &[[&str; 4]]) -> Table {
        let mut table = Table::new(&[STATE_COL, LAWS_COL, FEES_COL, TIMEFRAME_COL]);
        table.rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        table
    }

    #[test]
    fn appends_seven_columns() {
        let table = parsed(&[["Alabama", "YES", "100.0", "1.5 years"]]);
        let out = score_table(table, Path::new("t.csv"), &ScoreWeights::default()).unwrap();
        assert_eq!(
            &out.headers[4..],
            &[
                "laws_numeric",
                "fees_numeric",
                "time_numeric",
                "laws_norm",
                "fees_norm",
                "time_norm",
                SCORE_COL
            ]
        );
        assert_eq!(out.rows[0][4..7], ["1.0", "100.0", "18.0"]);
    }

    #[test]
    fn batch_relative_scores() {
        let table = parsed(&[
            ["Alabama", "YES", "100.0", "6 months"],
            ["Alaska", "NO", "300.0", "18 months"],
            ["Arizona", "N/A", "N/A", "N/A"],
            ["Arkansas", "N/A", "200.0", "N/A"],
        ]);
        let out = score_table(table, Path::new("t.csv"), &ScoreWeights::default()).unwrap();
        assert_eq!(column(&out, "fees_norm"), vec!["0.0", "1.0", "", "0.5"]);
        assert_eq!(column(&out, "time_norm"), vec!["0.0", "1.0", "", ""]);
        assert_eq!(column(&out, "laws_norm"), vec!["1.0", "0.0", "", ""]);
        // Alabama: (0.2*1 + 0.4*0 + 0.4*0) / 1.0
        let scores = column(&out, SCORE_COL);
        assert_eq!(scores[0].parse::<f64>().unwrap(), 0.2);
        assert_eq!(scores[2], "N/A");
        // only the fee field is present, so it carries full weight
        assert_eq!(scores[3], "0.5");
    }

    #[test]
    fn fee_cells_are_reparsed_loosely() {
        let cols = score_rows(&["YES"], &["350.5"], &["N/A"], &ScoreWeights::default());
        assert_eq!(cols.fees_numeric, vec![Some(355.0)]);
    }

    #[test]
    fn single_fee_is_degenerate_one() {
        let cols = score_rows(&["N/A", "N/A"], &["50", "No"], &["N/A", "N/A"], &ScoreWeights::default());
        assert_eq!(cols.normalized[0].fees, Some(1.0));
        assert_eq!(cols.normalized[1].fees, None);
        assert_eq!(cols.scores[1], RegulatoryAccessScore::InsufficientData);
    }

    #[test]
    fn extra_input_columns_survive() {
        let mut table = parsed(&[["Ohio", "YES", "N/A", "N/A"]]);
        table.headers.insert(0, "id".into());
        table.rows[0].insert(0, "7".into());
        let out = score_table(table, Path::new("t.csv"), &ScoreWeights::default()).unwrap();
        assert_eq!(out.headers[0], "id");
        assert_eq!(out.rows[0][0], "7");
        assert_eq!(column(&out, SCORE_COL), vec!["1.0"]);
    }

    #[test]
    fn missing_required_column_fails() {
        let table = Table::new(&[STATE_COL, LAWS_COL, FEES_COL]);
        assert!(score_table(table, Path::new("t.csv"), &ScoreWeights::default()).is_err());
    }

    #[test]
    fn read_scores_treats_na_as_missing() {
        let mut table = Table::new(&[STATE_COL, SCORE_COL]);
        table.rows.push(vec!["Maine".into(), "0.75".into()]);
        table.rows.push(vec!["Ohio".into(), "N/A".into()]);
        let scores = read_scores(&table, Path::new("t.csv"), SCORE_COL).unwrap();
        assert_eq!(scores, vec![("Maine".to_string(), Some(0.75)), ("Ohio".to_string(), None)]);
    }
}
