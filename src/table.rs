use std::path::Path;

use tracing::debug;

use crate::error::{AquaError, Result};
use crate::parser::StateRecord;

pub const STATE_COL: &str = "state";
pub const LAWS_COL: &str = "aquaculture leasing/permitting law(s)";
pub const FEES_COL: &str = "Application Fees";
pub const TIMEFRAME_COL: &str = "Lease Review/Approval Timeframe";

/// A whole CSV file held in memory as text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| AquaError::io(path, e))?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let rows = reader
            .records()
            .map(|r| r.map(|rec| rec.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, _>>()?;
        let table = Table { headers, rows };
        debug!(path = %path.display(), rows = table.rows.len(), "read table");
        Ok(table)
    }

    /// Index of a required column.
    pub fn column(&self, name: &str, path: &Path) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| AquaError::MissingColumn {
                column: name.to_string(),
                path: path.to_path_buf(),
            })
    }

    /// Cell text; short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn push_column(&mut self, name: &str, values: Vec<String>) {
        let width = self.headers.len();
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.resize(width, String::new());
            row.push(value);
        }
    }

    /// The file is serialized in memory first so a failure never leaves a
    /// partially written output behind.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AquaError::io(path, e.into_error()))?;
        std::fs::write(path, bytes).map_err(|e| AquaError::io(path, e))?;
        debug!(path = %path.display(), rows = self.rows.len(), "wrote table");
        Ok(())
    }
}

/// Stage-1 output: one row per state, unknown values as `N/A`.
pub fn parsed_table(records: &[StateRecord]) -> Table {
    let mut table = Table::new(&[STATE_COL, LAWS_COL, FEES_COL, TIMEFRAME_COL]);
    table.rows = records
        .iter()
        .map(|r| {
            vec![
                r.state.to_string(),
                r.fields.law_status.to_string(),
                r.fields.fee_total.to_string(),
                r.fields.timeframe.to_string(),
            ]
        })
        .collect();
    table
}

/// Float cell in shortest round-trip form (`1.0`, `0.25`); missing is empty.
pub fn format_number(value: Option<f64>) -> String {
    value.map(|v| format!("{v:?}")).unwrap_or_default()
}

// ── Tests ──
