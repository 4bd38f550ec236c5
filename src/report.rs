use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// Category of a state-by-state leasing/permitting report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportType {
    Algae,
    Finfish,
    Shellfish,
}

impl ReportType {
    /// Literal heading that follows each state name in this report's layout.
    pub fn section_header(self) -> &'static str {
        match self {
            ReportType::Algae => "Summary of the Status of Algae Culture",
            ReportType::Finfish => "Summary of the Status of Finfish Culture",
            ReportType::Shellfish => "Special Notes",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportType::Algae => "algae",
            ReportType::Finfish => "finfish",
            ReportType::Shellfish => "shellfish",
        };
        f.pad(name)
    }
}

/// Swap the last occurrence of `suffix` for `replacement`, or append
/// `replacement` when the path does not contain `suffix`.
///
/// `report.txt` with (`.txt`, `_parsed.csv`) becomes `report_parsed.csv`.
pub fn derive_output_path(input: &Path, suffix: &str, replacement: &str) -> PathBuf {
    let raw = input.to_string_lossy();
    let stem = match raw.rfind(suffix) {
        Some(idx) => &raw[..idx],
        None => &raw[..],
    };
    PathBuf::from(format!("{stem}{replacement}"))
}

pub fn parsed_csv_path(input: &Path) -> PathBuf {
    derive_output_path(input, ".txt", "_parsed.csv")
}

pub fn scored_csv_path(input: &Path) -> PathBuf {
    derive_output_path(input, ".csv", "_scored.csv")
}

// ── Tests ──
