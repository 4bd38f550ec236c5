use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::{find_label, window_after, NOT_AVAILABLE};

static DOLLAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(\d[\d,.]*)").unwrap());

const FEES_LABEL: &str = "Application Fees";

/// Sum of the application fees listed for a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeeTotal {
    Amount(f64),
    /// Label present, but no dollar amounts in the window.
    NoFee,
    /// Label absent.
    Unknown,
}

impl fmt::Display for FeeTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps a trailing ".0" on whole amounts: 100.0, 350.5
            FeeTotal::Amount(v) => write!(f, "{v:?}"),
            FeeTotal::NoFee => f.write_str("No"),
            FeeTotal::Unknown => f.write_str(NOT_AVAILABLE),
        }
    }
}

pub fn extract(lines: &[&str], window: usize) -> FeeTotal {
    let Some(idx) = find_label(lines, FEES_LABEL) else {
        return FeeTotal::Unknown;
    };
    let amounts: Vec<f64> = window_after(lines, idx, window)
        .iter()
        .flat_map(|line| dollar_amounts(line))
        .collect();
    if amounts.is_empty() {
        FeeTotal::NoFee
    } else {
        FeeTotal::Amount(amounts.iter().sum())
    }
}

/// Every `$<amount>` token on the line. Thousands separators are dropped and
/// sentence punctuation after the number is ignored.
fn dollar_amounts(line: &str) -> Vec<f64> {
    DOLLAR_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let raw = caps.get(1)?.as_str();
            let cleaned = raw.replace(',', "");
            let cleaned = cleaned.trim_end_matches('.');
            match cleaned.parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(token = raw, "skipping unparseable dollar amount");
                    None
                }
            }
        })
        .collect()
}

// ── Tests ──
