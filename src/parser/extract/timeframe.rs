use std::fmt;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use super::{find_label, window_after, NOT_AVAILABLE};

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+\.?\d*)\s*(years|months)").unwrap());

const TIMEFRAME_LABEL: &str = "Lease Review/Approval Timeframe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Years,
    Months,
}

/// One `<number> years|months` mention, kept as written.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationMention {
    pub number: String,
    pub unit_text: String,
    pub value: f64,
    pub unit: TimeUnit,
}

impl DurationMention {
    pub fn months(&self) -> f64 {
        match self.unit {
            TimeUnit::Years => self.value * 12.0,
            TimeUnit::Months => self.value,
        }
    }
}

/// Review/approval durations in the order they appear. Empty means unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeframe {
    pub durations: Vec<DurationMention>,
}

impl Timeframe {
    /// Total of every mention converted to months.
    pub fn months(&self) -> Option<f64> {
        if self.durations.is_empty() {
            return None;
        }
        Some(self.durations.iter().map(DurationMention::months).sum())
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.durations.is_empty() {
            return f.write_str(NOT_AVAILABLE);
        }
        let joined = self
            .durations
            .iter()
            .map(|d| format!("{} {}", d.number, d.unit_text))
            .join("; ");
        f.write_str(&joined)
    }
}

pub fn extract(lines: &[&str], window: usize) -> Timeframe {
    let Some(idx) = find_label(lines, TIMEFRAME_LABEL) else {
        return Timeframe::default();
    };
    let durations = window_after(lines, idx, window)
        .iter()
        .flat_map(|line| DURATION_RE.captures_iter(*line))
        .filter_map(|caps| {
            let number = caps.get(1)?.as_str();
            let unit_text = caps.get(2)?.as_str();
            let value = number.parse::<f64>().ok()?;
            let unit = if unit_text.eq_ignore_ascii_case("years") {
                TimeUnit::Years
            } else {
                TimeUnit::Months
            };
            Some(DurationMention {
                number: number.to_string(),
                unit_text: unit_text.to_string(),
                value,
                unit,
            })
        })
        .collect();
    Timeframe { durations }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn timeframe(text: &str) -> Timeframe {
        let lines: Vec<&str> = text.lines().collect();
        extract(&lines, 10)
    }

    #[test]
    fn years_convert_to_months() {
        let t = timeframe("Lease Review/Approval Timeframe\n1.5 years");
        assert_eq!(t.months(), Some(18.0));
        assert_eq!(t.to_string(), "1.5 years");
    }

    #[test]
    fn months_alone() {
        let t = timeframe("Lease Review/Approval Timeframe\n6 months");
        assert_eq!(t.months(), Some(6.0));
    }

    #[test]
    fn multiple_mentions_joined_in_order() {
        let t = timeframe("Lease Review/Approval Timeframe\n3 Months for review, 2 years total\n12months");
        assert_eq!(t.to_string(), "3 Months; 2 years; 12 months");
        assert_eq!(t.months(), Some(39.0));
    }

    #[test]
    fn singular_unit_is_not_a_mention() {
        let t = timeframe("Lease Review/Approval Timeframe\n1 year");
        assert_eq!(t.months(), None);
        assert_eq!(t.to_string(), "N/A");
    }

    #[test]
    fn missing_label_is_unknown() {
        assert_eq!(timeframe("Timeframe\n6 months"), Timeframe::default());
    }

    #[test]
    fn mentions_past_window_are_ignored() {
        let mut text = String::from("Lease Review/Approval Timeframe");
        for _ in 0..10 {
            text.push_str("\nfiller");
        }
        text.push_str("\n9 months");
        assert_eq!(timeframe(&text).months(), None);
    }
}
