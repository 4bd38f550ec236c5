pub mod fees;
pub mod laws;
pub mod timeframe;

pub use fees::FeeTotal;
pub use laws::LawStatus;
pub use timeframe::Timeframe;

/// Look-ahead windows used by the label-driven extractors.
#[derive(Debug, Clone, Copy)]
pub struct Windows {
    pub fees: usize,
    pub timeframe: usize,
}

impl Default for Windows {
    fn default() -> Self {
        Windows {
            fees: crate::settings::DEFAULT_FEE_WINDOW,
            timeframe: crate::settings::DEFAULT_TIMEFRAME_WINDOW,
        }
    }
}

/// Facts pulled from one state's section. Every field is extracted
/// independently; an empty section yields all-unknown fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub law_status: LawStatus,
    pub fee_total: FeeTotal,
    pub timeframe: Timeframe,
}

impl ExtractedFields {
    pub fn unknown() -> Self {
        ExtractedFields {
            law_status: LawStatus::Unknown,
            fee_total: FeeTotal::Unknown,
            timeframe: Timeframe::default(),
        }
    }
}

pub fn extract_all(section: &str, windows: Windows) -> ExtractedFields {
    if section.trim().is_empty() {
        return ExtractedFields::unknown();
    }
    let lines: Vec<&str> = section.lines().collect();
    ExtractedFields {
        law_status: laws::extract(&lines),
        fee_total: fees::extract(&lines, windows.fees),
        timeframe: timeframe::extract(&lines, windows.timeframe),
    }
}

/// Index of the first line containing `label`.
pub(crate) fn find_label(lines: &[&str], label: &str) -> Option<usize> {
    lines.iter().position(|l| l.contains(label))
}

/// Up to `window` lines following `idx`, clipped at the end of the section.
pub(crate) fn window_after<'a, 'l>(lines: &'a [&'l str], idx: usize, window: usize) -> &'a [&'l str] {
    let start = (idx + 1).min(lines.len());
    let end = idx.saturating_add(window).saturating_add(1).min(lines.len());
    &lines[start..end]
}

/// Marker written to CSV cells when a value could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/alaska_finfish_section.txt").unwrap()
    }

    #[test]
    fn empty_section_is_all_unknown() {
        assert_eq!(extract_all("", Windows::default()), ExtractedFields::unknown());
        assert_eq!(extract_all("  \n\n ", Windows::default()), ExtractedFields::unknown());
    }

    #[test]
    fn fields_are_independent() {
        let section = "Application Fees\n$50\nno other labels here";
        let fields = extract_all(section, Windows::default());
        assert_eq!(fields.law_status, LawStatus::Unknown);
        assert_eq!(fields.fee_total, FeeTotal::Amount(50.0));
        assert_eq!(fields.timeframe.months(), None);
    }

    #[test]
    fn fixture_section() {
        let fields = extract_all(&fixture(), Windows::default());
        assert_eq!(fields.law_status, LawStatus::Yes);
        assert_eq!(fields.fee_total, FeeTotal::Amount(1350.0));
        assert_eq!(fields.timeframe.to_string(), "6 months; 1 years");
        assert_eq!(fields.timeframe.months(), Some(18.0));
    }

    #[test]
    fn window_after_clips() {
        let lines = ["a", "b", "c"];
        assert_eq!(window_after(&lines, 0, 20), &["b", "c"]);
        assert_eq!(window_after(&lines, 0, 1), &["b"]);
        assert!(window_after(&lines, 2, 5).is_empty());
    }
}
