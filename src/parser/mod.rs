pub mod extract;
pub mod sections;

use tracing::{debug, info};

use crate::report::ReportType;
use crate::states::ALL_STATES;
use extract::{ExtractedFields, Windows};
use sections::Segmenter;

/// Extracted facts for one state, in canonical state order.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub state: &'static str,
    pub fields: ExtractedFields,
}

/// Two-pass pipeline: report text → per-state sections → extracted fields.
///
/// Always yields exactly one record per state; states without a section
/// anchor come back with every field unknown.
pub fn process_report(text: &str, report: ReportType, windows: Windows) -> Vec<StateRecord> {
    let text = text.replace("\r\n", "\n");
    let segmenter = Segmenter::new(report.section_header());
    let sections = segmenter.split(&text);

    let records = extract_states(|state| sections.get(state).copied().unwrap_or(""), windows);

    let found = records
        .iter()
        .filter(|r| r.fields != ExtractedFields::unknown())
        .count();
    info!(%report, sections = sections.len(), with_data = found, "parsed report");
    records
}

#[cfg(feature = "rayon")]
fn extract_states<'t, F>(section_for: F, windows: Windows) -> Vec<StateRecord>
where
    F: Fn(&str) -> &'t str + Sync,
{
    use rayon::prelude::*;

    ALL_STATES
        .par_iter()
        .map(|&state| extract_one(state, section_for(state), windows))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn extract_states<'t, F>(section_for: F, windows: Windows) -> Vec<StateRecord>
where
    F: Fn(&str) -> &'t str,
{
    ALL_STATES
        .iter()
        .map(|&state| extract_one(state, section_for(state), windows))
        .collect()
}

fn extract_one(state: &'static str, section: &str, windows: Windows) -> StateRecord {
    if section.is_empty() {
        debug!(state, "no section");
    }
    let fields = extract::extract_all(section, windows);
    debug!(
        state,
        law = %fields.law_status,
        fees = %fields.fee_total,
        timeframe_months = ?fields.timeframe.months(),
        "extracted"
    );
    StateRecord { state, fields }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use extract::{FeeTotal, LawStatus};

    fn report() -> Vec<StateRecord> {
        let text = std::fs::read_to_string("tests/fixtures/finfish_report.txt").unwrap();
        process_report(&text, ReportType::Finfish, Windows::default())
    }

    fn record<'a>(records: &'a [StateRecord], state: &str) -> &'a ExtractedFields {
        &records.iter().find(|r| r.state == state).unwrap().fields
    }

    #[test]
    fn one_record_per_state_in_canonical_order() {
        let records = report();
        assert_eq!(records.len(), 50);
        let names: Vec<&str> = records.iter().map(|r| r.state).collect();
        assert_eq!(names, ALL_STATES.to_vec());
    }

    #[test]
    fn alabama_fields() {
        let records = report();
        let f = record(&records, "Alabama");
        assert_eq!(f.law_status, LawStatus::Yes);
        assert_eq!(f.fee_total, FeeTotal::Amount(350.5));
        assert_eq!(f.timeframe.months(), Some(18.0));
    }

    #[test]
    fn maryland_has_no_law_and_no_fee() {
        let records = report();
        let f = record(&records, "Maryland");
        assert_eq!(f.law_status, LawStatus::No);
        assert_eq!(f.fee_total, FeeTotal::NoFee);
        assert_eq!(f.timeframe.months(), None);
    }

    #[test]
    fn missing_law_label_stays_unknown() {
        let records = report();
        let f = record(&records, "New Hampshire");
        assert_eq!(f.law_status, LawStatus::Unknown);
        assert_eq!(f.fee_total, FeeTotal::Amount(300.0));
        assert_eq!(f.timeframe.to_string(), "6 months");
    }

    #[test]
    fn west_virginia_is_separate_from_virginia() {
        let records = report();
        assert_eq!(record(&records, "Virginia").law_status, LawStatus::Yes);
        assert_eq!(record(&records, "Virginia").timeframe.months(), Some(30.0));
        assert_eq!(record(&records, "West Virginia").law_status, LawStatus::No);
    }

    #[test]
    fn unanchored_states_are_unknown() {
        let records = report();
        assert_eq!(record(&records, "Texas"), &ExtractedFields::unknown());
        assert_eq!(record(&records, "Alaska"), &ExtractedFields::unknown());
    }

    #[test]
    fn wrong_category_finds_nothing() {
        let text = std::fs::read_to_string("tests/fixtures/finfish_report.txt").unwrap();
        let records = process_report(&text, ReportType::Algae, Windows::default());
        assert!(records.iter().all(|r| r.fields == ExtractedFields::unknown()));
    }

    #[test]
    fn crlf_documents_are_segmented() {
        let text = "Intro\r\nOhio\r\nSpecial Notes\r\nApplication Fees\r\n$20\r\n";
        let records = process_report(text, ReportType::Shellfish, Windows::default());
        assert_eq!(record(&records, "Ohio").fee_total, FeeTotal::Amount(20.0));
    }

    #[test]
    fn law_round_trip_document() {
        let text = "Georgia\nSpecial Notes\nleasing/permitting law(s):\nhave not been developed";
        let records = process_report(text, ReportType::Shellfish, Windows::default());
        assert_eq!(record(&records, "Georgia").law_status, LawStatus::No);
    }
}
