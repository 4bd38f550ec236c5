use std::sync::LazyLock;

use regex::Regex;

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(years|year|months|month)").unwrap()
});

/// Cell values read as "no value" in the intermediate CSV.
const MISSING_MARKERS: &[&str] = &[
    "", "N/A", "n/a", "NA", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

pub fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

/// `yes` → 1, `no` → 0, anything else unknown.
pub fn parse_laws(raw: &str) -> Option<f64> {
    match raw.trim().to_lowercase().as_str() {
        "yes" => Some(1.0),
        "no" => Some(0.0),
        _ => None,
    }
}

/// Sum of every run of digits in the cell.
///
/// This deliberately reads digits loosely rather than only `$` amounts:
/// by this point the cell may already hold a computed sum (`350.5` reads as
/// 350 + 5) or free text. A present value without digits is 0.
pub fn parse_fees(raw: &str) -> Option<f64> {
    if is_missing(raw) || raw.trim().eq_ignore_ascii_case("no") {
        return None;
    }
    let total = DIGITS_RE
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .sum();
    Some(total)
}

/// Total months across every `<n> year(s)|month(s)` mention; a zero total
/// counts as unknown.
pub fn parse_timeframe(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    let months: f64 = DURATION_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
            let unit = caps.get(2)?.as_str().to_lowercase();
            Some(if unit.starts_with("year") {
                value * 12.0
            } else {
                value
            })
        })
        .sum();
    (months > 0.0).then_some(months)
}

// ── Tests ──
