/// The 50 U.S. states in canonical output order.
pub const ALL_STATES: [&str; 50] = [
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
    "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
    "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio", "Oklahoma",
    "Oregon", "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota", "Tennessee",
    "Texas", "Utah", "Vermont", "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
];

/// Postal codes, index-aligned with [`ALL_STATES`].
const ABBREVIATIONS: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

/// Position of a state in [`ALL_STATES`], matching the exact canonical spelling.
pub fn index_of(name: &str) -> Option<usize> {
    ALL_STATES.iter().position(|s| *s == name)
}

/// Resolve a loosely written state name or postal code to its canonical name.
///
/// Surrounding whitespace and letter case are ignored, so `" new york "` and
/// `"ny"` both resolve to `"New York"`.
pub fn canonicalize(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(idx) = ABBREVIATIONS
        .iter()
        .position(|a| a.eq_ignore_ascii_case(trimmed))
    {
        return Some(ALL_STATES[idx]);
    }
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    ALL_STATES
        .iter()
        .find(|s| s.eq_ignore_ascii_case(&collapsed))
        .copied()
}

// ── Tests ──
