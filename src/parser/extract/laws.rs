use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::NOT_AVAILABLE;

static LAW_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)leasing/permitting law\(s\):").unwrap());

const NOT_DEVELOPED: &str = "have not been developed";

/// Whether a state has aquaculture leasing/permitting law(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LawStatus {
    Yes,
    No,
    Unknown,
}

impl fmt::Display for LawStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LawStatus::Yes => f.write_str("YES"),
            LawStatus::No => f.write_str("NO"),
            LawStatus::Unknown => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// The label line itself is not inspected, only the line after it.
pub fn extract(lines: &[&str]) -> LawStatus {
    let Some(idx) = lines.iter().position(|l| LAW_LABEL_RE.is_match(l)) else {
        return LawStatus::Unknown;
    };
    match lines.get(idx + 1) {
        Some(next) if next.trim().to_lowercase().contains(NOT_DEVELOPED) => LawStatus::No,
        Some(_) => LawStatus::Yes,
        None => LawStatus::Unknown,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn status(text: &str) -> LawStatus {
        let lines: Vec<&str> = text.lines().collect();
        extract(&lines)
    }

    #[test]
    fn not_developed_is_no() {
        assert_eq!(
            status("Aquaculture leasing/permitting law(s):\nHave NOT been developed."),
            LawStatus::No
        );
    }

    #[test]
    fn anything_else_is_yes() {
        assert_eq!(
            status("aquaculture leasing/permitting law(s):\nAlaska Stat. 38.05.855"),
            LawStatus::Yes
        );
    }

    #[test]
    fn label_is_case_insensitive() {
        assert_eq!(status("LEASING/PERMITTING LAW(S):\nsome statute"), LawStatus::Yes);
    }

    #[test]
    fn label_on_last_line_is_unknown() {
        assert_eq!(status("intro\nleasing/permitting law(s):"), LawStatus::Unknown);
    }

    #[test]
    fn missing_label_is_unknown() {
        assert_eq!(status("no laws discussed here\nhave not been developed"), LawStatus::Unknown);
    }

    #[test]
    fn only_first_label_counts() {
        let text = "leasing/permitting law(s):\nstatute 1\nleasing/permitting law(s):\nhave not been developed";
        assert_eq!(status(text), LawStatus::Yes);
    }

    #[test]
    fn display_values() {
        assert_eq!(LawStatus::Yes.to_string(), "YES");
        assert_eq!(LawStatus::No.to_string(), "NO");
        assert_eq!(LawStatus::Unknown.to_string(), "N/A");
    }
}
