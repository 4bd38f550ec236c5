use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, warn};

use crate::states::ALL_STATES;

/// Byte span of one state's section within the source text.
///
/// `start` is just past the `<State>\n<Header>` anchor, `end` is the start of
/// the next anchor (or end of text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub state: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Anchor matcher for one report layout.
pub struct Segmenter {
    anchor: Regex,
}

impl Segmenter {
    /// Build a matcher for `<StateName>\n<header>` where the state name begins
    /// a line. The header is matched literally.
    pub fn new(header: &str) -> Self {
        let states = ALL_STATES
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"(?m)^({})\n{}", states, regex::escape(header));
        // Every piece is escaped, so the pattern always compiles.
        let anchor = Regex::new(&pattern).expect("escaped anchor pattern");
        Segmenter { anchor }
    }

    /// All anchor matches in document order; each span ends where the next begins.
    pub fn spans(&self, text: &str) -> Vec<SectionSpan> {
        let anchors: Vec<(&'static str, usize, usize)> = self
            .anchor
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(1)?.as_str();
                let state = ALL_STATES.iter().find(|s| **s == name)?;
                Some((*state, whole.start(), whole.end()))
            })
            .collect();

        anchors
            .iter()
            .enumerate()
            .map(|(i, &(state, _, body_start))| {
                let end = anchors.get(i + 1).map(|a| a.1).unwrap_or(text.len());
                SectionSpan {
                    state,
                    start: body_start,
                    end,
                }
            })
            .collect()
    }

    /// One trimmed section per state that has an anchor. When a state is
    /// anchored more than once, its last section wins.
    pub fn split<'t>(&self, text: &'t str) -> HashMap<&'static str, &'t str> {
        let mut sections = HashMap::new();
        for span in self.spans(text) {
            let body = text[span.start..span.end].trim();
            if sections.insert(span.state, body).is_some() {
                warn!(state = span.state, "duplicate section anchor; keeping the later one");
            }
        }
        debug!(matched = sections.len(), "segmented report");
        sections
    }
}

// ── Tests ──
