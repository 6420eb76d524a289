use crate::TocEntry;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Numbered heading: `1`, `1.2`, `1.2.3.` (not glued to a preceding word or
/// dot) followed by horizontal whitespace, a title made of word characters
/// and spaces, then an optional leader and page number. The leader is either
/// dotted (`...` or `…`) or a tab run, which is how Word renders tab-stop
/// leaders once `w:tab` becomes `\t`. Tabs never belong to the title, and
/// nothing crosses a line break.
const HEADING_PATTERN: &str = concat!(
    r"(?:^|[^\w.])(\d+(?:\.\d+)*)\.?[ \t\x{A0}]+",
    r"(\w[\w \x{A0}]*)",
    r"(?:(?:[ \t\x{A0}]*(?:\.{2,}|…+)[ \t\x{A0}]*|[ \x{A0}]*\t[ \t\x{A0}]*)(\d+))?",
);

static HEADING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(HEADING_PATTERN).expect("heading pattern is a valid regex"));

/// Finds numbered TOC headings in one text unit.
///
/// Each match is flattened into a single entry: the captured numbering,
/// title and page groups are trimmed, empty groups are dropped and the rest
/// is joined with `.`, so `1.2 Introduction ... 14` becomes
/// `1.2.Introduction.14`.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self {
            regex: HEADING_REGEX.clone(),
        }
    }

    /// All entries in `text`, left to right. No dedup.
    pub fn matches(&self, text: &str) -> Vec<TocEntry> {
        self.regex
            .captures_iter(text)
            .map(|caps| flatten(&caps))
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}

fn flatten(caps: &Captures<'_>) -> TocEntry {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|group| group.as_str().trim())
        .filter(|group| !group.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}
