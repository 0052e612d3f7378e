//! In-memory search over a candidate set of history records.
//!
//! Each *supplied* criterion is evaluated as an independent boolean
//! predicate; predicates combine with logical AND under
//! [`MatchMode::All`] and logical OR under [`MatchMode::Any`]. A record
//! survives an empty criteria set unconditionally.

use serde::Deserialize;

use super::history::{DateRange, HistoryRecord};

/// How multiple supplied criteria combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every supplied criterion must hold.
    #[default]
    All,
    /// Any one supplied criterion suffices.
    Any,
}

impl MatchMode {
    /// Parse a query-string value, defaulting to [`MatchMode::All`].
    ///
    /// Unknown values fall back to the default rather than erroring; the
    /// parameter is a presence-checked toggle, not a validated enum.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("any") => Self::Any,
            _ => Self::All,
        }
    }
}

/// Fully resolved search criteria.
///
/// Every field is optional; absent criteria contribute no predicate. The
/// range is already resolved to concrete bounds by the history service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    /// Creation-time window, bounds inclusive.
    pub range: Option<DateRange>,
    /// Substring matched against the record name.
    pub name: Option<String>,
    /// Substring matched against the `name` + `description` + `text`
    /// concatenation.
    pub text: Option<String>,
    /// AND/OR combination of the supplied predicates.
    pub match_mode: MatchMode,
    /// When false, both sides of a substring check are lower-cased first.
    pub case_sensitive: bool,
}

impl SearchCriteria {
    /// Whether `record` satisfies the criteria under the configured mode.
    pub fn matches(&self, record: &HistoryRecord) -> bool {
        let mut predicates = Vec::with_capacity(3);
        if let Some(range) = &self.range {
            predicates.push(range.contains(record.created_at));
        }
        if let Some(needle) = &self.name {
            predicates.push(self.contains(&record.name, needle));
        }
        if let Some(needle) = &self.text {
            let haystack = format!("{}{}{}", record.name, record.description, record.text);
            predicates.push(self.contains(&haystack, needle));
        }
        match self.match_mode {
            MatchMode::All => predicates.iter().all(|held| *held),
            // An empty criteria set passes everything under either mode.
            MatchMode::Any => predicates.is_empty() || predicates.iter().any(|held| *held),
        }
    }

    fn contains(&self, haystack: &str, needle: &str) -> bool {
        if self.case_sensitive {
            haystack.contains(needle)
        } else {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
    }
}

/// Filter `candidates` by `criteria` and sort descending by creation time.
pub fn filter_records(
    candidates: Vec<HistoryRecord>,
    criteria: &SearchCriteria,
) -> Vec<HistoryRecord> {
    let mut matched: Vec<HistoryRecord> = candidates
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}
