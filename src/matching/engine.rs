//! Fuzzy engine boundary
//!
//! The picker never scores text itself. It hands the item list and query to
//! a [`FuzzyEngine`] and consumes the resulting match ranges and distances.
//! [`NucleoEngine`] is the default engine, built on nucleo's matcher.

use crate::item::{Item, SearchField};
use nucleo::{
    Config, Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};
use serde::{Deserialize, Serialize};

/// An inclusive span of matched chars within a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchRange {
    /// Index of the first matched char
    pub start: usize,
    /// Index of the last matched char
    pub end: usize,
}

impl MatchRange {
    /// Create a new range
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of chars covered
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Ranges always cover at least one char
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// One match produced by an engine
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatch {
    /// Position of the item in the searched list
    pub index: usize,
    /// Field the match was found in
    pub field: SearchField,
    /// Matched spans within that field
    pub ranges: Vec<MatchRange>,
    /// Distance from a perfect match: 0.0 is perfect, 1.0 the worst
    pub raw_score: f64,
}

/// Case sensitivity of the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Case sensitive only if the query contains an uppercase char
    #[default]
    Smart,
    /// Always case insensitive
    Ignore,
    /// Always case sensitive
    Respect,
}

impl From<CaseMode> for CaseMatching {
    fn from(mode: CaseMode) -> Self {
        match mode {
            CaseMode::Smart => Self::Smart,
            CaseMode::Ignore => Self::Ignore,
            CaseMode::Respect => Self::Respect,
        }
    }
}

/// Tuning knobs passed to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Matches with a distance above this are dropped (0.0..=1.0)
    pub threshold: f64,
    /// Matched runs shorter than this many chars are not highlighted
    pub min_match_len: usize,
    /// Case sensitivity
    pub case_matching: CaseMode,
    /// Score path separators as word boundaries
    pub match_paths: bool,
    /// Search item keywords in addition to names
    pub search_keywords: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            min_match_len: 1,
            case_matching: CaseMode::Smart,
            match_paths: false,
            search_keywords: true,
        }
    }
}

/// A source of ranked fuzzy matches
///
/// Implementations return matches ordered best first. An empty query
/// yields no matches.
pub trait FuzzyEngine {
    /// Search `items` for `query`
    fn search(&mut self, items: &[Item], query: &str) -> Vec<RawMatch>;
}

/// Engine backed by the nucleo matcher
pub struct NucleoEngine {
    matcher: Matcher,
    options: MatchOptions,
    buf: Vec<char>,
}

impl std::fmt::Debug for NucleoEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NucleoEngine")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

struct Candidate {
    index: usize,
    field: SearchField,
    score: u32,
    indices: Vec<u32>,
}

impl NucleoEngine {
    /// Create an engine with the given options
    #[must_use]
    pub fn new(options: MatchOptions) -> Self {
        let config = if options.match_paths {
            Config::DEFAULT.match_paths()
        } else {
            Config::DEFAULT
        };

        Self {
            matcher: Matcher::new(config),
            options,
            buf: Vec::new(),
        }
    }

    /// Options this engine was built with
    #[must_use]
    pub const fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Best match of `pattern` across the searchable fields of `item`
    fn best_field(&mut self, pattern: &Pattern, index: usize, item: &Item) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (field, text) in item.fields() {
            if field != SearchField::Name && !self.options.search_keywords {
                continue;
            }

            self.buf.clear();
            self.buf.extend(text.chars());
            let mut indices = Vec::new();
            let Some(score) =
                pattern.indices(Utf32Str::Unicode(&self.buf), &mut self.matcher, &mut indices)
            else {
                continue;
            };

            // Strictly greater keeps the name when a keyword ties
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(Candidate {
                    index,
                    field,
                    score,
                    indices,
                });
            }
        }

        best
    }
}

impl Default for NucleoEngine {
    fn default() -> Self {
        Self::new(MatchOptions::default())
    }
}

impl FuzzyEngine for NucleoEngine {
    fn search(&mut self, items: &[Item], query: &str) -> Vec<RawMatch> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let pattern = Pattern::parse(
            query,
            self.options.case_matching.into(),
            Normalization::Smart,
        );

        let mut candidates: Vec<Candidate> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| self.best_field(&pattern, index, item))
            .collect();

        // The query scored against itself is the best any item can do, unless
        // it contains pattern syntax, in which case the top item stands in.
        self.buf.clear();
        self.buf.extend(query.chars());
        let self_score = pattern
            .score(Utf32Str::Unicode(&self.buf), &mut self.matcher)
            .unwrap_or(0);
        let perfect = candidates
            .iter()
            .map(|c| c.score)
            .fold(self_score, u32::max);

        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        let threshold = self.options.threshold;
        let min_len = self.options.min_match_len;
        let matches: Vec<RawMatch> = candidates
            .into_iter()
            .map(|mut c| RawMatch {
                index: c.index,
                field: c.field,
                ranges: ranges_from_indices(&mut c.indices)
                    .into_iter()
                    .filter(|r| r.len() >= min_len)
                    .collect(),
                raw_score: distance(c.score, perfect),
            })
            .filter(|m| m.raw_score <= threshold)
            .collect();

        log::debug!(
            "query {:?} matched {} of {} items",
            query,
            matches.len(),
            items.len()
        );

        matches
    }
}

/// Normalized distance of `score` from `perfect`
fn distance(score: u32, perfect: u32) -> f64 {
    if perfect == 0 {
        return 0.0;
    }
    (1.0 - f64::from(score) / f64::from(perfect)).clamp(0.0, 1.0)
}

/// Group matched char indices into contiguous ranges
///
/// Indices may arrive unsorted or duplicated when a query has several atoms.
#[must_use]
pub fn ranges_from_indices(indices: &mut Vec<u32>) -> Vec<MatchRange> {
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<MatchRange> = Vec::new();
    for &idx in indices.iter() {
        let idx = idx as usize;
        match ranges.last_mut() {
            Some(last) if last.end + 1 == idx => last.end = idx,
            _ => ranges.push(MatchRange::new(idx, idx)),
        }
    }
    ranges
}
