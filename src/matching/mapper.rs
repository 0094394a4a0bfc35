//! Conversion of raw engine matches into highlighted display segments

use super::engine::{MatchRange, RawMatch};
use crate::item::Item;
use serde::Serialize;

/// A contiguous piece of a field, either matched or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Text of the segment
    pub text: String,
    /// Whether the text is part of the match
    pub is_match: bool,
}

impl Segment {
    /// Create a matched segment
    #[must_use]
    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_match: true,
        }
    }

    /// Create an unmatched segment
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_match: false,
        }
    }
}

/// A search result ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedResult {
    /// The matched item
    pub item: Item,
    /// How good the match is, 1.0 being perfect
    pub confidence: f64,
    /// Segments of the item name, in order
    pub segments: Vec<Segment>,
}

impl MappedResult {
    /// Result for an item shown without a query
    #[must_use]
    pub fn unranked(item: &Item) -> Self {
        Self {
            item: item.clone(),
            confidence: 1.0,
            segments: whole(&item.name),
        }
    }

    /// Concatenate the segments back into the item name
    #[must_use]
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Map a single match over `field_value` into a displayable result
///
/// `raw_score` follows the engine convention where 0.0 is a perfect match
/// and 1.0 the worst. The field value must be the item's name for
/// highlighting to apply; ranges over any other text are ignored.
#[must_use]
pub fn map_match(
    item: &Item,
    field_value: &str,
    ranges: &[MatchRange],
    raw_score: f64,
) -> MappedResult {
    let segments = if field_value == item.name {
        segments(&item.name, ranges)
    } else {
        whole(&item.name)
    };

    MappedResult {
        item: item.clone(),
        confidence: confidence(raw_score),
        segments,
    }
}

/// Map a raw engine record, resolving its item and field
///
/// Returns `None` if the record points outside `items`.
#[must_use]
pub fn map_raw(items: &[Item], raw: &RawMatch) -> Option<MappedResult> {
    let item = items.get(raw.index)?;
    let value = item.field(raw.field).unwrap_or_default();
    Some(map_match(item, value, &raw.ranges, raw.raw_score))
}

/// Convert an engine distance into a confidence in [0, 1]
#[must_use]
pub fn confidence(raw_score: f64) -> f64 {
    if raw_score.is_nan() {
        return 0.0;
    }
    (1.0 - raw_score).clamp(0.0, 1.0)
}

/// Split `text` into segments at the boundaries of `ranges`
///
/// Ranges are inclusive char indices. They are normalized before the scan,
/// so unsorted, overlapping or out-of-bounds input is tolerated.
#[must_use]
pub fn segments(text: &str, ranges: &[MatchRange]) -> Vec<Segment> {
    let len = text.chars().count();
    if len == 0 {
        return Vec::new();
    }

    let ranges = normalize_ranges(ranges, len);
    if ranges.is_empty() {
        return whole(text);
    }

    let mut out = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut pending = ranges.iter().peekable();
    let mut current = String::new();
    let mut in_match = false;

    for (idx, ch) in text.chars().enumerate() {
        let starts_match = pending.peek().is_some_and(|r| r.start == idx);
        if starts_match && !in_match {
            flush(&mut out, &mut current, in_match);
            in_match = true;
        }

        current.push(ch);

        if in_match && pending.peek().is_some_and(|r| r.end == idx) {
            flush(&mut out, &mut current, true);
            in_match = false;
            pending.next();
        }
    }
    flush(&mut out, &mut current, in_match);

    out
}

/// Sort, merge and clamp ranges to `len` chars
///
/// Overlapping ranges are merged. Adjacent ranges stay separate, so each
/// one still starts its own segment.
#[must_use]
pub fn normalize_ranges(ranges: &[MatchRange], len: usize) -> Vec<MatchRange> {
    let mut sorted: Vec<MatchRange> = ranges
        .iter()
        .filter(|r| r.start <= r.end && r.start < len)
        .map(|r| MatchRange::new(r.start, r.end.min(len - 1)))
        .collect();
    sorted.sort_by_key(|r| r.start);

    let mut merged: Vec<MatchRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}

fn flush(out: &mut Vec<Segment>, current: &mut String, is_match: bool) {
    if current.is_empty() {
        return;
    }
    out.push(Segment {
        text: std::mem::take(current),
        is_match,
    });
}

fn whole(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::plain(text)]
    }
}
