//! Non-interactive result output
//!
//! Used by filter mode to print ranked results without opening the TUI.

use crate::matching::MappedResult;
use crate::ui::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

/// Format a result as `id<TAB>name<TAB>confidence`
///
/// With `color`, matched segments of the name are printed bold yellow and
/// the confidence is dimmed.
#[must_use]
pub fn format_result(result: &MappedResult, color: bool) -> String {
    let name: String = if color {
        result
            .segments
            .iter()
            .map(|segment| {
                if segment.is_match {
                    segment.text.yellow().bold().to_string()
                } else {
                    segment.text.clone()
                }
            })
            .collect()
    } else {
        result.text()
    };

    let confidence = format!("{:.3}", result.confidence);
    let confidence = if color {
        confidence.dimmed().to_string()
    } else {
        confidence
    };

    format!("{}\t{name}\t{confidence}", result.item.id)
}

/// Write results as text, one per line
///
/// # Errors
///
/// Returns `UiError` if writing fails.
pub fn write_text(out: &mut impl Write, results: &[MappedResult], color: bool) -> Result<()> {
    for result in results {
        writeln!(out, "{}", format_result(result, color))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonResult<'a> {
    id: &'a str,
    name: &'a str,
    confidence: f64,
    segments: &'a [crate::matching::Segment],
}

/// Write results as a JSON array
///
/// # Errors
///
/// Returns `UiError` if serialization or writing fails.
pub fn write_json(out: &mut impl Write, results: &[MappedResult]) -> Result<()> {
    let rows: Vec<JsonResult> = results
        .iter()
        .map(|r| JsonResult {
            id: &r.item.id,
            name: &r.item.name,
            confidence: r.confidence,
            segments: &r.segments,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}
