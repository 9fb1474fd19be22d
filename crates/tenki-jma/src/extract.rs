//! Weather-text extraction from a forecast document.
//!
//! The document is a sequence of report objects. Only the first report is
//! read: its `timeSeries` entries are scanned in order and the first entry
//! whose leading area carries `weathers` produces the output, one line per
//! sub-area. Later qualifying entries are ignored.

use crate::types::{DisplayLine, ForecastDocument, JmaError};
use serde_json::Value;

/// Extract one `DisplayLine` per sub-area from the first qualifying
/// time-series entry.
///
/// Returns an empty vector when no entry qualifies; any shape mismatch on
/// a required access is a parse error with no partial output.
pub fn extract(doc: &ForecastDocument) -> Result<Vec<DisplayLine>, JmaError> {
    let reports = doc
        .as_array()
        .ok_or_else(|| JmaError::parse("forecast document is not an array"))?;

    let first_report = reports
        .first()
        .ok_or_else(|| JmaError::parse("forecast document is empty"))?;

    let time_series = first_report
        .get("timeSeries")
        .and_then(Value::as_array)
        .ok_or_else(|| JmaError::parse("first report has no timeSeries array"))?;

    for entry in time_series {
        let areas = entry
            .get("areas")
            .and_then(Value::as_array)
            .ok_or_else(|| JmaError::parse("time series entry has no areas array"))?;

        let probe = areas
            .first()
            .ok_or_else(|| JmaError::parse("time series entry has an empty areas array"))?;

        // Only the first area is probed; the qualifying entry must then
        // carry weathers on every area.
        if probe.get("weathers").is_none() {
            continue;
        }

        let mut lines = Vec::with_capacity(areas.len());
        for area in areas {
            lines.push(display_line(area)?);
        }

        tracing::debug!("extracted {} sub-area lines", lines.len());
        return Ok(lines);
    }

    // No qualifying entry: empty output, not a failure.
    Ok(Vec::new())
}

fn display_line(area: &Value) -> Result<DisplayLine, JmaError> {
    let area_name = area
        .pointer("/area/name")
        .and_then(Value::as_str)
        .ok_or_else(|| JmaError::parse("sub-area has no area.name"))?;

    let weathers = area
        .get("weathers")
        .and_then(Value::as_array)
        .ok_or_else(|| JmaError::parse("sub-area has no weathers array"))?;

    let texts = weathers
        .iter()
        .map(|w| w.as_str().ok_or_else(|| JmaError::parse("weathers entry is not a string")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DisplayLine {
        area_name: area_name.to_string(),
        text: texts.join("\n"),
    })
}
