//! Parses the uploaded point list: one `lat, lon # name` entry per line.

use log::warn;
use std::fmt;

/// A named geographic coordinate for which snow history is queried.
///
/// Latitude and longitude are deliberately not range-checked here: an
/// out-of-range coordinate is rejected by the archive API with a clear
/// reason, which is surfaced as a per-point failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// A line that could not be parsed into a [`Point`] and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number in the uploaded text.
    pub line_no: usize,
    pub line: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} ignored: {}", self.line_no, self.line)
    }
}

/// Result of parsing a point list: points in input order, plus one warning
/// per skipped line.
#[derive(Debug, Default)]
pub struct ParsedPoints {
    pub points: Vec<Point>,
    pub warnings: Vec<ParseWarning>,
}

/// Parses point-list text, skipping blank lines and `#` comment lines.
///
/// Each remaining line is split on the first `#`: the left part must be a
/// comma-separated latitude/longitude pair, the right part (trimmed) is the
/// point's name. Without a `#`, the name defaults to the coordinate text
/// itself. Malformed lines never abort parsing; each one produces a
/// [`ParseWarning`] for the caller to display.
pub fn parse_points(text: &str) -> ParsedPoints {
    let mut parsed = ParsedPoints::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Some(point) => parsed.points.push(point),
            None => {
                warn!("line {} ignored: {}", idx + 1, line);
                parsed.warnings.push(ParseWarning {
                    line_no: idx + 1,
                    line: line.to_string(),
                });
            }
        }
    }
    parsed
}

fn parse_line(line: &str) -> Option<Point> {
    let (coords, name) = match line.split_once('#') {
        Some((coords, comment)) => (coords.trim(), comment.trim().to_string()),
        None => (line, line.to_string()),
    };
    let (lat, lon) = coords.split_once(',')?;
    let latitude: f64 = lat.trim().parse().ok()?;
    let longitude: f64 = lon.trim().parse().ok()?;
    Some(Point {
        latitude,
        longitude,
        name,
    })
}
