//! Serde models for the Open-Meteo archive API JSON payloads.

use serde::Deserialize;

/// Raw response of `GET /v1/archive` with `timeformat=unixtime`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveResponse {
    pub latitude: f64,
    pub longitude: f64,
    /// Offset of the point's resolved local timezone, seconds east of UTC.
    /// With `timezone=auto` this is the point's own timezone, so shifting
    /// the unix stamps by it yields local wall-clock time.
    pub utc_offset_seconds: i64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub hourly: Option<HourlyBlock>,
}

/// The hourly series block: parallel arrays, one slot per hour over the
/// half-open requested range. Missing samples stay `None` and flow through
/// aggregation as nulls.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyBlock {
    /// Unix epoch seconds, one stamp per hour.
    pub time: Vec<i64>,
    #[serde(default)]
    pub snowfall: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub snow_depth: Option<Vec<Option<f64>>>,
}

/// Error body the archive API returns alongside non-2xx statuses,
/// e.g. `{"error": true, "reason": "Latitude must be in range ..."}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorPayload {
    pub reason: String,
}
