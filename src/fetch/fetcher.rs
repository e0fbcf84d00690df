//! Fetches one archive series per point and flattens the responses into
//! long-form observation rows. Per-point failures are collected, never fatal.

use crate::archive::{ArchiveClient, ArchiveError, ArchiveResponse};
use crate::points::Point;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;
use std::fmt;

/// One observed hour at one location. Timestamps are local wall-clock time
/// (the response's unix stamps shifted by the point's UTC offset, timezone
/// dropped), so week and month buckets follow the point's own calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    pub timestamp: NaiveDateTime,
    pub snowfall_cm: Option<f64>,
    pub snow_depth_cm: Option<f64>,
    pub location: String,
}

/// A point whose fetch failed, with the error to show the user.
#[derive(Debug)]
pub struct PointFailure {
    pub point: String,
    pub error: ArchiveError,
}

impl fmt::Display for PointFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.point, self.error)
    }
}

/// Progress notification, emitted once per point before its request.
#[derive(Debug, Clone, Copy)]
pub struct FetchProgress<'a> {
    /// 0-based index of the point being fetched.
    pub index: usize,
    pub total: usize,
    pub point: &'a str,
}

/// Union of all successful points' rows plus the per-point failures.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub rows: Vec<ObservationRow>,
    pub failures: Vec<PointFailure>,
}

pub struct SeriesFetcher<'a> {
    client: &'a ArchiveClient,
}

impl<'a> SeriesFetcher<'a> {
    pub fn new(client: &'a ArchiveClient) -> Self {
        Self { client }
    }

    /// Fetches every point sequentially over `[start_date, end_date]`.
    ///
    /// A failing point is reported in the outcome and the batch moves on;
    /// `progress` fires exactly once per point so a host can render an
    /// incremental progress bar.
    pub async fn fetch_all(
        &self,
        points: &[Point],
        start_date: NaiveDate,
        end_date: NaiveDate,
        mut progress: impl FnMut(FetchProgress<'_>),
    ) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();
        for (index, point) in points.iter().enumerate() {
            progress(FetchProgress {
                index,
                total: points.len(),
                point: &point.name,
            });
            match self.client.fetch_hourly(point, start_date, end_date).await {
                Ok(response) => outcome.rows.extend(to_rows(&response, &point.name)),
                Err(error) => {
                    warn!("fetch failed for '{}': {}", point.name, error);
                    outcome.failures.push(PointFailure {
                        point: point.name.clone(),
                        error,
                    });
                }
            }
        }
        outcome
    }
}

fn to_rows(response: &ArchiveResponse, location: &str) -> Vec<ObservationRow> {
    let Some(hourly) = &response.hourly else {
        return Vec::new();
    };
    let snowfall = hourly.snowfall.as_deref().unwrap_or(&[]);
    let snow_depth = hourly.snow_depth.as_deref().unwrap_or(&[]);
    hourly
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, &epoch)| {
            let local =
                DateTime::from_timestamp(epoch + response.utc_offset_seconds, 0)?.naive_utc();
            Some(ObservationRow {
                timestamp: local,
                snowfall_cm: value_at(snowfall, i),
                snow_depth_cm: value_at(snow_depth, i),
                location: location.to_string(),
            })
        })
        .collect()
}

fn value_at(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}
