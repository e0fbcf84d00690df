//! One-shot dashboard pipeline: parse, fetch, aggregate, package.
//!
//! A reactive host calls [`render`] once per parameter change; every call
//! rebuilds the dataset from scratch. The only state that survives between
//! calls is the [`ArchiveClient`]'s HTTP response cache.

use crate::aggregate::{aggregate, Grouping, ViewMode};
use crate::archive::ArchiveClient;
use crate::error::SnowHistoryError;
use crate::fetch::{FetchProgress, SeriesFetcher};
use crate::points::parse_points;
use crate::render::{charts_for, export_csv, Dashboard};
use bon::Builder;
use chrono::NaiveDate;
use log::info;

/// User-facing parameters of one render pass.
///
/// The date range is intentionally not validated (`start_date > end_date`
/// flows through to the archive API, which rejects it with a reason shown
/// per point), mirroring the permissive dashboard behavior.
#[derive(Debug, Clone, Builder)]
pub struct RenderParams {
    /// Raw point-list text, one `lat, lon # name` entry per line.
    #[builder(into)]
    pub point_list: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[builder(default)]
    pub grouping: Grouping,
    #[builder(default)]
    pub view: ViewMode,
}

impl RenderParams {
    /// Date range the dashboard opens with.
    pub fn default_range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            NaiveDate::from_ymd_opt(2025, 11, 30).unwrap_or_default(),
        )
    }
}

/// Runs the full pipeline for one set of parameters.
///
/// Recovered conditions (skipped lines, failed points) land in the returned
/// [`Dashboard`]; the two run-fatal conditions are
/// [`SnowHistoryError::NoValidPoints`] (nothing parseable in the list) and
/// [`SnowHistoryError::NoDataFetched`] (every point failed). Both are for
/// the host to display; the user recovers by changing inputs and rendering
/// again.
pub async fn render(
    client: &ArchiveClient,
    params: &RenderParams,
    progress: impl FnMut(FetchProgress<'_>),
) -> Result<Dashboard, SnowHistoryError> {
    let parsed = parse_points(&params.point_list);
    if parsed.points.is_empty() {
        return Err(SnowHistoryError::NoValidPoints);
    }
    info!("{} station(s) loaded", parsed.points.len());

    let fetcher = SeriesFetcher::new(client);
    let outcome = fetcher
        .fetch_all(&parsed.points, params.start_date, params.end_date, progress)
        .await;
    if outcome.rows.is_empty() {
        return Err(SnowHistoryError::NoDataFetched {
            failures: outcome.failures,
        });
    }

    let table = aggregate(&outcome.rows, params.grouping, params.view)?;
    let (bar_chart, line_chart) = charts_for(&table, params.view)?;
    let csv = export_csv(&table, params.view)?;

    Ok(Dashboard {
        view: params.view,
        station_count: parsed.points.len(),
        table,
        bar_chart,
        line_chart,
        csv,
        warnings: parsed.warnings,
        failures: outcome.failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_builder_defaults_to_hour_per_point() {
        let (start, end) = RenderParams::default_range();
        let params = RenderParams::builder()
            .point_list("45.833, 6.867 # Courchevel")
            .start_date(start)
            .end_date(end)
            .build();
        assert_eq!(params.grouping, Grouping::Hour);
        assert_eq!(params.view, ViewMode::PerPoint);
        assert_eq!(start.to_string(), "2020-01-01");
        assert_eq!(end.to_string(), "2025-11-30");
    }
}
