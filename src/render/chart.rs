//! Chart specifications derived from the aggregated table. The crate does
//! not draw; a host binds these to its charting library.

use crate::aggregate::{ViewMode, PORTFOLIO_LABEL};
use chrono::NaiveDateTime;
use polars::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    /// Line with per-point markers.
    Line,
}

/// One plotted series: parallel period/value vectors.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: String,
    pub periods: Vec<NaiveDateTime>,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
}

/// Builds the snowfall bar chart and the snow-depth line chart for a view:
/// one series per location in per-point mode (grouped bars), a single
/// series in portfolio mode (max depth per point, average depth portfolio).
pub(crate) fn charts_for(table: &DataFrame, view: ViewMode) -> PolarsResult<(ChartSpec, ChartSpec)> {
    match view {
        ViewMode::PerPoint => {
            let bar = ChartSpec {
                title: "Snowfall per station".to_string(),
                kind: ChartKind::Bar,
                x_label: "Period".to_string(),
                y_label: "Snowfall (cm)".to_string(),
                series: per_location_series(table, "total_snowfall_cm")?,
            };
            let line = ChartSpec {
                title: "Max snow depth per station".to_string(),
                kind: ChartKind::Line,
                x_label: "Period".to_string(),
                y_label: "Snow depth (cm)".to_string(),
                series: per_location_series(table, "max_snow_depth_cm")?,
            };
            Ok((bar, line))
        }
        ViewMode::Portfolio => {
            let bar = ChartSpec {
                title: "Total snowfall, whole portfolio".to_string(),
                kind: ChartKind::Bar,
                x_label: "Period".to_string(),
                y_label: "Snowfall (cm)".to_string(),
                series: vec![series_from(table, PORTFOLIO_LABEL, "total_snowfall_cm")?],
            };
            let line = ChartSpec {
                title: "Average snow depth, whole portfolio".to_string(),
                kind: ChartKind::Line,
                x_label: "Period".to_string(),
                y_label: "Snow depth (cm)".to_string(),
                series: vec![series_from(table, PORTFOLIO_LABEL, "avg_snow_depth_cm")?],
            };
            Ok((bar, line))
        }
    }
}

/// One series per location, in first-appearance order of the table.
fn per_location_series(table: &DataFrame, value_col: &str) -> PolarsResult<Vec<ChartSeries>> {
    let locations = table.column("location")?.str()?;
    let mut order: Vec<String> = Vec::new();
    for location in locations.into_iter().flatten() {
        if !order.iter().any(|seen| seen == location) {
            order.push(location.to_string());
        }
    }
    let mut series = Vec::with_capacity(order.len());
    for location in &order {
        let subset = table
            .clone()
            .lazy()
            .filter(col("location").eq(lit(location.as_str())))
            .collect()?;
        series.push(series_from(&subset, location, value_col)?);
    }
    Ok(series)
}

fn series_from(df: &DataFrame, label: &str, value_col: &str) -> PolarsResult<ChartSeries> {
    let periods = df
        .column("period")?
        .datetime()?
        .as_datetime_iter()
        .flatten()
        .collect();
    let values = df.column(value_col)?.f64()?.into_iter().collect();
    Ok(ChartSeries {
        label: label.to_string(),
        periods,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, Grouping};
    use crate::fetch::ObservationRow;
    use chrono::NaiveDate;

    fn rows() -> Vec<ObservationRow> {
        let ts = |d: u32, h: u32| {
            NaiveDate::from_ymd_opt(2023, 1, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        vec![
            ObservationRow {
                timestamp: ts(1, 0),
                snowfall_cm: Some(1.0),
                snow_depth_cm: Some(10.0),
                location: "A".to_string(),
            },
            ObservationRow {
                timestamp: ts(1, 0),
                snowfall_cm: Some(2.0),
                snow_depth_cm: Some(20.0),
                location: "B".to_string(),
            },
            ObservationRow {
                timestamp: ts(2, 0),
                snowfall_cm: Some(3.0),
                snow_depth_cm: Some(30.0),
                location: "A".to_string(),
            },
        ]
    }

    #[test]
    fn per_point_charts_carry_one_series_per_location() {
        let table = aggregate(&rows(), Grouping::Hour, ViewMode::PerPoint).unwrap();
        let (bar, line) = charts_for(&table, ViewMode::PerPoint).unwrap();
        assert_eq!(bar.kind, ChartKind::Bar);
        assert_eq!(line.kind, ChartKind::Line);
        assert_eq!(bar.series.len(), 2);
        let labels: Vec<&str> = bar.series.iter().map(|s| s.label.as_str()).collect();
        assert!(labels.contains(&"A"));
        assert!(labels.contains(&"B"));
        let a = bar.series.iter().find(|s| s.label == "A").unwrap();
        assert_eq!(a.periods.len(), 2);
        assert_eq!(a.periods.len(), a.values.len());
    }

    #[test]
    fn portfolio_charts_carry_a_single_labelled_series() {
        let table = aggregate(&rows(), Grouping::Month, ViewMode::Portfolio).unwrap();
        let (bar, line) = charts_for(&table, ViewMode::Portfolio).unwrap();
        assert_eq!(bar.series.len(), 1);
        assert_eq!(bar.series[0].label, PORTFOLIO_LABEL);
        assert_eq!(bar.series[0].values, vec![Some(6.0)]);
        assert_eq!(line.series[0].values, vec![Some(20.0)]);
    }
}
