//! Groupby-aggregation of observation rows into the displayed table.

use crate::aggregate::period::period_start;
use crate::aggregate::{Grouping, ViewMode};
use crate::fetch::ObservationRow;
use chrono::NaiveDateTime;
use polars::prelude::*;

/// Location label attached to portfolio-mode rows.
pub const PORTFOLIO_LABEL: &str = "Portfolio average";

/// Buckets rows into periods and aggregates them for the requested view.
///
/// Per-point mode groups by (location, period) and yields
/// `total_snowfall_cm` (sum), `max_snow_depth_cm` and `mean_snow_depth_cm`,
/// sorted most-recent-and-heaviest first for display.
///
/// Portfolio mode groups by period across every location. Note that
/// `total_snowfall_cm` stays a SUM over all points rather than an average:
/// the total accumulation across the portfolio is the quantity the
/// dashboard reports, despite the mode's name. Depth is averaged
/// (`avg_snow_depth_cm`) and maxed; periods come out in ascending order.
///
/// Null samples are skipped by sum/mean/max, matching the upstream data's
/// missing-value semantics. A period only exists if at least one row maps
/// to it.
pub fn aggregate(
    rows: &[ObservationRow],
    grouping: Grouping,
    view: ViewMode,
) -> PolarsResult<DataFrame> {
    let frame = observations_frame(rows, grouping)?;
    match view {
        ViewMode::PerPoint => per_point(frame),
        ViewMode::Portfolio => portfolio(frame),
    }
}

/// Long-form frame with the period column already assigned.
fn observations_frame(rows: &[ObservationRow], grouping: Grouping) -> PolarsResult<DataFrame> {
    let locations: Vec<&str> = rows.iter().map(|r| r.location.as_str()).collect();
    let periods: Vec<NaiveDateTime> = rows
        .iter()
        .map(|r| period_start(r.timestamp, grouping))
        .collect();
    let snowfall: Vec<Option<f64>> = rows.iter().map(|r| r.snowfall_cm).collect();
    let snow_depth: Vec<Option<f64>> = rows.iter().map(|r| r.snow_depth_cm).collect();
    df!(
        "location" => locations,
        "period" => periods,
        "snowfall_cm" => snowfall,
        "snow_depth_cm" => snow_depth,
    )
}

fn per_point(frame: DataFrame) -> PolarsResult<DataFrame> {
    frame
        .lazy()
        .group_by([col("location"), col("period")])
        .agg([
            col("snowfall_cm").sum().alias("total_snowfall_cm"),
            col("snow_depth_cm").max().alias("max_snow_depth_cm"),
            col("snow_depth_cm").mean().alias("mean_snow_depth_cm"),
        ])
        .sort_by_exprs(
            [col("period"), col("total_snowfall_cm")],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .select([
            col("location"),
            col("period"),
            col("total_snowfall_cm"),
            col("max_snow_depth_cm"),
            col("mean_snow_depth_cm"),
        ])
        .collect()
}

fn portfolio(frame: DataFrame) -> PolarsResult<DataFrame> {
    frame
        .lazy()
        .group_by([col("period")])
        .agg([
            col("snowfall_cm").sum().alias("total_snowfall_cm"),
            col("snow_depth_cm").mean().alias("avg_snow_depth_cm"),
            col("snow_depth_cm").max().alias("max_snow_depth_cm"),
        ])
        .sort(["period"], SortMultipleOptions::default())
        .with_column(lit(PORTFOLIO_LABEL).alias("location"))
        .select([
            col("period"),
            col("total_snowfall_cm"),
            col("avg_snow_depth_cm"),
            col("max_snow_depth_cm"),
            col("location"),
        ])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: u32, hour: u32, location: &str, snowfall: f64, depth: f64) -> ObservationRow {
        ObservationRow {
            timestamp: NaiveDate::from_ymd_opt(2023, 1, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            snowfall_cm: Some(snowfall),
            snow_depth_cm: Some(depth),
            location: location.to_string(),
        }
    }

    fn f64_at(df: &DataFrame, column: &str, idx: usize) -> Option<f64> {
        df.column(column).unwrap().f64().unwrap().get(idx)
    }

    fn str_at(df: &DataFrame, column: &str, idx: usize) -> String {
        df.column(column)
            .unwrap()
            .str()
            .unwrap()
            .get(idx)
            .unwrap()
            .to_string()
    }

    /// Index of the row matching a location, for small test frames.
    fn row_for(df: &DataFrame, location: &str) -> usize {
        let col = df.column("location").unwrap();
        let ca = col.str().unwrap();
        (0..df.height())
            .find(|&i| ca.get(i) == Some(location))
            .unwrap()
    }

    #[test]
    fn per_point_sums_cover_exactly_the_matching_rows() {
        let rows = vec![
            row(1, 0, "A", 1.0, 10.0),
            row(1, 1, "A", 2.5, 12.0),
            row(1, 0, "B", 4.0, 20.0),
            // Different month, must not leak into January's bucket.
            ObservationRow {
                timestamp: NaiveDate::from_ymd_opt(2023, 2, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                snowfall_cm: Some(100.0),
                snow_depth_cm: Some(1.0),
                location: "A".to_string(),
            },
        ];
        let df = aggregate(&rows, Grouping::Month, ViewMode::PerPoint).unwrap();
        // (A, Jan), (A, Feb), (B, Jan)
        assert_eq!(df.height(), 3);

        let totals = df.column("total_snowfall_cm").unwrap().f64().unwrap();
        let locations = df.column("location").unwrap().str().unwrap();
        let mut a_jan = None;
        for i in 0..df.height() {
            if locations.get(i) == Some("A") && totals.get(i) == Some(3.5) {
                a_jan = Some(i);
            }
        }
        let a_jan = a_jan.expect("A's January bucket should sum to 3.5");
        assert_eq!(f64_at(&df, "max_snow_depth_cm", a_jan), Some(12.0));
        assert_eq!(f64_at(&df, "mean_snow_depth_cm", a_jan), Some(11.0));
    }

    #[test]
    fn per_point_table_is_sorted_period_then_total_descending() {
        let rows = vec![
            row(1, 0, "A", 1.0, 1.0),
            row(1, 0, "B", 5.0, 1.0),
            row(2, 0, "A", 2.0, 1.0),
        ];
        let df = aggregate(&rows, Grouping::Hour, ViewMode::PerPoint).unwrap();
        assert_eq!(df.height(), 3);
        // Jan 2 first (latest period), then Jan 1 with B (5.0) before A (1.0).
        assert_eq!(f64_at(&df, "total_snowfall_cm", 0), Some(2.0));
        assert_eq!(str_at(&df, "location", 1), "B");
        assert_eq!(str_at(&df, "location", 2), "A");
    }

    #[test]
    fn portfolio_sums_and_averages_across_all_locations() {
        let rows = vec![
            row(1, 0, "A", 1.0, 10.0),
            row(1, 0, "B", 2.0, 30.0),
            row(1, 1, "A", 0.5, 14.0),
        ];
        let df = aggregate(&rows, Grouping::Month, ViewMode::Portfolio).unwrap();
        assert_eq!(df.height(), 1);
        // Sum over ALL rows of the period, not an average of station totals.
        assert_eq!(f64_at(&df, "total_snowfall_cm", 0), Some(3.5));
        assert_eq!(f64_at(&df, "avg_snow_depth_cm", 0), Some(18.0));
        assert_eq!(f64_at(&df, "max_snow_depth_cm", 0), Some(30.0));
        assert_eq!(str_at(&df, "location", 0), PORTFOLIO_LABEL);
    }

    #[test]
    fn portfolio_periods_come_out_ascending() {
        let rows = vec![
            row(9, 0, "A", 1.0, 1.0),  // ISO week of Jan 9
            row(2, 0, "A", 2.0, 1.0),  // ISO week of Jan 2
            row(16, 0, "A", 3.0, 1.0), // ISO week of Jan 16
        ];
        let df = aggregate(&rows, Grouping::Week, ViewMode::Portfolio).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(f64_at(&df, "total_snowfall_cm", 0), Some(2.0));
        assert_eq!(f64_at(&df, "total_snowfall_cm", 1), Some(1.0));
        assert_eq!(f64_at(&df, "total_snowfall_cm", 2), Some(3.0));
    }

    #[test]
    fn null_samples_are_skipped_not_zeroed() {
        let rows = vec![
            ObservationRow {
                timestamp: NaiveDate::from_ymd_opt(2023, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                snowfall_cm: Some(2.0),
                snow_depth_cm: None,
                location: "A".to_string(),
            },
            row(1, 1, "A", 1.0, 10.0),
        ];
        let df = aggregate(&rows, Grouping::Month, ViewMode::PerPoint).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(f64_at(&df, "total_snowfall_cm", 0), Some(3.0));
        // The null depth must not drag the mean down.
        assert_eq!(f64_at(&df, "mean_snow_depth_cm", 0), Some(10.0));
    }

    #[test]
    fn hour_grouping_keeps_rows_apart() {
        let rows = vec![row(1, 0, "A", 1.0, 1.0), row(1, 1, "A", 1.0, 1.0)];
        let df = aggregate(&rows, Grouping::Hour, ViewMode::PerPoint).unwrap();
        assert_eq!(df.height(), 2);
        let _ = row_for(&df, "A");
    }
}
