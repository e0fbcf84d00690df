//! demos/plot_snow.rs
//!
//! Fetches two seasons of snowfall for a small set of alpine resorts,
//! aggregates it per month across the whole portfolio, and plots snow depth
//! over time with `plotlars`.
//!
//! To run this demo:
//! cargo run --example plot_snow --features plotting

use std::error::Error;

use chrono::NaiveDate;
use plotlars::{Legend, Line, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::DataFrame;
use snow_history::{render, ArchiveClient, Grouping, RenderParams, ViewMode};

const RESORTS: &str = "\
45.415, 6.635 # Courchevel
45.924, 6.869 # Chamonix
46.192, 6.709 # Avoriaz";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let client = ArchiveClient::new().await?;

    let params = RenderParams::builder()
        .point_list(RESORTS)
        .start_date(NaiveDate::from_ymd_opt(2023, 11, 1).ok_or("bad date")?)
        .end_date(NaiveDate::from_ymd_opt(2025, 4, 30).ok_or("bad date")?)
        .grouping(Grouping::Month)
        .view(ViewMode::Portfolio)
        .build();

    println!("Fetching snowfall history from the archive...");
    let dashboard = render(&client, &params, |p| {
        println!("  [{}/{}] {}", p.index + 1, p.total, p.point);
    })
    .await?;

    for warning in &dashboard.warnings {
        println!("{warning}");
    }
    for failure in &dashboard.failures {
        println!("failed: {failure}");
    }

    println!("{}", dashboard.table);

    println!("Generating snow depth plot...");
    plot_snow_depth(&dashboard.table);
    println!("Plot shown in browser.");

    Ok(())
}

/// Plots max and average snow depth from the portfolio table's 'period',
/// 'max_snow_depth_cm' and 'avg_snow_depth_cm' columns.
fn plot_snow_depth(data: &DataFrame) {
    TimeSeriesPlot::builder()
        .data(&data)
        .x("period")
        .y("max_snow_depth_cm")
        .additional_series(vec!["avg_snow_depth_cm"])
        .size(8)
        .colors(vec![Rgb(69, 157, 230), Rgb(235, 117, 0)])
        .lines(vec![Line::Solid, Line::Dash])
        .plot_title(Text::from("Portfolio snow depth per month").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("Month")
        .y_title("Snow depth (cm)")
        .build()
        .plot();
}
