//! Presentation-boundary artifacts: plain data for a host UI to draw.

mod chart;
mod csv;

pub use chart::{ChartKind, ChartSeries, ChartSpec};
pub use csv::{read_csv, CsvExport};

pub(crate) use chart::charts_for;
pub(crate) use csv::export_csv;

use crate::aggregate::ViewMode;
use crate::fetch::PointFailure;
use crate::points::ParseWarning;
use polars::prelude::DataFrame;

/// Everything one render pass produces: the displayed table, both charts,
/// the CSV download, and the non-fatal conditions to surface.
#[derive(Debug)]
pub struct Dashboard {
    pub view: ViewMode,
    /// Number of points parsed from the uploaded list ("N station(s) loaded").
    pub station_count: usize,
    pub table: DataFrame,
    pub bar_chart: ChartSpec,
    pub line_chart: ChartSpec,
    pub csv: CsvExport,
    /// Skipped input lines.
    pub warnings: Vec<ParseWarning>,
    /// Points whose fetch failed; the rest of the batch still rendered.
    pub failures: Vec<PointFailure>,
}
