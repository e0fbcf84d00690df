mod aggregator;
mod period;

pub use aggregator::{aggregate, PORTFOLIO_LABEL};
pub use period::period_start;

/// Time bucket used for grouping observation rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Grouping {
    /// One bucket per hour; rows are already hour-resolution, so the period
    /// is the timestamp itself.
    #[default]
    Hour,
    /// One bucket per ISO calendar week, keyed by its Monday 00:00.
    Week,
    /// One bucket per calendar month, keyed by the 1st at 00:00.
    Month,
}

/// Whether aggregation keeps each point separate or collapses the whole
/// portfolio into one series per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    PerPoint,
    Portfolio,
}

impl ViewMode {
    /// File name for the CSV export of this view's table.
    pub fn csv_filename(&self) -> &'static str {
        match self {
            ViewMode::PerPoint => "stations_snow.csv",
            ViewMode::Portfolio => "portfolio_snow.csv",
        }
    }
}
