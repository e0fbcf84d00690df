use crate::archive::ArchiveError;
use crate::fetch::PointFailure;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnowHistoryError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("Failed processing DataFrame: {0}")]
    Frame(#[from] PolarsError),

    /// The uploaded point list contained no parseable point at all.
    #[error("No valid point in the uploaded list")]
    NoValidPoints,

    /// Every point failed to fetch; there is nothing to aggregate or render.
    #[error("No point returned any data ({})", failed_points(.failures))]
    NoDataFetched { failures: Vec<PointFailure> },
}

fn failed_points(failures: &[PointFailure]) -> String {
    if failures.is_empty() {
        return "0 points attempted".to_string();
    }
    let names: Vec<&str> = failures.iter().map(|f| f.point.as_str()).collect();
    format!("{} failed: {}", failures.len(), names.join(", "))
}
