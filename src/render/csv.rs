//! CSV export of the displayed table, byte-for-byte what the download
//! button serves.

use crate::aggregate::ViewMode;
use polars::prelude::*;
use std::io::Cursor;

/// Period stamps are written in this fixed format so exports are stable
/// across polars versions and parse back cleanly.
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A ready-to-serve CSV download.
#[derive(Debug, Clone)]
pub struct CsvExport {
    /// `stations_snow.csv` or `portfolio_snow.csv`, by view mode.
    pub filename: &'static str,
    pub bytes: Vec<u8>,
}

pub(crate) fn export_csv(table: &DataFrame, view: ViewMode) -> PolarsResult<CsvExport> {
    let mut bytes = Vec::new();
    CsvWriter::new(&mut bytes)
        .with_datetime_format(Some(DATETIME_FORMAT.to_string()))
        .finish(&mut table.clone())?;
    Ok(CsvExport {
        filename: view.csv_filename(),
        bytes,
    })
}

/// Parses CSV bytes produced by [`export_csv`] back into a frame, with the
/// period column re-typed as a datetime. Mainly a round-trip guarantee for
/// hosts that re-ingest the download.
pub fn read_csv(bytes: &[u8]) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}
