//! Historical snow analytics for a portfolio of geographic points.
//!
//! The crate parses a plain-text point list, fetches hourly snowfall and
//! snow-depth series from the Open-Meteo archive API (with a local response
//! cache and bounded retry), buckets the observations into hourly, weekly or
//! monthly periods, and aggregates them either per point or across the whole
//! portfolio. The output is plain data (a Polars table, chart specifications,
//! CSV bytes) for a host UI to render; nothing here draws widgets.
//!
//! The main entry point is [`render`], which rebuilds the whole dashboard
//! from scratch for one set of parameters.

mod aggregate;
mod archive;
mod error;
mod fetch;
mod pipeline;
mod points;
mod render;

pub use error::SnowHistoryError;

pub use points::{parse_points, ParseWarning, ParsedPoints, Point};

pub use archive::{ArchiveClient, ArchiveConfig, ArchiveError, ArchiveResponse, HourlyBlock};

pub use fetch::{FetchOutcome, FetchProgress, ObservationRow, PointFailure, SeriesFetcher};

pub use aggregate::{aggregate, period_start, Grouping, ViewMode, PORTFOLIO_LABEL};

pub use render::{read_csv, ChartKind, ChartSeries, ChartSpec, CsvExport, Dashboard};

pub use pipeline::{render, RenderParams};
