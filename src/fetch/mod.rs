mod fetcher;

pub use fetcher::{FetchOutcome, FetchProgress, ObservationRow, PointFailure, SeriesFetcher};
