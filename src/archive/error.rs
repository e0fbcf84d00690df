use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to determine cache directory")]
    CacheDirResolution,

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read cached response '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cached response '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}{}", fmt_reason(.reason))]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        /// The `reason` field of the archive API's JSON error body, if any.
        reason: Option<String>,
    },

    #[error("Gave up on {url} after {attempts} attempts")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<ArchiveError>,
    },

    #[error("Failed to decode archive response for '{point}'")]
    Decode {
        point: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response carried no hourly block, an empty time axis, or neither
    /// of the two requested variables.
    #[error("Archive response for '{point}' contains no hourly series")]
    MissingSeries { point: String },

    #[error(
        "Hourly series '{variable}' for '{point}' has {values_len} values for {time_len} stamps"
    )]
    SeriesLengthMismatch {
        point: String,
        variable: &'static str,
        time_len: usize,
        values_len: usize,
    },
}

fn fmt_reason(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {reason}"),
        None => String::new(),
    }
}
