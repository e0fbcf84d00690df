//! HTTP client for the Open-Meteo archive endpoint, with an indefinite
//! on-disk response cache and bounded exponential-backoff retry.

use crate::archive::error::ArchiveError;
use crate::archive::response::{ArchiveResponse, ErrorPayload, HourlyBlock};
use crate::points::Point;
use bon::Builder;
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::Client;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

pub const DEFAULT_BASE_URL: &str = "https://archive-api.open-meteo.com";

const CACHE_DIR_NAME: &str = "snow_history_cache";

/// Connection settings for the archive endpoint.
///
/// One value is built once at startup and handed to [`ArchiveClient`]; there
/// is no ambient global session. Defaults match the production dashboard:
/// 5 retries, 0.2 backoff factor, cache entries that never expire.
#[derive(Debug, Clone, Builder)]
pub struct ArchiveConfig {
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Cache directory for raw responses; `None` resolves the platform
    /// cache dir via `dirs`.
    pub cache_dir: Option<PathBuf>,
    #[builder(default = 5)]
    pub retries: u32,
    /// Sleep `backoff_factor * 2^(attempt - 1)` seconds between attempts.
    #[builder(default = 0.2)]
    pub backoff_factor: f64,
    #[builder(default = 30)]
    pub timeout_secs: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Client for fetching hourly archive series, one request per point and
/// date range. Responses are cached as raw JSON keyed by the full request
/// parameters; a cache hit never touches the network.
pub struct ArchiveClient {
    http: Client,
    base_url: String,
    cache_dir: PathBuf,
    retries: u32,
    backoff_factor: f64,
}

impl ArchiveClient {
    /// Creates a client with [`ArchiveConfig::default`].
    pub async fn new() -> Result<Self, ArchiveError> {
        Self::with_config(ArchiveConfig::default()).await
    }

    pub async fn with_config(config: ArchiveConfig) -> Result<Self, ArchiveError> {
        let cache_dir = match config.cache_dir {
            Some(dir) => dir,
            None => default_cache_dir()?,
        };
        ensure_cache_dir_exists(&cache_dir).await?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ArchiveError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: config.base_url,
            cache_dir,
            retries: config.retries,
            backoff_factor: config.backoff_factor,
        })
    }

    /// Fetches the hourly snowfall and snow-depth series for one point over
    /// the closed date interval `[start_date, end_date]`, resolving the
    /// point's local timezone (`timezone=auto`).
    pub async fn fetch_hourly(
        &self,
        point: &Point,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ArchiveResponse, ArchiveError> {
        let url = self.archive_url(point, start_date, end_date);
        let cache_path = self.cache_path(point, start_date, end_date);

        let body = if fs::metadata(&cache_path).await.is_ok() {
            info!("cache hit for '{}' at {:?}", point.name, cache_path);
            fs::read(&cache_path)
                .await
                .map_err(|e| ArchiveError::CacheRead(cache_path.clone(), e))?
        } else {
            warn!("cache miss for '{}', requesting {}", point.name, url);
            let bytes = self.request_with_retry(&url).await?;
            fs::write(&cache_path, &bytes)
                .await
                .map_err(|e| ArchiveError::CacheWrite(cache_path.clone(), e))?;
            bytes
        };

        let response: ArchiveResponse =
            serde_json::from_slice(&body).map_err(|e| ArchiveError::Decode {
                point: point.name.clone(),
                source: e,
            })?;
        ensure_series(&response, &point.name)?;
        Ok(response)
    }

    fn archive_url(&self, point: &Point, start_date: NaiveDate, end_date: NaiveDate) -> String {
        format!(
            "{}/v1/archive?latitude={}&longitude={}&start_date={}&end_date={}\
             &hourly=snowfall,snow_depth&timezone=auto&timeformat=unixtime",
            self.base_url,
            point.latitude,
            point.longitude,
            start_date.format("%Y-%m-%d"),
            end_date.format("%Y-%m-%d"),
        )
    }

    fn cache_path(&self, point: &Point, start_date: NaiveDate, end_date: NaiveDate) -> PathBuf {
        self.cache_dir.join(format!(
            "archive-{}-{}-{}-{}.json",
            point.latitude, point.longitude, start_date, end_date
        ))
    }

    async fn request_with_retry(&self, url: &str) -> Result<Vec<u8>, ArchiveError> {
        let mut attempt: u32 = 0;
        loop {
            match self.request_once(url).await {
                Ok(bytes) => return Ok(bytes),
                Err(error) => {
                    if !is_retryable(&error) {
                        return Err(error);
                    }
                    if attempt >= self.retries {
                        return Err(ArchiveError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: attempt + 1,
                            source: Box::new(error),
                        });
                    }
                    attempt += 1;
                    let delay = self.backoff_factor * f64::from(1u32 << (attempt - 1));
                    warn!(
                        "attempt {}/{} for {} failed ({}), retrying in {:.1}s",
                        attempt,
                        self.retries + 1,
                        url,
                        error,
                        delay
                    );
                    tokio::time::sleep(Duration::from_secs_f64(delay)).await;
                }
            }
        }
    }

    async fn request_once(&self, url: &str) -> Result<Vec<u8>, ArchiveError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.to_string(), e))?;
        let status = response.status();
        if !status.is_success() {
            let reason = response
                .json::<ErrorPayload>()
                .await
                .ok()
                .map(|payload| payload.reason);
            return Err(ArchiveError::HttpStatus {
                url: url.to_string(),
                status,
                reason,
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.to_string(), e))?;
        Ok(bytes.to_vec())
    }
}

/// Connection-level failures and server-side statuses are worth retrying;
/// client errors other than 429 are not.
fn is_retryable(error: &ArchiveError) -> bool {
    match error {
        ArchiveError::NetworkRequest(_, _) => true,
        ArchiveError::HttpStatus { status, .. } => {
            status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
        }
        _ => false,
    }
}

/// Rejects responses that carry no usable hourly series: missing block,
/// empty time axis, zero variables, or misaligned arrays.
fn ensure_series(response: &ArchiveResponse, point: &str) -> Result<(), ArchiveError> {
    let Some(hourly) = &response.hourly else {
        return Err(ArchiveError::MissingSeries {
            point: point.to_string(),
        });
    };
    if hourly.time.is_empty() || (hourly.snowfall.is_none() && hourly.snow_depth.is_none()) {
        return Err(ArchiveError::MissingSeries {
            point: point.to_string(),
        });
    }
    check_len(hourly, &hourly.snowfall, "snowfall", point)?;
    check_len(hourly, &hourly.snow_depth, "snow_depth", point)?;
    Ok(())
}

fn check_len(
    hourly: &HourlyBlock,
    values: &Option<Vec<Option<f64>>>,
    variable: &'static str,
    point: &str,
) -> Result<(), ArchiveError> {
    match values {
        Some(values) if values.len() != hourly.time.len() => {
            Err(ArchiveError::SeriesLengthMismatch {
                point: point.to_string(),
                variable,
                time_len: hourly.time.len(),
                values_len: values.len(),
            })
        }
        _ => Ok(()),
    }
}

fn default_cache_dir() -> Result<PathBuf, ArchiveError> {
    dirs::cache_dir()
        .map(|dir| dir.join(CACHE_DIR_NAME))
        .ok_or(ArchiveError::CacheDirResolution)
}

async fn ensure_cache_dir_exists(path: &Path) -> Result<(), ArchiveError> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ArchiveError::CacheDirCreation(
            path.to_path_buf(),
            io::Error::new(io::ErrorKind::AlreadyExists, "path exists and is not a directory"),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("creating cache directory {:?}", path);
            fs::create_dir_all(path)
                .await
                .map_err(|e| ArchiveError::CacheDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(ArchiveError::CacheDirCreation(path.to_path_buf(), e)),
    }
}
