mod client;
mod error;
mod response;

pub use client::{ArchiveClient, ArchiveConfig, DEFAULT_BASE_URL};
pub use error::ArchiveError;
pub use response::{ArchiveResponse, HourlyBlock};
