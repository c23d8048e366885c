use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a remote playlist service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },
    #[error("request cannot be sent again")]
    Unreplayable,
}

/// Fatal errors of an extraction, parse or sync run.
///
/// A failed batch is not part of this enum: it is logged and the run goes on.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cannot read source {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("source {path} is not a valid message export: {source}")]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read playlist {playlist_id} at offset {offset}: {source}")]
    MembershipRead {
        playlist_id: String,
        offset: u32,
        #[source]
        source: ApiError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}
