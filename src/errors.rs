//! Error taxonomy for the extraction-filter-enrich-download pipeline.
//!
//! Errors fall into two classes with very different propagation rules:
//!
//! - **Per-record** errors ([`InvalidDateFormat`], [`FetchError`]) are
//!   downgraded locally: a malformed date stops the filter scan, a failed
//!   image download is recorded in its outcome. Neither aborts the run.
//! - **Fatal** errors ([`ListingError`], [`SinkError`]) abort the run and
//!   surface through [`PipelineError`].

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A publication date that could not be parsed as `YYYY-MM-DD`.
///
/// The filter treats this the same as an out-of-window date: it stops
/// iterating at the offending row rather than skipping it.
#[derive(Debug, Error)]
#[error("invalid publication date {value:?}")]
pub struct InvalidDateFormat {
    /// The raw date string as delivered by the listing source.
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Why a single image download failed.
///
/// One failed fetch never aborts its siblings; the error is carried in the
/// record's [`FetchOutcome`](crate::models::FetchOutcome).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with something other than 200 OK.
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Connection, DNS, or protocol failure before a response arrived.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The per-request deadline elapsed.
    #[error("request to {url} timed out after {timeout:?}")]
    TimedOut { url: String, timeout: Duration },

    /// The response body could not be persisted to disk.
    #[error("failed writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The listing source could not produce any rows. Always fatal.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("listing source unavailable: {reason}")]
    Unavailable { reason: String },
}

/// The tabular sink failed to persist the run's rows. Always fatal;
/// already-downloaded images are left in place.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write to {path} failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed encoding run report: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// Fatal pipeline failure. Partial fetch failures never produce this.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
