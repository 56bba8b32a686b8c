//! Bounded-concurrency image downloading.
//!
//! The fetch stage is the pipeline's only concurrent region. Records fan out
//! over at most `concurrency_limit` in-flight requests via
//! `buffer_unordered`, and the stage acts as a fan-in barrier: it returns
//! only once every record has produced exactly one [`FetchOutcome`], success
//! or failure. One slow or failing image never aborts its siblings.

use crate::errors::FetchError;
use crate::models::{EnrichedRecord, FetchOutcome};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// Download every record's image concurrently, best-effort.
///
/// Launches at most `concurrency_limit` fetches at any instant; remaining
/// records queue until a slot frees. Each fetch GETs the record's image URL
/// under its own independent `per_request_timeout`; a 200 response body is
/// persisted under `output_dir` named by the record's derived filename.
/// Non-200 status, transport errors, and timeouts become failure outcomes
/// with no retry.
///
/// Derived filenames are not deduplicated: two URLs mapping to the same
/// filename overwrite each other, last writer wins.
///
/// Cancellation is cooperative: dropping the returned future drops all
/// in-flight fetches; already-written files are left in place.
#[instrument(level = "info", skip_all, fields(records = records.len(), concurrency_limit))]
pub async fn fetch_all(
    client: &reqwest::Client,
    records: Vec<EnrichedRecord>,
    concurrency_limit: usize,
    per_request_timeout: Duration,
    output_dir: &Path,
) -> Vec<FetchOutcome> {
    let total = records.len();

    if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
        // Individual writes will surface the same problem per record.
        warn!(path = %output_dir.display(), error = %e, "Could not create output directory");
    }

    let outcomes: Vec<FetchOutcome> = stream::iter(records)
        .map(|record| {
            let client = client.clone();
            let output_dir = output_dir.to_path_buf();
            async move {
                let result =
                    fetch_one(&client, &record, per_request_timeout, &output_dir).await;
                match &result {
                    Ok(path) => debug!(url = %record.image_url, path = %path.display(), "Image downloaded"),
                    Err(e) => warn!(url = %record.image_url, error = %e, "Image download failed"),
                }
                FetchOutcome { record, result }
            }
        })
        .buffer_unordered(concurrency_limit.max(1))
        .collect()
        .await;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(
        total,
        downloaded = total - failed,
        failed,
        "Image fetch stage complete"
    );
    outcomes
}

/// Fetch a single image and persist it. One best-effort attempt, no retry.
async fn fetch_one(
    client: &reqwest::Client,
    record: &EnrichedRecord,
    per_request_timeout: Duration,
    output_dir: &Path,
) -> Result<PathBuf, FetchError> {
    let url = record.image_url.clone();

    let request = async {
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })
    };

    let body = timeout(per_request_timeout, request)
        .await
        .map_err(|_| FetchError::TimedOut {
            url: url.clone(),
            timeout: per_request_timeout,
        })??;

    let path = output_dir.join(&record.image_filename);
    tokio::fs::write(&path, &body)
        .await
        .map_err(|source| FetchError::Write {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}
