//! Pipeline orchestration: listing search → filter/enrich → image fetch →
//! tabular sink.
//!
//! The listing source and tabular sink are modeled as traits so the core
//! stays independent of any particular website or file format. The run moves
//! through an explicit state machine:
//!
//! ```text
//! Idle → Searching → Filtering → Fetching → Done
//!                 ↘ (listing/sink failure) → Failed
//! ```
//!
//! Per-record problems (a malformed date, a failed image download) are
//! downgraded to recorded outcomes and never move the run to `Failed`; only
//! an unavailable listing source or a sink write failure is fatal. A run
//! with zero in-window records skips fetching and the sink write entirely
//! and still counts as `Done`.

use crate::errors::{ListingError, PipelineError, SinkError};
use crate::fetch;
use crate::filter;
use crate::models::{FetchOutcome, RawRow};
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Produces ordered raw listing rows for a search phrase.
///
/// Implementations are expected to deliver rows newest-first; the filter's
/// short-circuit contract depends on it.
pub trait ListingSource {
    async fn search(&self, phrase: &str, category: &str) -> Result<Vec<RawRow>, ListingError>;
}

/// Persists the final set of per-record outcomes in tabular form.
pub trait TabularSink {
    async fn write(&self, outcomes: &[FetchOutcome]) -> Result<(), SinkError>;
}

/// Where the pipeline currently is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Searching,
    Filtering,
    Fetching,
    Done,
    Failed,
}

/// Run parameters, supplied by the CLI layer.
#[derive(Debug, Clone)]
pub struct RunParams {
    /// Phrase to search for and to count occurrences of.
    pub search_phrase: String,
    /// News category/section. Passed through to the listing source; the
    /// filtering logic does not use it.
    pub news_category: String,
    /// Number of months of news to keep (0 and 1 both mean "this month").
    pub num_months: u32,
    /// Maximum concurrent image downloads.
    pub concurrency_limit: usize,
    /// Independent deadline for each image request.
    pub per_request_timeout: Duration,
    /// Directory receiving downloaded images and tabular output.
    pub output_dir: PathBuf,
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub records_found: usize,
    pub images_downloaded: usize,
    pub images_failed: usize,
}

/// The orchestrator. Owns the HTTP client, the listing source, and the sink.
pub struct Pipeline<L, S> {
    client: reqwest::Client,
    source: L,
    sink: S,
    params: RunParams,
    state: RunState,
}

impl<L, S> Pipeline<L, S>
where
    L: ListingSource,
    S: TabularSink,
{
    pub fn new(client: reqwest::Client, source: L, sink: S, params: RunParams) -> Self {
        Self {
            client,
            source,
            sink,
            params,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the pipeline against the current wall clock.
    pub async fn run(&mut self) -> Result<RunReport, PipelineError> {
        self.run_at(Local::now().naive_local()).await
    }

    /// Run the pipeline with an injected "now", for deterministic filtering.
    #[instrument(level = "info", skip_all, fields(phrase = %self.params.search_phrase, months = self.params.num_months))]
    pub async fn run_at(&mut self, now: NaiveDateTime) -> Result<RunReport, PipelineError> {
        self.state = RunState::Searching;
        info!(
            category = %self.params.news_category,
            "Searching listing source"
        );
        let rows = match self
            .source
            .search(&self.params.search_phrase, &self.params.news_category)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                self.state = RunState::Failed;
                return Err(e.into());
            }
        };
        info!(rows = rows.len(), "Listing source produced rows");

        self.state = RunState::Filtering;
        let records = filter::filter_rows(
            &rows,
            &self.params.search_phrase,
            self.params.num_months,
            now,
        );

        if records.is_empty() {
            // Valid empty outcome, not an error; nothing to fetch or persist.
            info!("No articles within the date window");
            self.state = RunState::Done;
            return Ok(RunReport {
                records_found: 0,
                images_downloaded: 0,
                images_failed: 0,
            });
        }

        self.state = RunState::Fetching;
        let records_found = records.len();
        let outcomes = fetch::fetch_all(
            &self.client,
            records,
            self.params.concurrency_limit,
            self.params.per_request_timeout,
            &self.params.output_dir,
        )
        .await;
        let images_failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        if images_failed > 0 {
            warn!(
                failed = images_failed,
                "Some images failed to download; their rows are still persisted"
            );
        }

        if let Err(e) = self.sink.write(&outcomes).await {
            self.state = RunState::Failed;
            return Err(e.into());
        }

        self.state = RunState::Done;
        Ok(RunReport {
            records_found,
            images_downloaded: records_found - images_failed,
            images_failed,
        })
    }
}
