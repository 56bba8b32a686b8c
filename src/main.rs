//! # news_clipper
//!
//! A news-listing pipeline that searches a site for articles matching a
//! phrase, keeps those published within the last N calendar months, enriches
//! each with derived text signals (search-phrase frequency, monetary-amount
//! presence), downloads their images with bounded concurrency, and persists
//! the surviving rows as a CSV table plus a JSON run report.
//!
//! ## Usage
//!
//! ```sh
//! news_clipper -s "climate change" -n 2 -o ./output
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Searching**: the listing source produces raw rows for the phrase
//! 2. **Filtering**: rows are checked against the rolling date window and
//!    enriched, stopping at the first out-of-window row (rows arrive
//!    newest-first)
//! 3. **Fetching**: images download concurrently, bounded and best-effort
//! 4. **Output**: the tabular sink writes the CSV table and run report

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod errors;
mod fetch;
mod filter;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod signals;
#[cfg(test)]
mod testutil;
mod utils;
mod window;

use cli::Cli;
use outputs::table::CsvSink;
use pipeline::{Pipeline, RunParams};
use scrapers::opennews::OpenNewsListing;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_clipper starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    info!(
        phrase = %args.search_phrase,
        category = %args.news_category,
        months = args.num_months,
        "Run parameters"
    );

    // Early check: ensure the output dir is writable before any network work
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!("news_clipper/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let params = RunParams {
        search_phrase: args.search_phrase,
        news_category: args.news_category,
        num_months: args.num_months,
        concurrency_limit: args.concurrency,
        per_request_timeout: Duration::from_secs(args.timeout_secs),
        output_dir: PathBuf::from(&args.output_dir),
    };
    let source = OpenNewsListing::new(client.clone());
    let sink = CsvSink::new(PathBuf::from(&args.output_dir));

    let mut pipeline = Pipeline::new(client, source, sink, params);
    let report = match pipeline.run().await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, state = ?pipeline.state(), "Pipeline run failed");
            return Err(e.into());
        }
    };

    if report.records_found == 0 {
        info!("No articles found within the date window");
    }

    let elapsed = start_time.elapsed();
    info!(
        records = report.records_found,
        downloaded = report.images_downloaded,
        failed = report.images_failed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
