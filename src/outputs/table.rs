//! CSV + JSON tabular sink.
//!
//! Persists the run's surviving records as `news_articles.csv` with the
//! column order downstream consumers expect (Title, Date, Description,
//! Image Filename, Count Phrases, Contains Money), plus a `run_report.json`
//! copy that additionally records each image download's success or failure.
//!
//! Rows whose image failed to download are still written; the CSV carries
//! the derived filename either way, and the JSON report flags the error.

use crate::errors::SinkError;
use crate::models::FetchOutcome;
use crate::pipeline::TabularSink;
use serde_json::json;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

const TABLE_FILENAME: &str = "news_articles.csv";
const REPORT_FILENAME: &str = "run_report.json";

const CSV_HEADER: &str = "Title,Date,Description,Image Filename,Count Phrases,Contains Money";

/// Writes `news_articles.csv` and `run_report.json` under an output directory.
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

impl TabularSink for CsvSink {
    #[instrument(level = "info", skip_all, fields(output_dir = %self.output_dir.display()))]
    async fn write(&self, outcomes: &[FetchOutcome]) -> Result<(), SinkError> {
        // Fetch outcomes arrive in completion order; restore the listing's
        // newest-first presentation for the persisted table.
        let mut ordered: Vec<&FetchOutcome> = outcomes.iter().collect();
        ordered.sort_by(|a, b| {
            b.record
                .published_at
                .cmp(&a.record.published_at)
                .then_with(|| a.record.title.cmp(&b.record.title))
        });

        let mut table = String::from(CSV_HEADER);
        table.push('\n');
        for outcome in &ordered {
            let r = &outcome.record;
            let row = [
                csv_field(&r.title),
                r.published_at.to_string(),
                csv_field(&r.description),
                csv_field(&r.image_filename),
                r.phrase_count.to_string(),
                r.contains_money.to_string(),
            ];
            table.push_str(&row.join(","));
            table.push('\n');
        }

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| SinkError::Write {
                path: self.output_dir.clone(),
                source,
            })?;

        let table_path = self.output_dir.join(TABLE_FILENAME);
        info!(path = %table_path.display(), rows = ordered.len(), "Writing article table");
        fs::write(&table_path, table)
            .await
            .map_err(|source| SinkError::Write {
                path: table_path.clone(),
                source,
            })?;

        let report = json!({
            "articles": ordered
                .iter()
                .map(|outcome| {
                    let download = match &outcome.result {
                        Ok(path) => json!({ "status": "ok", "path": path }),
                        Err(e) => json!({ "status": "failed", "error": e.to_string() }),
                    };
                    json!({
                        "title": outcome.record.title,
                        "date": outcome.record.published_at,
                        "description": outcome.record.description,
                        "image_filename": outcome.record.image_filename,
                        "count_phrases": outcome.record.phrase_count,
                        "contains_money": outcome.record.contains_money,
                        "download": download,
                    })
                })
                .collect::<Vec<_>>(),
        });
        let report_json =
            serde_json::to_string_pretty(&report).map_err(|source| SinkError::Encode { source })?;

        let report_path = self.output_dir.join(REPORT_FILENAME);
        info!(path = %report_path.display(), "Writing run report");
        fs::write(&report_path, report_json)
            .await
            .map_err(|source| SinkError::Write {
                path: report_path,
                source,
            })?;

        Ok(())
    }
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
