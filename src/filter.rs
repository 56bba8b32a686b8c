//! Date-window filtering and enrichment of raw listing rows.
//!
//! Rows arrive newest-first by upstream convention, so filtering stops at the
//! first row that falls outside the window: everything after it is presumed
//! older still. If the listing ever delivers rows out of order, in-window
//! rows behind an old row are silently dropped — that is the upstream
//! ordering contract, and this module deliberately does not scan past the
//! first miss to compensate.

use crate::models::{EnrichedRecord, RawRow};
use crate::window;
use chrono::NaiveDateTime;
use tracing::{debug, info, instrument, warn};

/// Filter rows to the date window and enrich the survivors.
///
/// Iterates `rows` in order. Each row's publication date is parsed and
/// checked against the window; in-window rows are enriched (phrase count,
/// money flag, derived image filename) and appended. The scan stops at the
/// first out-of-window row. A row whose date fails to parse also stops the
/// scan, preserving the same short-circuit contract rather than skipping it.
///
/// An empty input, or a first row already outside the window, yields an
/// empty vector — a valid "no matching articles" outcome, not an error.
#[instrument(level = "info", skip_all, fields(rows = rows.len(), months_back))]
pub fn filter_rows(
    rows: &[RawRow],
    phrase: &str,
    months_back: u32,
    now: NaiveDateTime,
) -> Vec<EnrichedRecord> {
    let mut kept = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let published = match window::parse_published(&row.published_at) {
            Ok(date) => date,
            Err(e) => {
                warn!(index = i, error = %e, "Unparseable publication date; stopping scan");
                break;
            }
        };

        if !window::in_window(published, months_back, now) {
            debug!(index = i, %published, "First out-of-window row; stopping scan");
            break;
        }

        kept.push(EnrichedRecord::derive(row, phrase, published));
    }

    info!(
        kept = kept.len(),
        scanned = rows.len(),
        "Filtered listing rows against date window"
    );
    kept
}
