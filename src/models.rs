//! Data models for listing rows and their enriched representations.
//!
//! This module defines the core data structures flowing through the pipeline:
//! - [`RawRow`]: One unprocessed listing entry as delivered by the listing source
//! - [`EnrichedRecord`]: A raw row confirmed in-window and augmented with text signals
//! - [`FetchOutcome`]: The terminal success/failure result of one image download

use crate::errors::FetchError;
use crate::signals;
use crate::utils::image_filename;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One unprocessed listing entry before date filtering and enrichment.
///
/// Rows are produced by a [`ListingSource`](crate::pipeline::ListingSource)
/// in reverse-chronological order by convention. That ordering is an upstream
/// contract, not something this crate enforces; the filter's short-circuit
/// behavior depends on it (see [`crate::filter::filter_rows`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// The article headline.
    pub title: String,
    /// The article summary text.
    pub description: String,
    /// Publication date as an ISO `YYYY-MM-DD` string, unparsed.
    pub published_at: String,
    /// Absolute URL of the article's associated image.
    pub image_url: String,
}

/// A raw row confirmed to be within the date window, augmented with
/// derived signals.
///
/// Immutable once constructed; derived entirely from one [`RawRow`] plus the
/// search phrase via [`EnrichedRecord::derive`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// The article headline.
    pub title: String,
    /// The article summary text.
    pub description: String,
    /// Parsed publication date.
    pub published_at: NaiveDate,
    /// Absolute URL of the article's associated image.
    pub image_url: String,
    /// Local filename for the image: the last path segment of `image_url`.
    pub image_filename: String,
    /// Case-insensitive occurrences of the search phrase in title + description.
    pub phrase_count: usize,
    /// Whether title or description mention a monetary amount.
    pub contains_money: bool,
}

impl EnrichedRecord {
    /// Build an enriched record from a raw row whose date has already been
    /// parsed and confirmed in-window.
    pub fn derive(row: &RawRow, phrase: &str, published_at: NaiveDate) -> Self {
        Self {
            title: row.title.clone(),
            description: row.description.clone(),
            published_at,
            image_url: row.image_url.clone(),
            image_filename: image_filename(&row.image_url),
            phrase_count: signals::count_phrase(&row.title, &row.description, phrase),
            contains_money: signals::contains_money(&row.title, &row.description),
        }
    }
}

/// The terminal result of attempting to download one record's image.
///
/// [`fetch_all`](crate::fetch::fetch_all) produces exactly one outcome per
/// input record; outcomes are unordered relative to each other.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The record whose image was fetched.
    pub record: EnrichedRecord,
    /// Local path of the persisted image on success, the cause on failure.
    pub result: Result<PathBuf, FetchError>,
}
