//! Listing source for [Source](https://source.opennews.org), OpenNews'
//! journalism-tech publication.
//!
//! The search results page lists articles newest-first; each entry carries a
//! headline (`h3.hed-article-title`), a summary paragraph (`div.summary p`),
//! a `<time datetime="...">` element, and a thumbnail image. The four node
//! lists are zipped positionally into rows, so a row is only produced when
//! all four pieces are present at the same index.

use crate::errors::ListingError;
use crate::models::RawRow;
use crate::pipeline::ListingSource;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://source.opennews.org/";

/// HTTP listing source for the Source article listing.
pub struct OpenNewsListing {
    client: reqwest::Client,
    base_url: Url,
}

impl OpenNewsListing {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }

    fn search_url(&self, phrase: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("articles/");
        url.query_pairs_mut().append_pair("q", phrase);
        url
    }
}

impl ListingSource for OpenNewsListing {
    #[instrument(level = "info", skip(self))]
    async fn search(&self, phrase: &str, category: &str) -> Result<Vec<RawRow>, ListingError> {
        let url = self.search_url(phrase);
        info!(%url, category, "Fetching article listing");

        let html = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ListingError::Unavailable {
                reason: e.to_string(),
            })?
            .text()
            .await
            .map_err(|e| ListingError::Unavailable {
                reason: e.to_string(),
            })?;

        let rows = parse_listing(&html, &self.base_url);
        info!(count = rows.len(), "Indexed listing rows");
        Ok(rows)
    }
}

/// Parse the search-results page into raw rows.
///
/// Relative image URLs are resolved against `base_url`. Entries missing any
/// of the four node kinds truncate the zip at that point.
fn parse_listing(html: &str, base_url: &Url) -> Vec<RawRow> {
    let document = Html::parse_document(html);
    let title_selector = Selector::parse("h3.hed-article-title").expect("valid selector");
    let summary_selector = Selector::parse("div.summary p").expect("valid selector");
    let time_selector = Selector::parse("time[datetime]").expect("valid selector");
    let image_selector = Selector::parse("li img[src]").expect("valid selector");

    let titles: Vec<String> = document
        .select(&title_selector)
        .map(element_text)
        .collect();
    let summaries: Vec<String> = document
        .select(&summary_selector)
        .map(element_text)
        .collect();
    let dates: Vec<String> = document
        .select(&time_selector)
        .filter_map(|e| e.value().attr("datetime").map(str::to_string))
        .collect();
    let images: Vec<String> = document
        .select(&image_selector)
        .filter_map(|e| e.value().attr("src"))
        .filter_map(|src| base_url.join(src).ok())
        .map(|u| u.to_string())
        .collect();

    let mut rows = Vec::new();
    for (((title, description), published_at), image_url) in titles
        .into_iter()
        .zip(summaries)
        .zip(dates)
        .zip(images)
    {
        debug!(%title, %published_at, "Parsed listing row");
        rows.push(RawRow {
            title,
            description,
            published_at,
            image_url,
        });
    }
    rows
}

fn element_text(element: scraper::ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
