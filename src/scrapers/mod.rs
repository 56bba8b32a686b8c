//! Listing-source implementations for news sites.
//!
//! Each submodule implements [`ListingSource`](crate::pipeline::ListingSource)
//! for one site: fetch the search-results page over HTTP, parse the article
//! nodes with `scraper` selectors, and yield [`RawRow`](crate::models::RawRow)s
//! in the order the page presents them (newest-first).
//!
//! # Supported Sources
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | Source (OpenNews) | [`opennews`] | Article listing at source.opennews.org |

pub mod opennews;
