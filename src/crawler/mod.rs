//! Crawler module for playlist pages and their continuations
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed browser identity
//! - Extraction of the JSON blobs embedded in the playlist page
//! - Locating the first page of items in the initial-state tree
//! - Splitting item lists into videos and continuation tokens
//! - Exchanging continuation tokens for further pages
//! - Overall crawl coordination

mod continuation;
mod coordinator;
mod embedded;
mod fetcher;
mod items;
mod locator;
mod queue;

pub use continuation::{continuation_items, fetch_continuation};
pub use coordinator::{crawl_playlist, CrawlOutcome, PlaylistCrawler};
pub use embedded::{
    extract_embedded_data, extract_initial_data, extract_site_config, EmbeddedData, SiteConfig,
};
pub use fetcher::{build_http_client, fetch_document};
pub use items::{extract_items, tokens_from_endpoint, ContinuationToken, ExtractedItems, VideoEntry};
pub use locator::{locate_renderer, renderer_items};
pub use queue::WorkQueue;
