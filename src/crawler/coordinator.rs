//! Crawler coordinator - playlist crawl orchestration
//!
//! This module drives one crawl session from start to finish:
//! - Fetching the playlist page and reading its embedded data
//! - Seeding the work queue from the first page of items
//! - Draining the queue one continuation page at a time
//! - Accumulating every entry in discovery order
//!
//! Requests are issued strictly one after another. Any failure aborts the whole
//! crawl; nothing collected up to that point is returned.

use crate::config::Config;
use crate::crawler::continuation::fetch_continuation;
use crate::crawler::embedded::{extract_embedded_data, SiteConfig};
use crate::crawler::fetcher::{build_http_client, fetch_document};
use crate::crawler::items::{extract_items, ExtractedItems, VideoEntry};
use crate::crawler::locator::{locate_renderer, renderer_items};
use crate::crawler::queue::WorkQueue;
use crate::output::CrawlStatistics;
use crate::state::CrawlPhase;
use crate::url::extract_playlist_id;
use crate::RippleError;
use reqwest::Client;
use std::time::Instant;

/// Everything a finished crawl hands back
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// All entries in discovery order
    pub entries: Vec<VideoEntry>,

    /// Counters collected along the way
    pub stats: CrawlStatistics,
}

/// One playlist crawl session
///
/// The session owns its work queue and accumulated entries; both live only as
/// long as the crawl does.
pub struct PlaylistCrawler {
    config: Config,
    client: Client,
    playlist_url: String,
    playlist_id: String,
    phase: CrawlPhase,
    queue: WorkQueue,
    entries: Vec<VideoEntry>,
    stats: CrawlStatistics,
}

impl PlaylistCrawler {
    /// Creates a new crawl session for a playlist URL
    ///
    /// # Errors
    ///
    /// * `RippleError::InvalidInput` - The URL carries no playlist identifier
    /// * `RippleError::Config` / `RippleError::Reqwest` - The HTTP client could not be built
    pub fn new(config: Config, playlist_url: &str) -> Result<Self, RippleError> {
        let playlist_id = extract_playlist_id(playlist_url)?;
        let client = build_http_client(&config.http)?;

        Ok(Self {
            config,
            client,
            playlist_url: playlist_url.trim().to_string(),
            playlist_id,
            phase: CrawlPhase::Seeding,
            queue: WorkQueue::new(),
            entries: Vec::new(),
            stats: CrawlStatistics::default(),
        })
    }

    /// The playlist identifier stitched into every entry URL
    pub fn playlist_id(&self) -> &str {
        &self.playlist_id
    }

    /// The phase the session is currently in
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to completion
    ///
    /// Seeding → Draining → Done. The session is consumed; on failure the
    /// partially collected entries are dropped with it.
    pub async fn run(mut self) -> Result<CrawlOutcome, RippleError> {
        let start_time = Instant::now();
        tracing::info!(
            "Crawling playlist {} from {}",
            self.playlist_id,
            self.playlist_url
        );

        let site_config = self.seed().await?;
        self.transition(CrawlPhase::Draining)?;

        self.drain(&site_config).await?;
        self.transition(CrawlPhase::Done)?;

        self.stats.tokens_discovered = self.queue.total_enqueued() as u64;
        self.stats.tokens_consumed = self.queue.total_dequeued() as u64;
        self.stats.elapsed = start_time.elapsed();
        tracing::info!(
            "Crawl completed: {} entries from {} pages in {:?}",
            self.entries.len(),
            self.stats.pages_fetched,
            self.stats.elapsed
        );

        Ok(CrawlOutcome {
            entries: self.entries,
            stats: self.stats,
        })
    }

    /// Fetches the playlist page and collects its first page of items
    async fn seed(&mut self) -> Result<SiteConfig, RippleError> {
        let html = fetch_document(&self.client, &self.playlist_url).await?;
        self.stats.pages_fetched += 1;

        let embedded = extract_embedded_data(&html)?;
        let renderer = locate_renderer(&embedded.initial_data)?;

        let extracted = extract_items(
            renderer_items(renderer),
            &self.playlist_id,
            &self.config.endpoints.watch_base,
        );
        tracing::debug!(
            "First page: {} entries, {} continuation tokens",
            extracted.entries.len(),
            extracted.tokens.len()
        );
        self.absorb(extracted);

        Ok(embedded.site_config)
    }

    /// Exchanges queued tokens until none remain
    async fn drain(&mut self, site_config: &SiteConfig) -> Result<(), RippleError> {
        while let Some(token) = self.queue.pop() {
            let items = fetch_continuation(
                &self.client,
                &self.config.endpoints.browse_endpoint,
                &token,
                site_config,
            )
            .await?;
            self.stats.pages_fetched += 1;

            let extracted = extract_items(
                &items,
                &self.playlist_id,
                &self.config.endpoints.watch_base,
            );
            tracing::debug!(
                "Continuation {}: {} entries, {} new tokens, {} pending",
                token,
                extracted.entries.len(),
                extracted.tokens.len(),
                self.queue.len()
            );
            self.absorb(extracted);

            if self.stats.pages_fetched % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} entries collected, {} tokens pending",
                    self.stats.pages_fetched,
                    self.entries.len(),
                    self.queue.len()
                );
            }
        }

        Ok(())
    }

    /// Appends one page worth of entries and tokens
    fn absorb(&mut self, extracted: ExtractedItems) {
        self.stats.entries_collected += extracted.entries.len() as u64;
        self.stats.items_skipped += extracted.skipped as u64;

        self.entries.extend(extracted.entries);
        self.queue.extend(extracted.tokens);
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), RippleError> {
        if !self.phase.can_transition_to(next) {
            return Err(RippleError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }

        tracing::debug!("Crawl phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

/// Crawls a playlist and returns its entries in discovery order
///
/// # Example
///
/// ```no_run
/// use playlist_ripple::config::Config;
/// use playlist_ripple::crawler::crawl_playlist;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let entries = crawl_playlist(
///     Config::default(),
///     "https://www.youtube.com/playlist?list=PL123",
/// )
/// .await?;
/// println!("{} videos", entries.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl_playlist(
    config: Config,
    playlist_url: &str,
) -> Result<Vec<VideoEntry>, RippleError> {
    let outcome = PlaylistCrawler::new(config, playlist_url)?.run().await?;
    Ok(outcome.entries)
}
