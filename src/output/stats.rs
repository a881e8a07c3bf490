//! Crawl statistics
//!
//! Counters collected while a crawl runs, printed once it completes.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Documents fetched: the playlist page plus every continuation page
    pub pages_fetched: u64,

    /// Continuation tokens discovered across all pages
    pub tokens_discovered: u64,

    /// Continuation tokens exchanged for a page
    pub tokens_consumed: u64,

    /// Video entries collected
    pub entries_collected: u64,

    /// Video nodes dropped for lacking a video identifier
    pub items_skipped: u64,

    /// Wall-clock time of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Average wall-clock time per fetched document
    pub fn time_per_page(&self) -> Duration {
        if self.pages_fetched == 0 {
            return Duration::ZERO;
        }
        self.elapsed / self.pages_fetched as u32
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Pages:");
    println!("  Documents fetched: {}", stats.pages_fetched);
    println!(
        "  Continuation tokens: {} discovered, {} consumed",
        stats.tokens_discovered, stats.tokens_consumed
    );
    println!();

    println!("Entries:");
    println!("  Collected: {}", stats.entries_collected);
    if stats.items_skipped > 0 {
        println!("  Skipped (no video id): {}", stats.items_skipped);
    }
    println!();

    println!(
        "Elapsed: {:.2?} ({:.2?} per page)",
        stats.elapsed,
        stats.time_per_page()
    );
}
