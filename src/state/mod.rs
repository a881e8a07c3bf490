//! State module for tracking crawl progress
//!
//! A crawl moves through three phases: it seeds its work queue from the
//! playlist page, drains the queue one continuation at a time, and finishes.
//!
//! # Components
//!
//! - `CrawlPhase`: The phase a crawl session is in, with its legal transitions

mod crawl_phase;

// Re-export main types
pub use crawl_phase::CrawlPhase;
