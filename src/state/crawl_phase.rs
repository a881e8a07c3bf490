//! Crawl phase definitions for a single playlist crawl session
//!
//! This module defines the phases a crawl passes through and which moves
//! between them are legal.

use std::fmt;

/// Represents the current phase of a playlist crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Fetching the playlist page and collecting the first page of items
    Seeding,

    /// Exchanging queued continuation tokens for further pages
    Draining,

    /// The queue is empty and every entry has been collected
    Done,
}

impl CrawlPhase {
    /// Returns true if the given transition is legal
    ///
    /// Phases only move forward: Seeding → Draining → Done.
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Seeding, Self::Draining) | (Self::Draining, Self::Done)
        )
    }

    /// Short lowercase name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seeding => "seeding",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
