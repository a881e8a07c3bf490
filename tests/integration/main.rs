//! Integration tests for Playlist-Ripple
//!
//! These tests run the crawler against wiremock servers standing in for the
//! playlist page and the pagination endpoint.

mod crawl_tests;
