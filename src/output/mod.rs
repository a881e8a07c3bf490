//! Output module for crawl results
//!
//! This module handles:
//! - Writing crawled entries to CSV and reading them back
//! - Turning an entry list into SQL seed data with a JSON mirror
//! - Recording crawl statistics

mod csv_writer;
mod seed;
pub mod stats;

pub use csv_writer::{read_csv, write_csv};
pub use seed::{
    build_seed_records, export_seed, extract_display_name, format_seed_sql, sql_literal,
    write_seed_json, write_seed_sql, SeedRecord, SeedReport, SeedSet,
};
pub use stats::{print_statistics, CrawlStatistics};

use crate::OutputResult;
use std::path::Path;

/// Creates the parent directory of an output file if it is missing
pub(crate) fn ensure_parent_dir(path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
