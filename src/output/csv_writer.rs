//! CSV output of crawled entries
//!
//! The file is a two-column `title,url` table with a header row.

use crate::crawler::VideoEntry;
use crate::output::ensure_parent_dir;
use crate::OutputResult;
use serde::Deserialize;
use std::path::Path;

const HEADER: [&str; 2] = ["title", "url"];

/// A row as read back from disk; either column may be absent
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
}

/// Writes entries to a CSV file, creating any missing parent directory
///
/// The header row is written even when there are no entries.
pub fn write_csv(entries: &[VideoEntry], path: &Path) -> OutputResult<()> {
    ensure_parent_dir(path)?;

    // Header written by hand so an empty list still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(HEADER)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}

/// Reads entries back from a CSV file
///
/// Fields are trimmed. Rows missing either a title or a URL are skipped.
pub fn read_csv(path: &Path) -> OutputResult<Vec<VideoEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut entries = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        if row.title.is_empty() || row.url.is_empty() {
            continue;
        }
        entries.push(VideoEntry {
            title: row.title,
            url: row.url,
        });
    }

    Ok(entries)
}
