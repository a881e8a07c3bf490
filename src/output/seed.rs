//! SQL seed export
//!
//! Turns a crawled entry list into insert statements for a `songs` table,
//! plus a JSON mirror of the same records for previewing.

use crate::crawler::VideoEntry;
use crate::output::{ensure_parent_dir, read_csv};
use crate::url::extract_video_id;
use crate::OutputResult;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

static BRACKETED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【(.+?)】").expect("bracketed name pattern is valid"));

/// One row of seed data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedRecord {
    pub title_zh: String,
    pub youtube_video_id: String,
    pub start_sec: u32,
    pub difficulty: u8,
    pub is_active: bool,
}

impl SeedRecord {
    fn new(title_zh: String, youtube_video_id: String) -> Self {
        Self {
            title_zh,
            youtube_video_id,
            start_sec: 0,
            difficulty: 1,
            is_active: true,
        }
    }
}

/// Records derived from an entry list, with what was dropped along the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSet {
    /// Unique records, first occurrence of each video id kept
    pub records: Vec<SeedRecord>,

    /// URLs no video id could be derived from
    pub unresolved_urls: Vec<String>,

    /// Video ids that appeared more than once
    pub duplicate_ids: Vec<String>,
}

/// Summary of a completed seed export
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    pub rows_read: usize,
    pub records_written: usize,
    pub unresolved: usize,
    pub duplicates: usize,
}

/// Extracts the display name from a raw video title
///
/// The text inside the first `【…】` marker is taken and cut at its first
/// whitespace. Titles without a marker are returned unchanged.
///
/// # Examples
///
/// ```
/// use playlist_ripple::output::extract_display_name;
///
/// assert_eq!(extract_display_name("周杰倫 Jay Chou【晴天 Sunny Day】Official MV"), "晴天");
/// assert_eq!(extract_display_name("No marker"), "No marker");
/// ```
pub fn extract_display_name(raw_title: &str) -> String {
    BRACKETED_NAME
        .captures(raw_title)
        .and_then(|captures| captures.get(1))
        .and_then(|inner| inner.as_str().split_whitespace().next())
        .unwrap_or(raw_title)
        .to_string()
}

/// Makes a title safe inside a single-quoted SQL string literal
///
/// Double quotes are dropped and single quotes are doubled.
pub fn sql_literal(text: &str) -> String {
    text.replace('"', "").replace('\'', "''")
}

/// Derives seed records from entries, deduplicating by video id
///
/// Names are kept unescaped; quoting is applied only by [`format_seed_sql`],
/// so the JSON mirror holds the plain name rather than the SQL-escaped one.
pub fn build_seed_records(entries: &[VideoEntry]) -> SeedSet {
    let mut set = SeedSet::default();
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for entry in entries {
        let Some(video_id) = extract_video_id(&entry.url) else {
            tracing::warn!("Could not extract a video id from {}", entry.url);
            set.unresolved_urls.push(entry.url.clone());
            continue;
        };

        if !seen.insert(video_id.clone()) {
            if reported.insert(video_id.clone()) {
                set.duplicate_ids.push(video_id);
            }
            continue;
        }

        let name = extract_display_name(entry.title.trim());
        set.records.push(SeedRecord::new(name, video_id));
    }

    if !set.duplicate_ids.is_empty() {
        tracing::warn!(
            "Dropped duplicate video ids: {}",
            set.duplicate_ids.join(", ")
        );
    }

    set
}

/// Formats records as a SQL seed script
pub fn format_seed_sql(records: &[SeedRecord], generated_on: NaiveDate) -> String {
    let mut sql = String::new();

    sql.push_str("-- Playlist song seed data\n");
    sql.push_str(&format!("-- Generated: {}\n", generated_on.format("%Y-%m-%d")));
    sql.push_str(&format!("-- Total songs: {}\n", records.len()));
    sql.push('\n');
    sql.push_str("-- Clear existing data (optional)\n");
    sql.push_str("-- TRUNCATE TABLE songs RESTART IDENTITY CASCADE;\n");

    if records.is_empty() {
        return sql;
    }

    sql.push('\n');
    sql.push_str(
        "INSERT INTO songs (title_zh, youtube_video_id, start_sec, difficulty, is_active)\nVALUES\n",
    );

    let values: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "  ('{}', '{}', {}, {}, {})",
                sql_literal(&r.title_zh),
                sql_literal(&r.youtube_video_id),
                r.start_sec,
                r.difficulty,
                r.is_active
            )
        })
        .collect();
    sql.push_str(&values.join(",\n"));
    sql.push_str(";\n");

    sql
}

/// Writes the SQL seed script
pub fn write_seed_sql(
    records: &[SeedRecord],
    generated_on: NaiveDate,
    path: &Path,
) -> OutputResult<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path)?;
    file.write_all(format_seed_sql(records, generated_on).as_bytes())?;
    Ok(())
}

/// Writes the JSON mirror of the seed records
pub fn write_seed_json(records: &[SeedRecord], path: &Path) -> OutputResult<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, records)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Reads a crawl CSV and writes both the SQL seed script and its JSON mirror
pub fn export_seed(csv_path: &Path, sql_path: &Path, json_path: &Path) -> OutputResult<SeedReport> {
    let entries = read_csv(csv_path)?;
    tracing::info!("Read {} rows from {}", entries.len(), csv_path.display());

    let set = build_seed_records(&entries);
    let today = chrono::Local::now().date_naive();

    write_seed_sql(&set.records, today, sql_path)?;
    write_seed_json(&set.records, json_path)?;
    tracing::info!(
        "Wrote {} records to {} and {}",
        set.records.len(),
        sql_path.display(),
        json_path.display()
    );

    Ok(SeedReport {
        rows_read: entries.len(),
        records_written: set.records.len(),
        unresolved: set.unresolved_urls.len(),
        duplicates: set.duplicate_ids.len(),
    })
}
