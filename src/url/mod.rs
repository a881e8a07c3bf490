//! URL handling module for Playlist-Ripple
//!
//! This module derives the playlist identifier from the input URL, builds the
//! watch URLs stored with each entry, and recovers video identifiers from
//! previously exported URLs.

mod playlist;
mod video;

// Re-export main functions
pub use playlist::extract_playlist_id;
pub use video::{build_watch_url, extract_video_id};
