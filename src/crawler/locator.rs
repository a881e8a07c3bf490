//! Renderer lookup inside the initial-state tree
//!
//! The first page of playlist items sits several levels down:
//!
//! ```text
//! contents
//!   twoColumnBrowseResultsRenderer
//!     tabs[]
//!       tabRenderer.content.sectionListRenderer.contents[]
//!         itemSectionRenderer.contents[]
//!           playlistVideoListRenderer
//! ```
//!
//! A missing key on one branch only rules out that branch.

use crate::ExtractionError;
use serde_json::Value;

/// Key of the renderer that lists the playlist's videos
pub const PLAYLIST_RENDERER_KEY: &str = "playlistVideoListRenderer";

/// Finds the first playlist video list renderer in document order
///
/// Tabs are scanned before sections, sections before items.
///
/// # Errors
///
/// `ExtractionError::RendererNotFound` when no branch yields a renderer.
pub fn locate_renderer(initial_data: &Value) -> Result<&Value, ExtractionError> {
    tabs(initial_data)
        .iter()
        .flat_map(|tab| sections(tab).iter())
        .flat_map(|section| section_items(section).iter())
        .find_map(|item| item.get(PLAYLIST_RENDERER_KEY).filter(|r| is_present(r)))
        .ok_or(ExtractionError::RendererNotFound)
}

/// Item nodes of the first page, or an empty slice if the renderer has none
pub fn renderer_items(renderer: &Value) -> &[Value] {
    as_slice(renderer.get("contents"))
}

fn tabs(initial_data: &Value) -> &[Value] {
    as_slice(
        initial_data
            .get("contents")
            .and_then(|c| c.get("twoColumnBrowseResultsRenderer"))
            .and_then(|r| r.get("tabs")),
    )
}

fn sections(tab: &Value) -> &[Value] {
    as_slice(
        tab.get("tabRenderer")
            .and_then(|t| t.get("content"))
            .and_then(|c| c.get("sectionListRenderer"))
            .and_then(|s| s.get("contents")),
    )
}

fn section_items(section: &Value) -> &[Value] {
    as_slice(
        section
            .get("itemSectionRenderer")
            .and_then(|s| s.get("contents")),
    )
}

fn as_slice(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Null and empty objects count as absent
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}
