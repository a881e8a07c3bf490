//! Item extraction for playlist pages
//!
//! The first page and every continuation page hand back the same kind of item
//! list. Each node is either a video, a continuation marker, or something the
//! crawler does not care about.

use crate::url::build_watch_url;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One video of the playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoEntry {
    /// Display title with all rich-text runs joined
    pub title: String,

    /// Watch URL carrying both the video and the playlist identifier
    pub url: String,
}

/// Opaque token exchangeable for the next batch of items
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokens run to hundreds of characters; a prefix is enough for logs
        let prefix: String = self.0.chars().take(16).collect();
        if prefix.len() < self.0.len() {
            write!(f, "{}…", prefix)
        } else {
            write!(f, "{}", prefix)
        }
    }
}

/// Result of splitting one item list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedItems {
    /// Videos in input order
    pub entries: Vec<VideoEntry>,

    /// Continuation tokens in input order
    pub tokens: Vec<ContinuationToken>,

    /// Video nodes dropped because they had no video identifier
    pub skipped: usize,
}

/// Shape of a single item node
enum ItemNode<'a> {
    Video(&'a Value),
    Continuation(&'a Value),
    Other,
}

impl<'a> ItemNode<'a> {
    fn classify(node: &'a Value) -> Self {
        if let Some(renderer) = present(node.get("playlistVideoRenderer")) {
            Self::Video(renderer)
        } else if let Some(renderer) = present(node.get("continuationItemRenderer")) {
            Self::Continuation(renderer)
        } else {
            Self::Other
        }
    }
}

type TokenMatcher = fn(&Value) -> Option<&str>;

/// Direct token shapes on a continuation endpoint; the first non-empty one wins
const DIRECT_TOKEN_MATCHERS: [TokenMatcher; 2] = [continuation_command_token, next_continuation_token];

/// Splits item nodes into video entries and continuation tokens
///
/// Video nodes without a `videoId` are skipped. A continuation node may yield
/// zero, one, or several tokens.
///
/// # Arguments
///
/// * `items` - Item nodes of one page
/// * `playlist_id` - Identifier stitched into every watch URL
/// * `watch_base` - Base of the watch URL
pub fn extract_items(items: &[Value], playlist_id: &str, watch_base: &str) -> ExtractedItems {
    let mut extracted = ExtractedItems::default();

    for node in items {
        match ItemNode::classify(node) {
            ItemNode::Video(renderer) => match video_entry(renderer, playlist_id, watch_base) {
                Some(entry) => extracted.entries.push(entry),
                None => {
                    tracing::debug!("Skipping playlist item without a video id");
                    extracted.skipped += 1;
                }
            },
            ItemNode::Continuation(renderer) => {
                if let Some(endpoint) = renderer.get("continuationEndpoint") {
                    extracted.tokens.extend(tokens_from_endpoint(endpoint));
                }
            }
            ItemNode::Other => {}
        }
    }

    extracted
}

/// Collects every continuation token reachable from an endpoint
///
/// The direct token comes first, followed by the token of each command of a
/// `commandExecutorCommand`, in command order.
pub fn tokens_from_endpoint(endpoint: &Value) -> Vec<ContinuationToken> {
    let direct = DIRECT_TOKEN_MATCHERS
        .iter()
        .find_map(|matcher| matcher(endpoint).filter(|t| !t.is_empty()));

    let commands = endpoint
        .get("commandExecutorCommand")
        .and_then(|e| e.get("commands"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    direct
        .into_iter()
        .chain(
            commands
                .iter()
                .filter_map(continuation_command_token)
                .filter(|t| !t.is_empty()),
        )
        .map(ContinuationToken::new)
        .collect()
}

/// Joins the title runs, falling back to the plain-text title
pub fn title_text(title: Option<&Value>) -> String {
    let Some(title) = title else {
        return String::new();
    };

    let text = match title.get("runs") {
        Some(runs) => runs
            .as_array()
            .map(|runs| {
                runs.iter()
                    .filter_map(|run| run.get("text").and_then(Value::as_str))
                    .collect::<String>()
            })
            .unwrap_or_default(),
        None => title
            .get("simpleText")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    };

    text.trim().to_string()
}

fn video_entry(renderer: &Value, playlist_id: &str, watch_base: &str) -> Option<VideoEntry> {
    let video_id = renderer
        .get("videoId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())?;

    Some(VideoEntry {
        title: title_text(renderer.get("title")),
        url: build_watch_url(watch_base, video_id, playlist_id),
    })
}

fn continuation_command_token(value: &Value) -> Option<&str> {
    value.get("continuationCommand")?.get("token")?.as_str()
}

fn next_continuation_token(value: &Value) -> Option<&str> {
    value.get("nextContinuationData")?.get("continuation")?.as_str()
}

/// Null and empty objects count as absent
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    })
}
