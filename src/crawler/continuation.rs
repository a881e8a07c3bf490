//! Continuation fetching
//!
//! Each continuation token is posted to the pagination endpoint together with
//! the request context captured from the playlist page. The response wraps the
//! next batch of item nodes in a list of actions.

use crate::crawler::embedded::SiteConfig;
use crate::crawler::fetcher::{classify_transport_error, ensure_success};
use crate::crawler::items::ContinuationToken;
use crate::RippleError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Top-level keys holding the list of response actions, in lookup order
const ACTION_LIST_KEYS: [&str; 2] = ["onResponseReceivedActions", "onResponseReceivedEndpoints"];

/// Action shapes that carry appended items, in lookup order
const APPEND_ACTION_KEYS: [&str; 2] = [
    "appendContinuationItemsAction",
    "reloadContinuationItemsCommand",
];

/// Body of a pagination request
#[derive(Debug, Serialize)]
struct ContinuationRequest<'a> {
    context: &'a Value,
    continuation: &'a str,
}

/// Exchanges a continuation token for the next batch of item nodes
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `browse_endpoint` - Pagination endpoint; the API key is added as `key`
/// * `token` - The token to exchange
/// * `site_config` - API key and request context from the playlist page
///
/// # Errors
///
/// `RippleError::Transport` on a non-success status or a body that is not JSON.
pub async fn fetch_continuation(
    client: &Client,
    browse_endpoint: &str,
    token: &ContinuationToken,
    site_config: &SiteConfig,
) -> Result<Vec<Value>, RippleError> {
    let mut url = Url::parse(browse_endpoint)?;
    url.query_pairs_mut().append_pair("key", &site_config.api_key);

    let body = ContinuationRequest {
        context: &site_config.context,
        continuation: token.as_str(),
    };

    tracing::debug!("POST {} (token {})", browse_endpoint, token);

    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| classify_transport_error(browse_endpoint, e))?;

    let response = ensure_success(browse_endpoint, response)?;

    let payload: Value = response
        .json()
        .await
        .map_err(|e| RippleError::Transport {
            url: browse_endpoint.to_string(),
            message: format!("Malformed JSON response: {}", e),
        })?;

    Ok(continuation_items(payload))
}

/// Pulls the appended item nodes out of a pagination response
///
/// Actions carrying none of the known append shapes contribute nothing.
pub fn continuation_items(mut payload: Value) -> Vec<Value> {
    let Some(actions) = ACTION_LIST_KEYS
        .iter()
        .find_map(|key| non_empty_array(payload.get_mut(*key)))
    else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for mut action in actions {
        let appended = APPEND_ACTION_KEYS.iter().find_map(|key| {
            action
                .get_mut(*key)
                .filter(|a| a.as_object().is_some_and(|o| !o.is_empty()))
                .map(Value::take)
        });

        if let Some(Value::Array(batch)) = appended.and_then(|mut a| {
            a.get_mut("continuationItems").map(Value::take)
        }) {
            items.extend(batch);
        }
    }

    items
}

fn non_empty_array(value: Option<&mut Value>) -> Option<Vec<Value>> {
    match value {
        Some(Value::Array(array)) if !array.is_empty() => Some(std::mem::take(array)),
        _ => None,
    }
}
