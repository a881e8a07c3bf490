//! Embedded data extraction
//!
//! The playlist page ships two JSON blobs inside inline `<script>` blocks:
//! - the initial-state tree assigned to `ytInitialData`
//! - one or more `ytcfg.set({...})` calls, one of which carries the API key
//!   and the request context needed for continuation requests
//!
//! Extraction is a pure parse over the page text.

use crate::ExtractionError;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Key of the API key inside the site configuration object
pub const API_KEY_FIELD: &str = "INNERTUBE_API_KEY";

/// Key of the request context inside the site configuration object
pub const CONTEXT_FIELD: &str = "INNERTUBE_CONTEXT";

static INITIAL_DATA_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)ytInitialData"?\s*:\s*(\{.+?\})\s*;\s*$"#)
        .expect("initial data property pattern is valid")
});

static INITIAL_DATA_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var ytInitialData\s*=\s*(\{.+?\});")
        .expect("initial data variable pattern is valid")
});

static SITE_CONFIG_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)ytcfg\.set\((\{.+?\})\);").expect("site config pattern is valid")
});

/// Site configuration captured from the playlist page
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Key appended to every pagination request
    pub api_key: String,

    /// Request context, forwarded verbatim and never interpreted
    pub context: Value,
}

/// Everything the crawler needs from the playlist page
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedData {
    /// The parsed initial-state tree
    pub initial_data: Value,

    /// API key and request context
    pub site_config: SiteConfig,
}

type InitialDataMatcher = fn(&str) -> Option<Value>;

/// Tried in order against each script block; the first hit wins
const INITIAL_DATA_MATCHERS: [InitialDataMatcher; 2] =
    [match_initial_data_property, match_initial_data_variable];

/// Extracts both embedded blobs from a playlist page
///
/// # Example
///
/// ```
/// use playlist_ripple::crawler::extract_embedded_data;
///
/// let html = r#"<html><body>
/// <script>var ytInitialData = {"contents": {}};</script>
/// <script>ytcfg.set({"INNERTUBE_API_KEY": "key", "INNERTUBE_CONTEXT": {"client": {}}});</script>
/// </body></html>"#;
///
/// let data = extract_embedded_data(html).unwrap();
/// assert_eq!(data.site_config.api_key, "key");
/// ```
pub fn extract_embedded_data(html: &str) -> Result<EmbeddedData, ExtractionError> {
    let scripts = inline_scripts(html);

    let initial_data = initial_data_from_scripts(&scripts)?;
    let site_config = site_config_from_scripts(&scripts)?;

    Ok(EmbeddedData {
        initial_data,
        site_config,
    })
}

/// Extracts the initial-state tree from a playlist page
pub fn extract_initial_data(html: &str) -> Result<Value, ExtractionError> {
    initial_data_from_scripts(&inline_scripts(html))
}

/// Extracts the site configuration from a playlist page
pub fn extract_site_config(html: &str) -> Result<SiteConfig, ExtractionError> {
    site_config_from_scripts(&inline_scripts(html))
}

/// Collects the text of every inline script block in document order
fn inline_scripts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("script") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

fn initial_data_from_scripts(scripts: &[String]) -> Result<Value, ExtractionError> {
    INITIAL_DATA_MATCHERS
        .iter()
        .find_map(|matcher| scripts.iter().find_map(|script| matcher(script.as_str())))
        .ok_or(ExtractionError::InitialDataNotFound)
}

fn site_config_from_scripts(scripts: &[String]) -> Result<SiteConfig, ExtractionError> {
    scripts
        .iter()
        .flat_map(|script| SITE_CONFIG_CALL.captures_iter(script))
        .filter_map(|captures| parse_object(captures.get(1)?.as_str()))
        .find_map(site_config_from_object)
        .ok_or(ExtractionError::SiteConfigNotFound)
}

/// `"ytInitialData": {...};` closing out its script block
fn match_initial_data_property(script: &str) -> Option<Value> {
    let captured = INITIAL_DATA_PROPERTY.captures(script)?.get(1)?;
    parse_object(captured.as_str())
}

/// `var ytInitialData = {...};`
fn match_initial_data_variable(script: &str) -> Option<Value> {
    let captured = INITIAL_DATA_VARIABLE.captures(script)?.get(1)?;
    parse_object(captured.as_str())
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

fn site_config_from_object(object: Value) -> Option<SiteConfig> {
    let api_key = object.get(API_KEY_FIELD)?.as_str()?.to_string();
    let context = object
        .get(CONTEXT_FIELD)
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));

    Some(SiteConfig { api_key, context })
}
