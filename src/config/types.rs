use serde::Deserialize;

/// Desktop browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// English-preferred language header value
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Base of every constructed video URL
pub const DEFAULT_WATCH_BASE: &str = "https://www.youtube.com/watch";

/// Private pagination endpoint; the API key is appended as a query parameter
pub const DEFAULT_BROWSE_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/browse";

/// Main configuration structure for Playlist-Ripple
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Request identity and deadline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Per-request deadline in seconds, applied to every call
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment deadline in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_secs: 15,
            connect_timeout_secs: 10,
        }
    }
}

/// Upstream endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL that video URLs are built from
    #[serde(rename = "watch-base")]
    pub watch_base: String,

    /// Pagination endpoint that continuation tokens are posted to
    #[serde(rename = "browse-endpoint")]
    pub browse_endpoint: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            watch_base: DEFAULT_WATCH_BASE.to_string(),
            browse_endpoint: DEFAULT_BROWSE_ENDPOINT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file of crawled entries
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path to the generated SQL seed file
    #[serde(rename = "seed-sql-path")]
    pub seed_sql_path: String,

    /// Path to the JSON mirror of the seed records
    #[serde(rename = "seed-json-path")]
    pub seed_json_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "playlist.csv".to_string(),
            seed_sql_path: "seed.sql".to_string(),
            seed_json_path: "songs_parsed.json".to_string(),
        }
    }
}
