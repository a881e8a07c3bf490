//! Configuration module for Playlist-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a built-in default, so a crawl can run without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use playlist_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ripple.toml")).unwrap();
//! println!("Request timeout: {}s", config.http.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, EndpointConfig, HttpConfig, OutputConfig, DEFAULT_ACCEPT_LANGUAGE,
    DEFAULT_BROWSE_ENDPOINT, DEFAULT_USER_AGENT, DEFAULT_WATCH_BASE,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
