use crate::RippleError;
use url::Url;

/// Path prefix that carries the playlist identifier as its next segment
const PLAYLIST_PATH_PREFIX: &str = "/playlist/";

/// Extracts the playlist identifier from a playlist URL
///
/// The `list` query parameter is preferred. Otherwise the path segment that
/// directly follows a literal `/playlist/` prefix is used.
///
/// # Arguments
///
/// * `input` - The playlist URL as given by the user
///
/// # Returns
///
/// * `Ok(String)` - The playlist identifier
/// * `Err(RippleError::InvalidInput)` - The URL is malformed or carries no identifier
///
/// # Examples
///
/// ```
/// use playlist_ripple::url::extract_playlist_id;
///
/// let id = extract_playlist_id("https://x.test/playlist?list=PL123").unwrap();
/// assert_eq!(id, "PL123");
///
/// let id = extract_playlist_id("https://x.test/playlist/PL123/").unwrap();
/// assert_eq!(id, "PL123");
/// ```
pub fn extract_playlist_id(input: &str) -> Result<String, RippleError> {
    let url = Url::parse(input.trim())
        .map_err(|e| RippleError::InvalidInput(format!("'{}' is not a valid URL: {}", input, e)))?;

    if let Some(id) = url
        .query_pairs()
        .find(|(key, value)| key == "list" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
    {
        return Ok(id);
    }

    url.path()
        .strip_prefix(PLAYLIST_PATH_PREFIX)
        .and_then(|rest| rest.split('/').next())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            RippleError::InvalidInput(format!(
                "The provided URL does not contain a playlist id: {}",
                input
            ))
        })
}
