use url::Url;

/// Builds the canonical watch URL for a playlist entry
///
/// # Examples
///
/// ```
/// use playlist_ripple::url::build_watch_url;
///
/// let url = build_watch_url("https://www.youtube.com/watch", "abc", "PL1");
/// assert_eq!(url, "https://www.youtube.com/watch?v=abc&list=PL1");
/// ```
pub fn build_watch_url(watch_base: &str, video_id: &str, playlist_id: &str) -> String {
    format!("{}?v={}&list={}", watch_base, video_id, playlist_id)
}

/// Recovers the video identifier from a watch URL or a short link
///
/// Two host shapes are understood: `www.youtube.com` / `youtube.com` carry the
/// identifier in the `v` query parameter, `youtu.be` carries it as the first
/// path segment (anything after it is ignored). Anything else yields `None`.
pub fn extract_video_id(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;

    let id = match url.host_str()? {
        "www.youtube.com" | "youtube.com" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned()),
        "youtu.be" => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        _ => None,
    };

    id.filter(|id| !id.is_empty())
}
