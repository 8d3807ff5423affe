//! YouTube URL parsing and thumbnail URL derivation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches an 11-character video id following `v=` or a path separator,
/// e.g. `watch?v=dQw4w9WgXcQ`, `youtu.be/dQw4w9WgXcQ`, `shorts/dQw4w9WgXcQ`.
static VIDEO_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").unwrap());

/// Extract the 11-character video id from an arbitrary URL-ish string.
///
/// Returns the first match, or `None` when the string contains no id.
/// Anything trailing the id (extra query parameters, timestamps) is ignored.
#[must_use]
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The thumbnail URL for a video id.
///
/// Always the maxresdefault template; thumbnail URLs are never stored in any
/// other form.
#[must_use]
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg")
}
