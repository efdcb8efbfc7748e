//! Embed URL transform.
//!
//! Recognizes YouTube-shaped URLs and maps them to their canonical
//! embeddable form. Pure string-to-string, no side effects; link URLs are
//! annotated with the result at read time.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anchored at the start: optional scheme and `www.`, a YouTube host,
/// an optional path form (`watch?v=`, `embed/`, `v/`, or anything ending
/// in `?v=`), then an 11-character video id.
static YOUTUBE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?(?:youtube|youtu|youtube-nocookie)\.(?:com|be)/(?:watch\?v=|embed/|v/|.+\?v=)?([^&=%?]{11})",
    )
    .expect("invalid YouTube regex")
});

/// Map a YouTube-shaped URL to its embeddable form, or `None` if the
/// string does not look like a YouTube video URL.
pub fn youtube_embed_url(url: &str) -> Option<String> {
    YOUTUBE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| format!("https://www.youtube.com/embed/{}", id.as_str()))
}
