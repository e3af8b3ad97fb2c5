use regex::Regex;
use url::Url;

use crate::VideoReference;

/// Anchored patterns for the four accepted URL shapes. Each captures the
/// 11-character video identifier; non-whitespace content may trail it.
const SHAPE_PATTERNS: [&str; 4] = [
    r"^https?://(?:www\.)?youtube\.com/watch\?v=([A-Za-z0-9_-]{11})(?:\S+)?$",
    r"^https?://(?:www\.)?youtube\.com/embed/([A-Za-z0-9_-]{11})(?:\S+)?$",
    r"^https?://(?:www\.)?youtube\.com/v/([A-Za-z0-9_-]{11})(?:\S+)?$",
    r"^https?://(?:www\.)?youtu\.be/([A-Za-z0-9_-]{11})(?:\S+)?$",
];

/// Resolve a pasted string into a video reference.
///
/// `None` covers everything that is not one of the accepted YouTube URL
/// shapes — the ordinary "no video yet" state, not an error.
pub fn resolve(input: &str) -> Option<VideoReference> {
    let input = input.trim();
    let id = video_id(input)?;
    let start_time = Url::parse(input).ok().and_then(|url| start_time_param(&url));
    Some(VideoReference { id, start_time })
}

fn video_id(input: &str) -> Option<String> {
    for pattern in SHAPE_PATTERNS {
        if let Some(caps) = Regex::new(pattern).unwrap().captures(input) {
            return Some(caps[1].to_string());
        }
    }
    None
}

/// A `t` query parameter carrying plain seconds, checked on every shape.
/// Values that would violate the track invariant (negative or non-finite)
/// count as absent.
fn start_time_param(url: &Url) -> Option<f64> {
    url.query_pairs()
        .find(|(key, _)| key == "t")
        .and_then(|(_, value)| value.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
}

/// Canonical short URL for display and export: `https://youtu.be/<id>`, with
/// the start time truncated to whole seconds when present.
pub fn share_url(video_id: &str, start_time: Option<f64>) -> Url {
    let mut url = Url::parse(&format!("https://youtu.be/{video_id}")).unwrap(); // safe: id is 11 URL-safe chars
    if let Some(secs) = start_time {
        url.query_pairs_mut().append_pair("t", &(secs as u64).to_string());
    }
    url
}
