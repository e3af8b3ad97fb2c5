use eyre::Result;

use crate::{Track, youtube};

/// Render tracks as a numbered plain-text listing (one track per line)
pub fn render_text(tracks: &[Track]) -> String {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            format!(
                "{:>2}. {}  [{}]  {}  {}",
                i + 1,
                track.title,
                track.id,
                window_label(track),
                youtube::share_url(&track.id, track.start_time),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render tracks as pretty-printed JSON
pub fn render_json(tracks: &[Track]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tracks)?)
}

/// Human label for a track's playback window
pub fn window_label(track: &Track) -> String {
    match (track.start_time, track.end_time) {
        (Some(start), Some(end)) => format!("{}-{}", fmt_secs(start), fmt_secs(end)),
        (Some(start), None) => format!("from {}", fmt_secs(start)),
        (None, Some(end)) => format!("until {}", fmt_secs(end)),
        (None, None) => "full video".to_string(),
    }
}

fn fmt_secs(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{}s", secs as u64)
    } else {
        format!("{secs}s")
    }
}
