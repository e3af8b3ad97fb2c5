use std::fmt;

use log::debug;
use serde::Deserialize;
use url::Url;

use crate::{Track, youtube};

/// Exactly what the embedded player needs to start playback: nothing about
/// titles, timestamps or storage leaks through.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerParameters {
    pub video_id: String,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub auto_play: bool,
}

impl PlayerParameters {
    pub fn for_track(track: &Track, auto_play: bool) -> Self {
        Self {
            video_id: track.id.clone(),
            start_time: track.start_time,
            end_time: track.end_time,
            auto_play,
        }
    }

    /// Embed URL carrying the playback window. Seconds are whole numbers in
    /// the query string, so fractional times truncate.
    pub fn embed_url(&self) -> Url {
        let raw = format!("https://www.youtube.com/embed/{}", self.video_id);
        let mut url = Url::parse(&raw).unwrap(); // safe: id is 11 URL-safe chars

        let mut params: Vec<(&str, String)> = Vec::new();
        if self.auto_play {
            params.push(("autoplay", "1".to_string()));
        }
        if let Some(start) = self.start_time {
            params.push(("start", (start as u64).to_string()));
        }
        if let Some(end) = self.end_time {
            params.push(("end", (end as u64).to_string()));
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }
}

/// Where the player is at for a given video: still loading, ready with the
/// video's title, or failed with a reason.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlayerState {
    #[default]
    Loading,
    Ready {
        title: String,
    },
    Error(String),
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerState::Loading => write!(f, "loading"),
            PlayerState::Ready { title } => write!(f, "ready: {title}"),
            PlayerState::Error(message) => write!(f, "error: {message}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
}

/// Ask YouTube's oEmbed endpoint whether the video is playable. Any failure
/// lands in `PlayerState::Error` rather than an `Err`: an unplayable video is
/// a state the player reports, not a fault in the caller.
pub async fn probe(client: &reqwest::Client, video_id: &str) -> PlayerState {
    let video_url = youtube::share_url(video_id, None);
    debug!("Probing oEmbed for: {video_url}");

    let response = client
        .get("https://www.youtube.com/oembed")
        .query(&[("url", video_url.as_str()), ("format", "json")])
        .send()
        .await;

    match response {
        Ok(response) if response.status().is_success() => {
            match response.json::<OEmbedResponse>().await {
                Ok(body) => PlayerState::Ready {
                    title: body.title.unwrap_or_default(),
                },
                Err(e) => PlayerState::Error(format!("unreadable oEmbed response: {e}")),
            }
        }
        Ok(response) => PlayerState::Error(format!("oEmbed returned {}", response.status())),
        Err(e) => PlayerState::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::EndsIn;
    use crate::{TrackDraft, VideoReference};

    fn track(id: &str, start_time: Option<f64>, ends_in: EndsIn) -> Track {
        TrackDraft {
            reference: VideoReference {
                id: id.to_string(),
                start_time,
            },
            ends_in,
            title: "Test".to_string(),
        }
        .into_track()
        .unwrap()
    }

    #[test]
    fn test_embed_url_carries_full_window() {
        let params = PlayerParameters::for_track(&track("QowrW0Qj1og", Some(4.0), EndsIn::Seconds(20)), true);
        assert_eq!(
            params.embed_url().as_str(),
            "https://www.youtube.com/embed/QowrW0Qj1og?autoplay=1&start=4&end=24"
        );
    }

    #[test]
    fn test_embed_url_bare_when_nothing_set() {
        let params = PlayerParameters::for_track(&track("QowrW0Qj1og", None, EndsIn::Never), false);
        assert_eq!(params.embed_url().as_str(), "https://www.youtube.com/embed/QowrW0Qj1og");
    }

    #[test]
    fn test_embed_url_truncates_fractional_seconds() {
        let params = PlayerParameters::for_track(&track("QowrW0Qj1og", Some(42.9), EndsIn::Seconds(10)), false);
        assert_eq!(
            params.embed_url().as_str(),
            "https://www.youtube.com/embed/QowrW0Qj1og?start=42&end=52"
        );
    }

    #[test]
    fn test_for_track_copies_window() {
        let track = track("hRok6zPZKMA", Some(242.0), EndsIn::Seconds(20));
        let params = PlayerParameters::for_track(&track, true);
        assert_eq!(params.video_id, "hRok6zPZKMA");
        assert_eq!(params.start_time, Some(242.0));
        assert_eq!(params.end_time, Some(262.0));
        assert!(params.auto_play);
    }

    #[test]
    fn test_player_state_starts_loading() {
        assert_eq!(PlayerState::default(), PlayerState::Loading);
    }

    #[test]
    fn test_player_state_display() {
        assert_eq!(PlayerState::Loading.to_string(), "loading");
        assert_eq!(
            PlayerState::Ready {
                title: "Epic".to_string()
            }
            .to_string(),
            "ready: Epic"
        );
        assert_eq!(PlayerState::Error("video unavailable".to_string()).to_string(), "error: video unavailable");
    }
}
