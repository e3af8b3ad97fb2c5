pub mod clip;
pub mod config;
pub mod output;
pub mod player;
pub mod store;
pub mod thumbnail;
pub mod youtube;

use chrono::{DateTime, Utc};
use eyre::{Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::clip::EndsIn;

/// A persisted clip definition: a video plus an optional playback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// 11-character YouTube video identifier
    pub id: String,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub thumbnail_url: Option<Url>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Transient result of URL resolution; feeds the window calculator and
/// thumbnail construction, never persisted directly
#[derive(Debug, Clone, PartialEq)]
pub struct VideoReference {
    pub id: String,
    pub start_time: Option<f64>,
}

/// Everything needed to build or rebuild a track: a resolved reference, a
/// duration choice, and a title
#[derive(Debug, Clone)]
pub struct TrackDraft {
    pub reference: VideoReference,
    pub ends_in: EndsIn,
    pub title: String,
}

impl TrackDraft {
    /// Run the window calculator and produce a new track.
    ///
    /// The title is trimmed and must not end up empty; everything else is
    /// consistent by construction.
    pub fn into_track(self) -> Result<Track> {
        let title = normalized_title(&self.title)?;
        let end_time = clip::compute_end(self.reference.start_time, self.ends_in.as_secs());
        let thumbnail_url = thumbnail::url(&self.reference.id);
        let now = Utc::now();

        Ok(Track {
            id: self.reference.id,
            start_time: self.reference.start_time,
            end_time,
            thumbnail_url: Some(thumbnail_url),
            title,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Track {
    /// The current video reference, for re-running the pipeline on edit.
    pub fn reference(&self) -> VideoReference {
        VideoReference {
            id: self.id.clone(),
            start_time: self.start_time,
        }
    }

    /// The duration choice the stored window corresponds to.
    pub fn ends_in(&self) -> EndsIn {
        match self.end_time {
            Some(end) => EndsIn::Seconds((end - self.start_time.unwrap_or(0.0)).round() as u32),
            None => EndsIn::Never,
        }
    }

    /// Replace identifier, start and end together from a fresh
    /// resolver+calculator run. A new identifier invalidates any previously
    /// computed end time, so the three never change individually. The title
    /// updates alongside; creation time is preserved.
    pub fn apply_draft(&mut self, draft: TrackDraft) -> Result<()> {
        let rebuilt = draft.into_track()?;
        self.id = rebuilt.id;
        self.start_time = rebuilt.start_time;
        self.end_time = rebuilt.end_time;
        self.thumbnail_url = rebuilt.thumbnail_url;
        self.title = rebuilt.title;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn normalized_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        bail!("title must not be empty");
    }
    Ok(title.to_string())
}

/// The sample tracks offered when the library is empty.
pub fn recommended_tracks() -> Vec<Track> {
    [
        ("QowrW0Qj1og", 4.0, 24.0, "Sad Truth Revealed"),
        ("hRok6zPZKMA", 242.0, 262.0, "Epic"),
        ("HsmI_WrAxs8", 2.0, 7.0, "Lelolelolelo"),
    ]
    .into_iter()
    .map(|(id, start, end, title)| {
        let now = Utc::now();
        Track {
            id: id.to_string(),
            start_time: Some(start),
            end_time: Some(end),
            thumbnail_url: Some(thumbnail::url(id)),
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: &str, start_time: Option<f64>, ends_in: EndsIn, title: &str) -> TrackDraft {
        TrackDraft {
            reference: VideoReference {
                id: id.to_string(),
                start_time,
            },
            ends_in,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_draft_builds_track() {
        let track = draft("QowrW0Qj1og", Some(4.0), EndsIn::Seconds(20), "  Sad Truth Revealed  ")
            .into_track()
            .unwrap();
        assert_eq!(track.id, "QowrW0Qj1og");
        assert_eq!(track.start_time, Some(4.0));
        assert_eq!(track.end_time, Some(24.0));
        assert_eq!(track.title, "Sad Truth Revealed");
        assert_eq!(
            track.thumbnail_url.unwrap().as_str(),
            "https://img.youtube.com/vi/QowrW0Qj1og/sddefault.jpg"
        );
    }

    #[test]
    fn test_draft_rejects_blank_title() {
        assert!(draft("QowrW0Qj1og", None, EndsIn::Never, "   ").into_track().is_err());
        assert!(draft("QowrW0Qj1og", None, EndsIn::Never, "").into_track().is_err());
    }

    #[test]
    fn test_unbounded_draft_has_no_end() {
        let track = draft("HsmI_WrAxs8", None, EndsIn::Never, "Lelolelolelo")
            .into_track()
            .unwrap();
        assert_eq!(track.start_time, None);
        assert_eq!(track.end_time, None);
    }

    #[test]
    fn test_end_counts_from_zero_without_start() {
        let track = draft("HsmI_WrAxs8", None, EndsIn::Seconds(10), "Lelolelolelo")
            .into_track()
            .unwrap();
        assert_eq!(track.end_time, Some(10.0));
    }

    #[test]
    fn test_ends_in_derived_from_window() {
        let bounded = draft("QowrW0Qj1og", Some(4.0), EndsIn::Seconds(20), "Sad")
            .into_track()
            .unwrap();
        assert_eq!(bounded.ends_in(), EndsIn::Seconds(20));

        let unbounded = draft("QowrW0Qj1og", Some(4.0), EndsIn::Never, "Sad")
            .into_track()
            .unwrap();
        assert_eq!(unbounded.ends_in(), EndsIn::Never);
    }

    #[test]
    fn test_apply_draft_replaces_window_as_a_unit() {
        let mut track = draft("QowrW0Qj1og", Some(4.0), EndsIn::Seconds(20), "Sad")
            .into_track()
            .unwrap();
        let created = track.created_at;

        // Same duration choice, new video with a different start: the end
        // must be recomputed against the new start, never carried over.
        let kept_choice = track.ends_in();
        track
            .apply_draft(draft("hRok6zPZKMA", Some(100.0), kept_choice, "Epic"))
            .unwrap();

        assert_eq!(track.id, "hRok6zPZKMA");
        assert_eq!(track.start_time, Some(100.0));
        assert_eq!(track.end_time, Some(120.0));
        assert_eq!(track.title, "Epic");
        assert_eq!(track.created_at, created);
        assert_eq!(
            track.thumbnail_url.unwrap().as_str(),
            "https://img.youtube.com/vi/hRok6zPZKMA/sddefault.jpg"
        );
    }

    #[test]
    fn test_apply_draft_rejects_blank_title() {
        let mut track = draft("QowrW0Qj1og", Some(4.0), EndsIn::Seconds(20), "Sad")
            .into_track()
            .unwrap();
        assert!(track.apply_draft(draft("hRok6zPZKMA", None, EndsIn::Never, " ")).is_err());
        // The failed edit must not have touched the record.
        assert_eq!(track.id, "QowrW0Qj1og");
        assert_eq!(track.title, "Sad");
    }

    #[test]
    fn test_reference_round_trip() {
        let track = draft("QowrW0Qj1og", Some(4.0), EndsIn::Seconds(20), "Sad")
            .into_track()
            .unwrap();
        let reference = track.reference();
        assert_eq!(reference.id, "QowrW0Qj1og");
        assert_eq!(reference.start_time, Some(4.0));
    }

    #[test]
    fn test_recommended_tracks_are_well_formed() {
        let tracks = recommended_tracks();
        assert_eq!(tracks.len(), 3);
        for track in &tracks {
            assert_eq!(track.id.len(), 11);
            assert!(!track.title.is_empty());
            assert!(track.thumbnail_url.is_some());
            let start = track.start_time.unwrap();
            let end = track.end_time.unwrap();
            assert!(start < end);
        }
    }
}
