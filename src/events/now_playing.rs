// Copyright (C) 2026  Playdeck Authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Display state for the player pane.
//!
//! Media backend notifications arrive asynchronously and may be sequenced in
//! any order relative to a track switch. Track metadata is therefore re-read
//! from the catalog at the active index whenever a notification arrives, and
//! progress fields are cleared at the moment a new load is issued rather than
//! when the backend later acknowledges it.

use crate::{
    model::{Catalog, Track},
    session::Session,
};

/// What the player pane currently shows: the active track's metadata and the
/// playback progress reported by the media source.
#[derive(Default)]
pub(crate) struct NowPlaying {
    pub(crate) track: Option<Track>,
    /// Duration of the current source in seconds, once known.
    pub(crate) duration: Option<f64>,
    /// Last reported playback position in seconds.
    pub(crate) time: Option<f64>,
    /// Progress through the track as a ratio in [0, 1].
    pub(crate) position: Option<f64>,
}

impl NowPlaying {
    /// A new load has been issued for the active track. The progress fields
    /// describe the outgoing source and are cleared here, so events for the
    /// incoming source are kept no matter how the backend orders them.
    pub(crate) fn begin_load(&mut self, catalog: &Catalog, session: &Session) {
        self.track = catalog.get(session.active_index).cloned();
        self.duration = None;
        self.time = None;
        self.position = None;
    }

    /// Metadata for the current source is ready. The track is read from the
    /// catalog at the active index *now*, not captured when the load was
    /// issued, so a late callback from a source we have already left behind
    /// can never surface stale metadata.
    pub(crate) fn metadata_loaded(&mut self, catalog: &Catalog, session: &Session) {
        self.track = catalog.get(session.active_index).cloned();
    }

    pub(crate) fn duration_changed(&mut self, duration: f64) {
        self.duration = Some(duration);
    }

    pub(crate) fn time_changed(&mut self, seconds: f64) {
        self.time = Some(seconds);
        self.position = self
            .duration
            .filter(|d| *d > 0.0)
            .map(|d| (seconds / d).clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            ["First", "Second", "Third"]
                .iter()
                .enumerate()
                .map(|(i, title)| Track {
                    title: (*title).to_string(),
                    artist: "Artist".to_string(),
                    source: format!("track-{}.mp3", i),
                    artwork: String::new(),
                    category: None,
                })
                .collect(),
        )
    }

    fn shown_title(pane: &NowPlaying) -> Option<&str> {
        pane.track.as_ref().map(|t| t.title.as_str())
    }

    #[test]
    fn late_metadata_callback_reads_the_active_track_fresh() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);
        let mut pane = NowPlaying::default();

        pane.begin_load(&catalog, &session);

        // Switch tracks before the backend has reported on the first load.
        session.active_index = 1;
        pane.begin_load(&catalog, &session);

        // A notification straggling in from the abandoned source must surface
        // the new track, not the one current when its load was issued.
        pane.metadata_loaded(&catalog, &session);

        assert_eq!(shown_title(&pane), Some("Second"));
    }

    #[test]
    fn duration_arriving_before_metadata_is_kept() {
        let catalog = catalog();
        let session = Session::new(0, 100);
        let mut pane = NowPlaying::default();

        pane.begin_load(&catalog, &session);

        // The backend may queue the duration change ahead of the loaded
        // notification within one drain.
        pane.duration_changed(120.0);
        pane.metadata_loaded(&catalog, &session);

        assert_eq!(pane.duration, Some(120.0));
    }

    #[test]
    fn switching_tracks_clears_the_previous_progress() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);
        let mut pane = NowPlaying::default();

        pane.begin_load(&catalog, &session);
        pane.duration_changed(180.0);
        pane.time_changed(90.0);

        session.active_index = 2;
        pane.begin_load(&catalog, &session);

        assert_eq!(shown_title(&pane), Some("Third"));
        assert_eq!(pane.duration, None);
        assert_eq!(pane.time, None);
        assert_eq!(pane.position, None);
    }

    #[test]
    fn progress_ratio_needs_a_known_duration() {
        let catalog = catalog();
        let session = Session::new(0, 100);
        let mut pane = NowPlaying::default();

        pane.begin_load(&catalog, &session);

        pane.time_changed(30.0);
        assert_eq!(pane.position, None);

        pane.duration_changed(120.0);
        pane.time_changed(30.0);
        assert_eq!(pane.position, Some(0.25));
    }
}
