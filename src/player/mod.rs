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

//! Playback control and state management.
//!
//! This module provides the [`PlaybackController`], the single owner of the
//! "current track" pointer. It keeps the media source synchronised with the
//! active catalog index and exposes the playback transitions the UI binds
//! keys to.
//!
//! # State machine
//!
//! Per session the player moves through three states: `Idle` before the
//! first load, then `Paused`/`Playing`. The first load of a session stays
//! paused; once playback has been initiated, every subsequent load
//! auto-resumes on the new source.

mod media;

use anyhow::{Context, Result};

pub(crate) use media::{MediaError, MediaEvent, MediaSource, MpvSource};

use crate::{
    model::Catalog,
    session::{Session, SessionStore},
};

/// Represents the current playback status of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Idle,
    Paused,
    Playing,
}

/// Owns the active track pointer and drives the media source.
///
/// All playback-related session fields are mutated exclusively through this
/// controller; the playlist view only reads them.
pub(crate) struct PlaybackController {
    media: Box<dyn MediaSource>,
    state: PlayerState,
    /// Whether playback has ever been initiated this session. Loads before
    /// that point stay paused, loads after it auto-resume.
    playback_started: bool,
    repeat: bool,
}

impl PlaybackController {
    pub(crate) fn new(media: Box<dyn MediaSource>) -> Self {
        Self {
            media,
            state: PlayerState::Idle,
            playback_started: false,
            repeat: false,
        }
    }

    pub(crate) fn state(&self) -> PlayerState {
        self.state
    }

    pub(crate) fn repeat(&self) -> bool {
        self.repeat
    }

    pub(crate) fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    /// Points the media source at the active catalog entry and reloads it.
    ///
    /// If playback has already been initiated this session the new source
    /// resumes playing immediately, otherwise it is left paused. The active
    /// index is persisted write-through on every track start.
    pub(crate) fn load_active(
        &mut self,
        catalog: &Catalog,
        session: &mut Session,
        store: &mut dyn SessionStore,
    ) -> Result<()> {
        let track = catalog
            .get(session.active_index)
            .context("active index out of catalog range")?;

        self.media.set_source(&track.source);
        self.media.load()?;

        if self.playback_started {
            self.media.play()?;
            session.is_playing = true;
            self.state = PlayerState::Playing;
        } else {
            session.is_playing = false;
            self.state = PlayerState::Paused;
        }

        store.save_track_index(session.active_index);

        Ok(())
    }

    /// Toggles between paused and playing.
    ///
    /// The decision is based on the media source's authoritative paused flag,
    /// never on the cached session state, so the two cannot drift.
    pub(crate) fn play_pause(&mut self, session: &mut Session) -> Result<()> {
        if self.media.paused() {
            self.media.play()?;
            self.playback_started = true;
            session.is_playing = true;
            self.state = PlayerState::Playing;
        } else {
            self.media.pause()?;
            session.is_playing = false;
            self.state = PlayerState::Paused;
        }

        Ok(())
    }

    /// Activates the catalog entry at `index`.
    ///
    /// Re-activating the already-active entry degrades to a play/pause toggle
    /// in place, without reloading the source. `index` must be a valid
    /// catalog index; the UI only ever passes indices of rendered rows.
    pub(crate) fn play_by_index(
        &mut self,
        index: usize,
        catalog: &Catalog,
        session: &mut Session,
        store: &mut dyn SessionStore,
    ) -> Result<()> {
        if index == session.active_index {
            return self.play_pause(session);
        }

        // Explicitly choosing a track counts as initiating playback.
        self.playback_started = true;
        session.active_index = index;
        self.load_active(catalog, session, store)
    }

    /// Advances to the next track, wrapping at the end of the catalog.
    pub(crate) fn next(
        &mut self,
        catalog: &Catalog,
        session: &mut Session,
        store: &mut dyn SessionStore,
    ) -> Result<()> {
        session.active_index = (session.active_index + 1) % catalog.len();
        self.load_active(catalog, session, store)
    }

    /// Steps back to the previous track, wrapping at the start of the
    /// catalog.
    pub(crate) fn previous(
        &mut self,
        catalog: &Catalog,
        session: &mut Session,
        store: &mut dyn SessionStore,
    ) -> Result<()> {
        session.active_index = (session.active_index + catalog.len() - 1) % catalog.len();
        self.load_active(catalog, session, store)
    }

    /// Seeks to a percentage of the current track's duration.
    ///
    /// A no-op while the duration is unknown; a non-finite position is never
    /// handed to the backend.
    pub(crate) fn seek_to(&mut self, percent: u8) -> Result<()> {
        let percent = percent.min(100);

        if let Some(duration) = self.media.duration() {
            self.media
                .set_position(f64::from(percent) / 100.0 * duration)?;
        }

        Ok(())
    }

    /// Sets the volume level, clamped to 0-100, and persists it
    /// write-through.
    pub(crate) fn set_volume(
        &mut self,
        level: i32,
        session: &mut Session,
        store: &mut dyn SessionStore,
    ) -> Result<()> {
        let level = level.clamp(0, 100) as u8;

        self.media.set_volume(f64::from(level) / 100.0)?;
        session.volume = level;
        store.save_volume(level);

        Ok(())
    }

    /// Handles the natural end of the current track: restart it when the
    /// repeat flag is set, advance to the next track otherwise.
    pub(crate) fn on_ended(
        &mut self,
        catalog: &Catalog,
        session: &mut Session,
        store: &mut dyn SessionStore,
    ) -> Result<()> {
        if self.repeat {
            self.media.set_position(0.0)?;
            self.media.play()?;
            session.is_playing = true;
            self.state = PlayerState::Playing;
            return Ok(());
        }

        self.next(catalog, session, store)
    }

    /// Authoritative playback position in seconds, read from the media
    /// source rather than from any cached event.
    pub(crate) fn position(&self) -> Option<f64> {
        self.media.position()
    }

    /// Drains pending media source events for dispatch through the
    /// application event loop.
    pub(crate) fn poll_media(&mut self) -> Vec<MediaEvent> {
        self.media.poll_events()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{model::Track, session::SavedSession};

    struct MediaLog {
        loads: Vec<String>,
        paused: bool,
        duration: Option<f64>,
        position: Option<f64>,
        volume: Option<f64>,
    }

    struct MockMedia {
        log: Rc<RefCell<MediaLog>>,
        source: Option<String>,
    }

    impl MediaSource for MockMedia {
        fn set_source(&mut self, uri: &str) {
            self.source = Some(uri.to_string());
        }

        fn load(&mut self) -> Result<(), MediaError> {
            let source = self.source.clone().ok_or(MediaError::NoSource)?;
            let mut log = self.log.borrow_mut();
            log.loads.push(source);
            log.paused = true;
            Ok(())
        }

        fn play(&mut self) -> Result<(), MediaError> {
            self.log.borrow_mut().paused = false;
            Ok(())
        }

        fn pause(&mut self) -> Result<(), MediaError> {
            self.log.borrow_mut().paused = true;
            Ok(())
        }

        fn paused(&self) -> bool {
            self.log.borrow().paused
        }

        fn position(&self) -> Option<f64> {
            self.log.borrow().position
        }

        fn set_position(&mut self, seconds: f64) -> Result<(), MediaError> {
            self.log.borrow_mut().position = Some(seconds);
            Ok(())
        }

        fn duration(&self) -> Option<f64> {
            self.log.borrow().duration
        }

        fn set_volume(&mut self, level: f64) -> Result<(), MediaError> {
            self.log.borrow_mut().volume = Some(level);
            Ok(())
        }

        fn poll_events(&mut self) -> Vec<MediaEvent> {
            vec![]
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        track_index: Option<usize>,
        volume: Option<u8>,
    }

    impl SessionStore for MemoryStore {
        fn load(&self) -> SavedSession {
            SavedSession::default()
        }

        fn save_track_index(&mut self, index: usize) {
            self.track_index = Some(index);
        }

        fn save_volume(&mut self, volume: u8) {
            self.volume = Some(volume);
        }
    }

    fn catalog_of(n: usize) -> Catalog {
        Catalog::new(
            (0..n)
                .map(|i| Track {
                    title: format!("Track {}", i + 1),
                    artist: "Artist".to_string(),
                    source: format!("track-{}.mp3", i),
                    artwork: String::new(),
                    category: None,
                })
                .collect(),
        )
    }

    fn fixture(
        n: usize,
    ) -> (
        PlaybackController,
        Catalog,
        Session,
        MemoryStore,
        Rc<RefCell<MediaLog>>,
    ) {
        let log = Rc::new(RefCell::new(MediaLog {
            loads: vec![],
            paused: true,
            duration: None,
            position: None,
            volume: None,
        }));
        let media = MockMedia {
            log: Rc::clone(&log),
            source: None,
        };
        let controller = PlaybackController::new(Box::new(media));

        (
            controller,
            catalog_of(n),
            Session::new(0, 100),
            MemoryStore::default(),
            log,
        )
    }

    #[test]
    fn next_applied_catalog_length_times_returns_to_start() {
        for n in [1, 2, 3, 5] {
            let (mut controller, catalog, mut session, mut store, _log) = fixture(n);

            for _ in 0..n {
                controller.next(&catalog, &mut session, &mut store).unwrap();
                assert!(session.active_index < n);
            }

            assert_eq!(session.active_index, 0, "cycle failed for n = {}", n);
        }
    }

    #[test]
    fn previous_applied_catalog_length_times_returns_to_start() {
        for n in [1, 2, 3, 5] {
            let (mut controller, catalog, mut session, mut store, _log) = fixture(n);

            for _ in 0..n {
                controller
                    .previous(&catalog, &mut session, &mut store)
                    .unwrap();
                assert!(session.active_index < n);
            }

            assert_eq!(session.active_index, 0, "cycle failed for n = {}", n);
        }
    }

    #[test]
    fn previous_wraps_backwards_from_the_start() {
        let (mut controller, catalog, mut session, mut store, _log) = fixture(3);

        controller
            .previous(&catalog, &mut session, &mut store)
            .unwrap();

        assert_eq!(session.active_index, 2);
    }

    #[test]
    fn next_wraps_after_the_last_track() {
        let (mut controller, catalog, mut session, mut store, _log) = fixture(3);

        controller.next(&catalog, &mut session, &mut store).unwrap();
        controller.next(&catalog, &mut session, &mut store).unwrap();
        assert_eq!(session.active_index, 2);

        controller.next(&catalog, &mut session, &mut store).unwrap();
        assert_eq!(session.active_index, 0);
    }

    #[test]
    fn first_load_stays_paused() {
        let (mut controller, catalog, mut session, mut store, log) = fixture(3);

        controller
            .load_active(&catalog, &mut session, &mut store)
            .unwrap();

        assert!(!session.is_playing);
        assert!(log.borrow().paused);
        assert_eq!(controller.state(), PlayerState::Paused);
        assert_eq!(log.borrow().loads, vec!["track-0.mp3"]);
    }

    #[test]
    fn loads_auto_resume_once_playback_was_initiated() {
        let (mut controller, catalog, mut session, mut store, log) = fixture(3);

        controller
            .load_active(&catalog, &mut session, &mut store)
            .unwrap();
        controller.play_pause(&mut session).unwrap();
        assert!(session.is_playing);

        controller.next(&catalog, &mut session, &mut store).unwrap();

        assert!(session.is_playing);
        assert!(!log.borrow().paused);
        assert_eq!(controller.state(), PlayerState::Playing);
        assert_eq!(log.borrow().loads.len(), 2);
    }

    #[test]
    fn play_pause_follows_the_authoritative_paused_flag() {
        let (mut controller, catalog, mut session, mut store, log) = fixture(2);

        controller
            .load_active(&catalog, &mut session, &mut store)
            .unwrap();

        // Flip the backend state behind the controller's back; the toggle
        // must still observe it.
        log.borrow_mut().paused = false;
        session.is_playing = false;

        controller.play_pause(&mut session).unwrap();

        assert!(log.borrow().paused);
        assert!(!session.is_playing);
    }

    #[test]
    fn play_by_index_on_the_active_track_toggles_without_reload() {
        let (mut controller, catalog, mut session, mut store, log) = fixture(3);

        controller
            .play_by_index(1, &catalog, &mut session, &mut store)
            .unwrap();

        assert_eq!(session.active_index, 1);
        assert!(session.is_playing);
        assert_eq!(log.borrow().loads.len(), 1);

        controller
            .play_by_index(1, &catalog, &mut session, &mut store)
            .unwrap();

        assert_eq!(session.active_index, 1);
        assert!(!session.is_playing);
        assert_eq!(log.borrow().loads.len(), 1, "toggle must not reload");
    }

    #[test]
    fn play_by_index_on_another_track_loads_it() {
        let (mut controller, catalog, mut session, mut store, log) = fixture(3);

        controller
            .play_by_index(2, &catalog, &mut session, &mut store)
            .unwrap();

        assert_eq!(session.active_index, 2);
        assert_eq!(log.borrow().loads, vec!["track-2.mp3"]);
        assert!(session.is_playing);
    }

    #[test]
    fn track_starts_persist_the_active_index() {
        let (mut controller, catalog, mut session, mut store, _log) = fixture(3);

        controller.next(&catalog, &mut session, &mut store).unwrap();

        assert_eq!(store.track_index, Some(1));
    }

    #[test]
    fn set_volume_scales_and_persists() {
        let (mut controller, _catalog, mut session, mut store, log) = fixture(1);

        controller.set_volume(30, &mut session, &mut store).unwrap();

        assert_eq!(log.borrow().volume, Some(0.3));
        assert_eq!(session.volume, 30);
        assert_eq!(store.volume, Some(30));
    }

    #[test]
    fn set_volume_clamps_out_of_range_levels() {
        let (mut controller, _catalog, mut session, mut store, log) = fixture(1);

        controller
            .set_volume(150, &mut session, &mut store)
            .unwrap();
        assert_eq!(log.borrow().volume, Some(1.0));
        assert_eq!(session.volume, 100);

        controller.set_volume(-5, &mut session, &mut store).unwrap();
        assert_eq!(log.borrow().volume, Some(0.0));
        assert_eq!(session.volume, 0);
        assert_eq!(store.volume, Some(0));
    }

    #[test]
    fn volume_presets_apply_and_persist() {
        for &level in &crate::events::VOLUME_PRESETS {
            let (mut controller, _catalog, mut session, mut store, log) = fixture(1);

            controller
                .set_volume(level, &mut session, &mut store)
                .unwrap();

            assert_eq!(log.borrow().volume, Some(f64::from(level) / 100.0));
            assert_eq!(session.volume, level as u8);
            assert_eq!(store.volume, Some(level as u8));
        }
    }

    #[test]
    fn position_reads_through_to_the_media_source() {
        let (controller, _catalog, _session, _store, log) = fixture(1);

        assert_eq!(controller.position(), None);

        log.borrow_mut().position = Some(42.5);
        assert_eq!(controller.position(), Some(42.5));
    }

    #[test]
    fn seek_is_a_noop_without_a_known_duration() {
        let (mut controller, _catalog, _session, _store, log) = fixture(1);

        controller.seek_to(50).unwrap();

        assert_eq!(log.borrow().position, None);
    }

    #[test]
    fn seek_targets_a_fraction_of_the_duration() {
        let (mut controller, _catalog, _session, _store, log) = fixture(1);

        log.borrow_mut().duration = Some(200.0);
        controller.seek_to(50).unwrap();

        assert_eq!(log.borrow().position, Some(100.0));
    }

    #[test]
    fn ended_track_advances_to_the_next() {
        let (mut controller, catalog, mut session, mut store, log) = fixture(2);

        controller
            .load_active(&catalog, &mut session, &mut store)
            .unwrap();
        controller.play_pause(&mut session).unwrap();

        controller
            .on_ended(&catalog, &mut session, &mut store)
            .unwrap();

        assert_eq!(session.active_index, 1);
        assert!(session.is_playing);
        assert_eq!(log.borrow().loads.len(), 2);
    }

    #[test]
    fn ended_track_restarts_in_place_under_repeat() {
        let (mut controller, catalog, mut session, mut store, log) = fixture(2);

        controller
            .load_active(&catalog, &mut session, &mut store)
            .unwrap();
        controller.play_pause(&mut session).unwrap();
        controller.toggle_repeat();

        controller
            .on_ended(&catalog, &mut session, &mut store)
            .unwrap();

        assert_eq!(session.active_index, 0);
        assert!(session.is_playing);
        assert_eq!(log.borrow().position, Some(0.0));
        assert_eq!(log.borrow().loads.len(), 1, "repeat must not reload");
    }
}
