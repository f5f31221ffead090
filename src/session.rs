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

//! Mutable session state and its persisted subset.
//!
//! [`Session`] is the single shared state both the playback controller and
//! the playlist view observe. Playback fields (`active_index`, `is_playing`,
//! `volume`) are only mutated through the controller; filter fields
//! (`search_query`, `category_filter`) only through the playlist view.
//!
//! A small subset (last track index and volume) survives restarts through
//! the [`SessionStore`] seam, backed by a `confy` document in production.

use serde::{Deserialize, Serialize};

/// Wildcard value for the category filter, matching every track.
pub(crate) const ALL_CATEGORIES: &str = "all";

const APP_NAME: &str = "playdeck";
const SESSION_DOC: &str = "session";

/// The mutable per-run session state.
pub(crate) struct Session {
    /// Index of the current track; always a valid catalog index.
    pub(crate) active_index: usize,
    /// Mirrors the media source's paused flag.
    pub(crate) is_playing: bool,
    /// Volume level, 0-100.
    pub(crate) volume: u8,
    pub(crate) search_query: String,
    /// [`ALL_CATEGORIES`] or an exact category value.
    pub(crate) category_filter: String,
}

impl Session {
    pub(crate) fn new(active_index: usize, volume: u8) -> Self {
        Self {
            active_index,
            is_playing: false,
            volume,
            search_query: String::new(),
            category_filter: ALL_CATEGORIES.to_string(),
        }
    }
}

/// The persisted session subset.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct SavedSession {
    pub(crate) track_index: usize,
    pub(crate) volume: u8,
}

impl Default for SavedSession {
    fn default() -> Self {
        Self {
            track_index: 0,
            volume: 100,
        }
    }
}

/// Write-through store for the persisted session subset.
///
/// Saves are best-effort: a failed write must never interrupt playback.
pub(crate) trait SessionStore {
    fn load(&self) -> SavedSession;
    fn save_track_index(&mut self, index: usize);
    fn save_volume(&mut self, volume: u8);
}

/// `confy`-backed production store, a TOML document next to the application
/// configuration.
pub(crate) struct ConfySessionStore;

impl ConfySessionStore {
    fn save(&self, saved: &SavedSession) {
        if let Err(e) = confy::store(APP_NAME, Some(SESSION_DOC), saved) {
            log::warn!("failed to persist session state: {}", e);
        }
    }
}

impl SessionStore for ConfySessionStore {
    fn load(&self) -> SavedSession {
        confy::load(APP_NAME, Some(SESSION_DOC)).unwrap_or_default()
    }

    fn save_track_index(&mut self, index: usize) {
        let mut saved = self.load();
        saved.track_index = index;
        self.save(&saved);
    }

    fn save_volume(&mut self, volume: u8) {
        let mut saved = self.load();
        saved.volume = volume;
        self.save(&saved);
    }
}
