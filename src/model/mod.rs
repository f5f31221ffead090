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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application — the [`Track`]
//! catalog entry and the ordered [`Catalog`] collection. Insertion order is
//! significant: it defines next/previous adjacency for playback.

pub(crate) mod scan;

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_ARTIST: &str = "Unknown Artist";
pub(crate) const DEFAULT_ARTWORK: &str = "default.jpg";

/// An immutable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Source locator, a local path or URI understood by the media backend.
    pub source: String,
    #[serde(default)]
    pub artwork: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// The ordered collection of all known tracks.
///
/// Index-addressable, never empty once constructed. Entries may be appended
/// at runtime but are never removed or reordered, so a catalog index remains
/// stable for the lifetime of the session.
pub(crate) struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Builds a catalog, falling back to the built-in track list when the
    /// configuration yields nothing. The catalog must never be empty.
    pub(crate) fn new(tracks: Vec<Track>) -> Self {
        let tracks = if tracks.is_empty() {
            log::info!("no configured tracks, using the built-in catalog");
            builtin_tracks()
        } else {
            tracks
        };

        Self { tracks }
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Appends a user-submitted track locator.
    ///
    /// The locator is trimmed first; blank input is silently ignored and the
    /// catalog is left unchanged. For locators that point at a readable local
    /// file the metadata is probed from its tags, anything else (URLs,
    /// missing files) gets recognisably synthetic placeholder metadata.
    ///
    /// Returns `true` if a track was appended.
    pub(crate) fn add_track(&mut self, locator: &str) -> bool {
        let locator = locator.trim();
        if locator.is_empty() {
            return false;
        }

        let track = scan::probe_track(locator).unwrap_or_else(|| Track {
            title: format!("New Track {}", self.tracks.len() + 1),
            artist: DEFAULT_ARTIST.to_string(),
            source: locator.to_string(),
            artwork: DEFAULT_ARTWORK.to_string(),
            category: None,
        });

        self.tracks.push(track);
        true
    }

    /// Distinct category values, in first-appearance catalog order.
    pub(crate) fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for track in &self.tracks {
            if let Some(category) = &track.category {
                if !categories.iter().any(|c| c == category) {
                    categories.push(category.clone());
                }
            }
        }
        categories
    }
}

/// The default catalog used when no tracks are configured.
pub(crate) fn builtin_tracks() -> Vec<Track> {
    let entries: &[(&str, &str, &str, &str, &str)] = &[
        (
            "Best Time",
            "FAS Sounds",
            "./media/112194.mp3",
            "https://cdn.pixabay.com/audio/2022/05/27/23-46-21-714_200x200.jpg",
            "electronic",
        ),
        (
            "Drive Breakbeat",
            "Rockot",
            "./media/173062.mp3",
            "https://cdn.pixabay.com/audio/2023/10/24/15-08-22-671_200x200.jpg",
            "electronic",
        ),
        (
            "Tokyo Cafe",
            "TVARI",
            "./media/159065.mp3",
            "https://cdn.pixabay.com/audio/2023/07/22/02-53-18-138_200x200.jpg",
            "lofi",
        ),
        (
            "Smoke",
            "Soul Prod Music",
            "./media/143172.mp3",
            "https://cdn.pixabay.com/audio/2023/03/19/12-27-22-207_200x200.jpg",
            "lofi",
        ),
        (
            "Electronic Rock",
            "Alex Grohl",
            "./media/15045.mp3",
            "https://i.ytimg.com/vi/YtRNZ2TCxLY/maxresdefault.jpg",
            "rock",
        ),
    ];

    entries
        .iter()
        .map(|(title, artist, source, artwork, category)| Track {
            title: title.to_string(),
            artist: artist.to_string(),
            source: source.to_string(),
            artwork: artwork.to_string(),
            category: Some(category.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            Track {
                title: "Best Time".to_string(),
                artist: "FAS Sounds".to_string(),
                source: "a.mp3".to_string(),
                artwork: String::new(),
                category: Some("electronic".to_string()),
            },
            Track {
                title: "Drive Breakbeat".to_string(),
                artist: "Rockot".to_string(),
                source: "b.mp3".to_string(),
                artwork: String::new(),
                category: Some("electronic".to_string()),
            },
        ])
    }

    #[test]
    fn catalog_is_never_empty() {
        let catalog = Catalog::new(vec![]);
        assert!(catalog.len() > 0);
    }

    #[test]
    fn add_track_ignores_blank_locators() {
        let mut catalog = small_catalog();
        let before = catalog.len();

        assert!(!catalog.add_track(""));
        assert!(!catalog.add_track("   "));
        assert_eq!(catalog.len(), before);
    }

    #[test]
    fn add_track_appends_with_trimmed_locator() {
        let mut catalog = small_catalog();
        let before = catalog.len();

        assert!(catalog.add_track("  http://x/y.mp3  "));
        assert_eq!(catalog.len(), before + 1);

        let added = catalog.get(before).unwrap();
        assert_eq!(added.source, "http://x/y.mp3");
        assert_eq!(added.title, format!("New Track {}", before + 1));
        assert_eq!(added.artist, DEFAULT_ARTIST);
    }

    #[test]
    fn add_track_does_not_disturb_existing_entries() {
        let mut catalog = small_catalog();
        catalog.add_track("http://x/y.mp3");

        assert_eq!(catalog.get(0).unwrap().title, "Best Time");
        assert_eq!(catalog.get(1).unwrap().title, "Drive Breakbeat");
    }

    #[test]
    fn categories_are_distinct_in_first_appearance_order() {
        let catalog = Catalog::new(builtin_tracks());
        assert_eq!(catalog.categories(), vec!["electronic", "lofi", "rock"]);
    }
}
