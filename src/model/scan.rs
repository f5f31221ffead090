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

//! Media directory scanning and tag probing.
//!
//! Configured media directories are walked recursively at startup and any
//! audio files found are appended to the catalog. Tags are read with `lofty`
//! where possible; unreadable files degrade to filename-derived metadata.
//! The genre tag, when present, becomes the track category.

use std::path::Path;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::model::{DEFAULT_ARTIST, DEFAULT_ARTWORK, Track};

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "m4a", "wav"];

/// Walks the configured media directories and returns catalog entries for
/// every audio file found, in directory traversal order.
pub(crate) fn scan_media_dirs(dirs: &[String]) -> Vec<Track> {
    let mut tracks = Vec::new();

    for dir in dirs {
        let before = tracks.len();

        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            if !is_audio_file(entry.path()) {
                continue;
            }
            tracks.push(track_from_path(entry.path()));
        }

        log::info!("scanned {}: {} tracks", dir, tracks.len() - before);
    }

    tracks
}

/// Probes a user-submitted locator for tag metadata.
///
/// Returns `None` unless the locator names a readable local audio file, in
/// which case the caller falls back to synthetic placeholder metadata.
pub(crate) fn probe_track(locator: &str) -> Option<Track> {
    let path = Path::new(locator);
    if !path.is_file() || !is_audio_file(path) {
        return None;
    }
    Some(track_from_path(path))
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
}

fn track_from_path(path: &Path) -> Track {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown")
        .to_string();

    let (title, artist, category) = match lofty::read_from_path(path) {
        Ok(tagged) => {
            let tag = tagged.primary_tag().or_else(|| tagged.first_tag());
            let title = tag
                .and_then(|t| t.title().map(|s| s.to_string()))
                .unwrap_or_else(|| stem.clone());
            let artist = tag
                .and_then(|t| t.artist().map(|s| s.to_string()))
                .unwrap_or_else(|| DEFAULT_ARTIST.to_string());
            let category = tag.and_then(|t| t.genre().map(|s| s.to_lowercase()));
            (title, artist, category)
        }
        Err(e) => {
            log::warn!("failed to read tags from {}: {}", path.display(), e);
            (stem, DEFAULT_ARTIST.to_string(), None)
        }
    };

    Track {
        title,
        artist,
        source: path.to_string_lossy().into_owned(),
        artwork: DEFAULT_ARTWORK.to_string(),
        category,
    }
}
