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

use anyhow::Result;

use crate::{App, events::AppEvent, player::MediaEvent};

pub(super) fn handle_search_query_changed(app: &mut App, query: String) {
    app.playlist_view.set_search_query(&mut app.session, query);
}

pub(super) fn handle_add_track(app: &mut App, locator: String) {
    if app.catalog.add_track(&locator) {
        log::info!("added track: {}", locator.trim());
    }
}

pub(super) fn handle_play_track_at(app: &mut App, index: usize) -> Result<()> {
    // Re-activating the active track toggles in place without a reload, so
    // the pane keeps its progress in that case.
    let switching = index != app.session.active_index;

    app.controller
        .play_by_index(index, &app.catalog, &mut app.session, &mut app.store)?;

    if switching {
        app.now_playing.begin_load(&app.catalog, &app.session);
    }

    Ok(())
}

pub(super) fn handle_next(app: &mut App) -> Result<()> {
    app.controller
        .next(&app.catalog, &mut app.session, &mut app.store)?;
    app.now_playing.begin_load(&app.catalog, &app.session);

    Ok(())
}

pub(super) fn handle_previous(app: &mut App) -> Result<()> {
    app.controller
        .previous(&app.catalog, &mut app.session, &mut app.store)?;
    app.now_playing.begin_load(&app.catalog, &app.session);

    Ok(())
}

pub(super) fn handle_metadata_loaded(app: &mut App) {
    app.now_playing.metadata_loaded(&app.catalog, &app.session);
}

pub(super) fn handle_duration_changed(app: &mut App, duration: f64) {
    app.now_playing.duration_changed(duration);
}

pub(super) fn handle_time_changed(app: &mut App, seconds: f64) {
    app.now_playing.time_changed(seconds);
}

pub(super) fn handle_track_finished(app: &mut App) -> Result<()> {
    // Under repeat the track restarts in place without a reload and the
    // known duration stays valid.
    let restarts_in_place = app.controller.repeat();

    app.controller
        .on_ended(&app.catalog, &mut app.session, &mut app.store)?;

    if !restarts_in_place {
        app.now_playing.begin_load(&app.catalog, &app.session);
    }

    Ok(())
}

/// Drains pending media source events and feeds them back through the
/// application channel, so their handlers run with the same
/// run-to-completion semantics as everything else.
pub(super) fn handle_tick(app: &mut App) -> Result<()> {
    for media_event in app.controller.poll_media() {
        let event = match media_event {
            MediaEvent::MetadataLoaded => AppEvent::MetadataLoaded,
            MediaEvent::DurationChanged(duration) => AppEvent::DurationChanged(duration),
            MediaEvent::TimeChanged(seconds) => AppEvent::TimeChanged(seconds),
            MediaEvent::Ended => AppEvent::TrackFinished,
        };
        app.event_tx.send(event)?;
    }

    // The backend only emits time-pos changes while the source is playing;
    // an authoritative position read keeps the progress display current
    // after seeks made while paused.
    if let Some(seconds) = app.controller.position() {
        app.now_playing.time_changed(seconds);
    }

    Ok(())
}
