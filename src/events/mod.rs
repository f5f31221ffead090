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

//! Application logic and event dispatching.
//!
//! This module acts as the central hub for the "Controller" logic of the
//! application: every input, whether a key press, a media backend
//! notification, or a periodic tick, arrives as an [`AppEvent`] on one
//! channel and is handled to completion before the next one is dispatched.
//! Every state-changing event is followed by a full redraw.

mod handlers;
mod now_playing;

use handlers::*;
pub(crate) use now_playing::NowPlaying;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, render::draw};

const VOLUME_DELTA: i32 = 5;

/// Quick volume levels bound to F1-F3, lowest to full.
pub(crate) const VOLUME_PRESETS: [i32; 3] = [25, 50, 100];

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    SearchQueryChanged(String),
    AddTrack(String),

    /// Activate the track at the given catalog index.
    PlayTrackAt(usize),

    MetadataLoaded,
    DurationChanged(f64),
    TimeChanged(f64),
    TrackFinished,

    Tick,

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::SearchQueryChanged(query) => handle_search_query_changed(app, query),
            AppEvent::AddTrack(locator) => handle_add_track(app, locator),
            AppEvent::PlayTrackAt(index) => handle_play_track_at(app, index)?,
            AppEvent::MetadataLoaded => handle_metadata_loaded(app),
            AppEvent::DurationChanged(duration) => handle_duration_changed(app, duration),
            AppEvent::TimeChanged(seconds) => handle_time_changed(app, seconds),
            AppEvent::TrackFinished => handle_track_finished(app)?,
            AppEvent::Tick => handle_tick(app)?,
            AppEvent::ExitApplication => {}
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Maps keyboard input to application actions and playback transitions.
///
/// The prompt gets first refusal: while search or add-track entry is active
/// it consumes every key. Everything else falls through to the global
/// transport and navigation bindings.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = crossterm::event::Event::Key(key);
    if app.prompt.handle_event(event, &app.event_tx)? {
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        // Transport
        KeyCode::Char(' ') => app.controller.play_pause(&mut app.session)?,
        KeyCode::Right => handle_next(app)?,
        KeyCode::Left => handle_previous(app)?,
        KeyCode::Char('r') => app.controller.toggle_repeat(),

        // Seek to 0%..90% of the current track
        KeyCode::Char(ch @ '0'..='9') => {
            let percent = (ch as u8 - b'0') * 10;
            app.controller.seek_to(percent)?;
        }

        // Volume
        KeyCode::Char('-') => {
            let level = i32::from(app.session.volume) - VOLUME_DELTA;
            app.controller
                .set_volume(level, &mut app.session, &mut app.store)?;
        }
        KeyCode::Char('=') => {
            let level = i32::from(app.session.volume) + VOLUME_DELTA;
            app.controller
                .set_volume(level, &mut app.session, &mut app.store)?;
        }
        KeyCode::F(slot @ 1..=3) => {
            let level = VOLUME_PRESETS[usize::from(slot - 1)];
            app.controller
                .set_volume(level, &mut app.session, &mut app.store)?;
        }

        // Playlist navigation
        KeyCode::Down | KeyCode::Char('j') => {
            app.playlist_view.select_next(&app.catalog, &app.session);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.playlist_view
                .select_previous(&app.catalog, &app.session);
        }
        KeyCode::Enter => {
            if let Some(index) = app
                .playlist_view
                .selected_catalog_index(&app.catalog, &app.session)
            {
                app.event_tx.send(AppEvent::PlayTrackAt(index))?;
            }
        }

        // Filters and entry prompts
        KeyCode::Char('/') => app.prompt.open_search(&app.session.search_query),
        KeyCode::Char('a') => app.prompt.open_add_track(),
        KeyCode::Char('c') => app
            .playlist_view
            .cycle_category(&app.catalog, &mut app.session),

        KeyCode::Char('p') => app.playlist_view.toggle(),

        _ => {}
    }

    Ok(())
}
