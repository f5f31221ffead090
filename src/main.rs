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

//! # Playlist Player TUI.
//!
//! A terminal-based audio playlist player.
//!
//! This application binds user actions (play/pause, seek, next/previous,
//! volume, search/filter, playlist visibility, add-track) to a single
//! underlying media source, and persists minimal session state (last track
//! index and volume) across runs.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering, and
//!   all state mutation.
//! * **Input and Tick Threads** only translate raw keyboard events and
//!   periodic ticks into application events.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. All events are
//! funnelled through a single `std::sync::mpsc` channel and each handler runs
//! to completion before the next event is dispatched, so no locking is needed
//! around the shared session state.

mod components;
mod config;
mod events;
mod model;
mod player;
mod render;
mod session;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use crate::{
    components::{PlaylistView, Prompt},
    config::AppConfig,
    events::{AppEvent, NowPlaying, process_events},
    model::Catalog,
    player::{MpvSource, PlaybackController},
    session::{ConfySessionStore, Session, SessionStore},
    theme::Theme,
};

/// Application state.
struct App {
    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub controller: PlaybackController,

    pub catalog: Catalog,
    pub session: Session,
    pub store: ConfySessionStore,

    pub playlist_view: PlaylistView,
    pub prompt: Prompt,

    pub now_playing: NowPlaying,
}

impl App {
    /// Create a new instance of application state.
    ///
    /// Builds the catalog from configuration plus an optional media directory
    /// scan, restores the persisted session subset, initialises the media
    /// backend and loads (but does not start playing) the last active track.
    pub fn new(config: AppConfig) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let mut tracks = config.tracks;
        tracks.extend(model::scan::scan_media_dirs(&config.media_dirs));

        let catalog = Catalog::new(tracks);
        log::info!("catalog initialised with {} tracks", catalog.len());

        let mut store = ConfySessionStore;
        let saved = store.load();

        // A previously saved index may be out of range if the catalog shrank
        // since the last run.
        let active_index = saved.track_index.min(catalog.len() - 1);
        let mut session = Session::new(active_index, saved.volume.min(100));

        let media = MpvSource::new().context("Failed to initialise media backend")?;
        let mut controller = PlaybackController::new(Box::new(media));

        controller.set_volume(i32::from(session.volume), &mut session, &mut store)?;
        controller.load_active(&catalog, &mut session, &mut store)?;

        let mut now_playing = NowPlaying::default();
        now_playing.begin_load(&catalog, &session);

        Ok(Self {
            theme: Theme::default(),
            event_tx,
            event_rx,
            controller,
            catalog,
            session,
            store,
            playlist_view: PlaylistView::new(),
            prompt: Prompt::new(),
            now_playing,
        })
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channel, initializes the application
/// state, manages the terminal lifecycle, and returns an error if any part of
/// the execution fails.
fn main() -> Result<()> {
    env_logger::init();

    let config = config::load_config();

    let mut app = App::new(config).context("Failed to initalise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&theme::Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a result,
/// as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background threads and enters the main event loop.
///
/// This function spawns two long-running background threads:
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes and media event polling.
///
/// After spawning them, it hands control to [`process_events`] to manage the
/// UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application
    // and the cadence at which pending media source events are drained.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
