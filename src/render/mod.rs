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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event to provide a reactive user interface.

pub(crate) mod icons;
mod player;
mod prompt;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    widgets::Paragraph,
};

use crate::{
    App,
    render::{player::draw_player, prompt::draw_prompt},
};

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the playlist panel (when visible), the player
/// pane with the current track and transport state, and the prompt line.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: main, player, prompt
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(area);

    if app.playlist_view.visible {
        app.playlist_view
            .draw(f, outer[0], &app.catalog, &app.session, &app.theme);
    } else {
        let hidden = Paragraph::new("playlist hidden, press p to show")
            .style(Style::default().fg(app.theme.border_colour))
            .alignment(Alignment::Center);
        f.render_widget(hidden, outer[0]);
    }

    draw_player(f, outer[1], app);

    draw_prompt(f, outer[2], app);
}
