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

//! Render the prompt line.
//!
//! While a prompt is active this draws its prefix, the current text, and the
//! cursor; otherwise it shows a short key binding hint.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::{App, components::PromptMode};

pub(crate) fn draw_prompt(f: &mut Frame, area: Rect, app: &App) {
    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    let prefix = match app.prompt.mode() {
        PromptMode::Search => "/",
        PromptMode::AddTrack => "add> ",
        PromptMode::Inactive => {
            let hints = Paragraph::new(
                "space play/pause | \u{2190}/\u{2192} prev/next | / search | a add | c category | p playlist | r repeat | q quit",
            )
            .style(Style::default().fg(app.theme.border_colour));
            f.render_widget(hints, container[0]);
            return;
        }
    };

    f.render_widget(
        Paragraph::new(format!("{}{}", prefix, app.prompt.input.value())).style(
            Style::default()
                .fg(app.theme.prompt_colour)
                .bg(app.theme.gauge_track_colour),
        ),
        container[0],
    );

    let cursor_x = container[0].x + (prefix.len() + app.prompt.input.cursor()) as u16;
    let cursor_y = container[0].y;
    f.set_cursor_position((cursor_x, cursor_y));
}
