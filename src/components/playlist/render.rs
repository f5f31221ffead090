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

//! UI rendering logic for the playlist view.
//!
//! Renders the filtered track rows with a header summarising the active
//! filter. Exactly the row whose catalog index equals the session's active
//! index carries a play/pause marker; when the active track is filtered out
//! no row is marked.

use std::fmt::Write;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::{
    components::{PlaylistView, visible_indices},
    model::Catalog,
    render::icons::{ICON_PAUSE, ICON_PLAY},
    session::{ALL_CATEGORIES, Session},
    theme::Theme,
};

impl PlaylistView {
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        catalog: &Catalog,
        session: &Session,
        theme: &Theme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let visible = visible_indices(catalog, session);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let mut header_text = format!("Playlist | {} of {} tracks", visible.len(), catalog.len());
        if !session.search_query.is_empty() {
            let _ = write!(header_text, " | search: {}", session.search_query);
        }
        if session.category_filter != ALL_CATEGORIES {
            let _ = write!(header_text, " | category: {}", session.category_filter);
        }

        let header = Paragraph::new(header_text).block(header_block);
        f.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = visible
            .iter()
            .map(|&index| {
                let track = &catalog.tracks()[index];

                let marker = if index == session.active_index {
                    if session.is_playing { ICON_PLAY } else { ICON_PAUSE }
                } else {
                    " "
                };

                let title_style = if index == session.active_index {
                    Style::default()
                        .fg(theme.accent_colour)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.list_title_fg)
                };

                ListItem::new(Line::from(vec![
                    Span::raw(format!(" {} ", marker)),
                    Span::styled(track.title.clone(), title_style),
                    Span::styled(
                        format!("  {}", track.artist),
                        Style::default().fg(theme.list_artist_fg),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.selection_bg))
            .highlight_symbol(">");

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }
}
