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

//! Render the music player interface.
//!
//! This module renders the visual representation of the current track, the
//! playback state, the volume level, and the progress through the track.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::PlayerState,
    render::icons::{ICON_PAUSE, ICON_PLAY, ICON_REPEAT, ICON_STOP},
    util,
};

/// Renders the main player widget including track info and transport state.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(chunks[0]);

    if let Some(track) = &app.now_playing.track {
        let icon = match app.controller.state() {
            PlayerState::Playing => ICON_PLAY,
            PlayerState::Paused => ICON_PAUSE,
            PlayerState::Idle => ICON_STOP,
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", icon),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(Color::White),
            Span::styled(
                &track.title,
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
            Span::raw(" by "),
            Span::styled(
                &track.artist,
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
        ];
        if app.controller.repeat() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(ICON_REPEAT, Style::default()).fg(app.theme.accent_colour));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), info_chunks[0]);

        let duration = app.now_playing.duration.unwrap_or(0.0) as u64;
        let time = app.now_playing.time.unwrap_or(0.0) as u64;
        let remaining = duration.saturating_sub(time);

        let time_line = Line::from(vec![
            Span::styled(
                util::format::format_time(time),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
            Span::styled(" / ", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
            Span::styled(
                util::format::format_time(duration),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
            Span::styled(" (-", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
            Span::styled(
                util::format::format_time(remaining),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
            Span::styled(")", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
        ]);

        let time_p = Paragraph::new(time_line).alignment(Alignment::Right);
        f.render_widget(time_p, info_chunks[1]);

        if !track.artwork.is_empty() {
            let artwork = Paragraph::new(format!("artwork: {}", track.artwork))
                .style(Style::default().fg(app.theme.border_colour));
            f.render_widget(artwork, chunks[1]);
        }
    }

    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(chunks[2]);

    let volume_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(control_chunks[1]);

    let vol_ratio = (f64::from(app.session.volume) / 100.0).clamp(0.0, 1.0);

    let volume_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(vol_ratio)
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, volume_layout[0]);

    let volume_label = Paragraph::new(format!(" {}%", app.session.volume))
        .alignment(Alignment::Right)
        .fg(Color::White);
    f.render_widget(volume_label, volume_layout[1]);

    let position = app.now_playing.position.unwrap_or(0.0).clamp(0.0, 1.0);

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(position)
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[4]);
}
