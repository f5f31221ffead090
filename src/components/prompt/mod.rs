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

//! Single-line text input for search and add-track entry.
//!
//! This module manages a text input component and dispatches application
//! events as the user types or submits. Search applies live on every edit;
//! add-track submits the entered locator on Enter. While the prompt is
//! active it consumes all key events.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::events::AppEvent;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PromptMode {
    Inactive,
    Search,
    AddTrack,
}

pub(crate) struct Prompt {
    mode: PromptMode,
    pub(crate) input: Input,
}

impl Prompt {
    pub(crate) fn new() -> Self {
        Self {
            mode: PromptMode::Inactive,
            input: Input::default(),
        }
    }

    pub(crate) fn mode(&self) -> PromptMode {
        self.mode
    }

    pub(crate) fn active(&self) -> bool {
        self.mode != PromptMode::Inactive
    }

    /// Opens the search prompt seeded with the current query, so editing
    /// continues from the active filter.
    pub(crate) fn open_search(&mut self, current_query: &str) {
        self.mode = PromptMode::Search;
        self.input = Input::default().with_value(current_query.to_string());
    }

    pub(crate) fn open_add_track(&mut self) {
        self.mode = PromptMode::AddTrack;
        self.input.reset();
    }

    /// Routes a key event into the prompt while it is active.
    ///
    /// Returns `true` when the event was consumed, in which case the global
    /// key bindings must not see it.
    pub(crate) fn handle_event(&mut self, event: Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        if !self.active() {
            return Ok(false);
        }

        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        match key_event.code {
            KeyCode::Esc => {
                if self.mode == PromptMode::Search {
                    // Abandoning the search clears the filter.
                    event_tx.send(AppEvent::SearchQueryChanged(String::new()))?;
                }
                self.mode = PromptMode::Inactive;
                self.input.reset();
            }

            KeyCode::Enter => {
                if self.mode == PromptMode::AddTrack {
                    event_tx.send(AppEvent::AddTrack(self.input.value().to_string()))?;
                }
                // Search keeps whatever filter was typed.
                self.mode = PromptMode::Inactive;
                self.input.reset();
            }

            _ => {
                // Delegate all other key events to the managed input
                // component.
                self.input.handle_event(&event);
                if self.mode == PromptMode::Search {
                    event_tx.send(AppEvent::SearchQueryChanged(self.input.value().to_string()))?;
                }
            }
        }

        Ok(true)
    }
}
