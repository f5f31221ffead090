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

//! Playlist view state and filtering.
//!
//! The visible list is a pure derived view of the catalog plus the session's
//! search query and category filter; the view owns no track data of its own,
//! only the cursor position and panel visibility. Filter fields in the
//! session are mutated exclusively through this component.

mod render;

use ratatui::widgets::ListState;

use crate::{
    model::Catalog,
    session::{ALL_CATEGORIES, Session},
};

pub(crate) struct PlaylistView {
    pub(crate) visible: bool,
    pub(crate) list_state: ListState,
}

impl PlaylistView {
    pub(crate) fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            visible: true,
            list_state,
        }
    }

    /// Updates the search query. The cursor resets because the visible rows
    /// it pointed into may no longer exist.
    pub(crate) fn set_search_query(&mut self, session: &mut Session, query: String) {
        session.search_query = query;
        self.list_state.select(Some(0));
    }

    pub(crate) fn set_category_filter(&mut self, session: &mut Session, category: String) {
        session.category_filter = category;
        self.list_state.select(Some(0));
    }

    /// Advances the category filter through `all` and every distinct catalog
    /// category, wrapping back to `all`.
    pub(crate) fn cycle_category(&mut self, catalog: &Catalog, session: &mut Session) {
        let mut options = vec![ALL_CATEGORIES.to_string()];
        options.extend(catalog.categories());

        let current = options
            .iter()
            .position(|option| *option == session.category_filter)
            .unwrap_or(0);
        let next = options[(current + 1) % options.len()].clone();

        self.set_category_filter(session, next);
    }

    /// Toggles the visibility of the playlist panel. Purely visual; the
    /// session state is untouched.
    pub(crate) fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub(crate) fn select_next(&mut self, catalog: &Catalog, session: &Session) {
        let len = visible_indices(catalog, session).len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub(crate) fn select_previous(&mut self, catalog: &Catalog, session: &Session) {
        let len = visible_indices(catalog, session).len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Maps the cursor position back to a catalog index, if any row is
    /// visible under the current filter.
    pub(crate) fn selected_catalog_index(
        &self,
        catalog: &Catalog,
        session: &Session,
    ) -> Option<usize> {
        let visible = visible_indices(catalog, session);
        visible.get(self.list_state.selected()?).copied()
    }
}

/// Computes the catalog indices visible under the current filter, preserving
/// catalog order.
///
/// Search is a case-insensitive substring match on the track title; the
/// category filter is an exact match (or the `all` wildcard). Both
/// predicates are ANDed. The result depends only on its inputs, so repeated
/// calls with unchanged state yield identical rows.
pub(crate) fn visible_indices(catalog: &Catalog, session: &Session) -> Vec<usize> {
    let needle = session.search_query.to_lowercase();

    catalog
        .tracks()
        .iter()
        .enumerate()
        .filter(|(_, track)| needle.is_empty() || track.title.to_lowercase().contains(&needle))
        .filter(|(_, track)| {
            session.category_filter == ALL_CATEGORIES
                || track.category.as_deref() == Some(session.category_filter.as_str())
        })
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Track;

    fn track(title: &str, category: Option<&str>) -> Track {
        Track {
            title: title.to_string(),
            artist: "Artist".to_string(),
            source: format!("{}.mp3", title.to_lowercase().replace(' ', "-")),
            artwork: String::new(),
            category: category.map(str::to_string),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            track("Best Time", Some("electronic")),
            track("Drive Breakbeat", Some("electronic")),
            track("Tokyo Cafe", Some("lofi")),
        ])
    }

    #[test]
    fn search_matches_case_insensitive_substrings() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);

        session.search_query = "best".to_string();
        assert_eq!(visible_indices(&catalog, &session), vec![0]);

        session.search_query = "BREAK".to_string();
        assert_eq!(visible_indices(&catalog, &session), vec![1]);
    }

    #[test]
    fn empty_query_shows_every_track() {
        let catalog = catalog();
        let session = Session::new(0, 100);

        assert_eq!(visible_indices(&catalog, &session), vec![0, 1, 2]);
    }

    #[test]
    fn search_and_category_predicates_are_anded() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);

        session.search_query = "e".to_string();
        session.category_filter = "lofi".to_string();

        assert_eq!(visible_indices(&catalog, &session), vec![2]);
    }

    #[test]
    fn category_filter_matches_exactly() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);

        session.category_filter = "electronic".to_string();

        assert_eq!(visible_indices(&catalog, &session), vec![0, 1]);
    }

    #[test]
    fn derivation_is_idempotent_for_unchanged_state() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);
        session.search_query = "t".to_string();

        let first = visible_indices(&catalog, &session);
        let second = visible_indices(&catalog, &session);

        assert_eq!(first, second);
    }

    #[test]
    fn cursor_maps_through_the_filter_to_catalog_indices() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);
        let mut view = PlaylistView::new();

        view.set_search_query(&mut session, "breakbeat".to_string());

        assert_eq!(view.selected_catalog_index(&catalog, &session), Some(1));
    }

    #[test]
    fn cursor_is_absent_when_the_filter_matches_nothing() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);
        let mut view = PlaylistView::new();

        view.set_search_query(&mut session, "no such track".to_string());

        assert_eq!(view.selected_catalog_index(&catalog, &session), None);
    }

    #[test]
    fn selection_wraps_over_visible_rows() {
        let catalog = catalog();
        let session = Session::new(0, 100);
        let mut view = PlaylistView::new();

        view.select_previous(&catalog, &session);
        assert_eq!(view.selected_catalog_index(&catalog, &session), Some(2));

        view.select_next(&catalog, &session);
        assert_eq!(view.selected_catalog_index(&catalog, &session), Some(0));
    }

    #[test]
    fn cycle_category_rotates_through_all_and_back() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);
        let mut view = PlaylistView::new();

        view.cycle_category(&catalog, &mut session);
        assert_eq!(session.category_filter, "electronic");

        view.cycle_category(&catalog, &mut session);
        assert_eq!(session.category_filter, "lofi");

        view.cycle_category(&catalog, &mut session);
        assert_eq!(session.category_filter, ALL_CATEGORIES);
    }

    #[test]
    fn toggling_visibility_leaves_the_session_alone() {
        let catalog = catalog();
        let mut session = Session::new(0, 100);
        session.search_query = "best".to_string();
        let mut view = PlaylistView::new();

        view.toggle();
        assert!(!view.visible);
        view.toggle();
        assert!(view.visible);

        assert_eq!(session.search_query, "best");
        assert_eq!(visible_indices(&catalog, &session), vec![0]);
    }
}
