// SPDX-License-Identifier: MPL-2.0
//! Feed selection state machine.
//!
//! Tracks which feed the primary surface shows, whether the dropdown menu is
//! open, and whether the expanded grid overlay is showing. Transitions return
//! an [`Effect`] the orchestrator translates into playback resyncs; the state
//! itself never touches sessions.

/// Feed selection state. Transient: owned by the viewer, reset on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Index of the feed bound to the primary surface.
    current: usize,
    /// Whether the grid overlay is showing.
    expanded: bool,
    /// Whether the dropdown menu is open (collapsed layout only).
    menu_open: bool,
}

/// Side effects the orchestrator must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Rebind the primary surface to the current feed.
    ResyncPrimary,
    /// Attach all grid surfaces on the next scheduler turn, once the grid
    /// cells exist in the layout.
    ResyncGridDeferred,
    /// Destroy all grid sessions, then rebind the primary surface.
    CollapseGrid,
}

impl State {
    /// Initial state: collapsed, first feed, menu closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the feed shown on the primary surface.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Whether the grid overlay is showing.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether the dropdown menu is open.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Selects the feed at `index` for the primary surface. Valid only while
    /// collapsed; closes the dropdown.
    pub fn select_feed(&mut self, index: usize) -> Effect {
        if self.expanded {
            return Effect::None;
        }

        self.menu_open = false;
        if self.current == index {
            return Effect::None;
        }
        self.current = index;
        Effect::ResyncPrimary
    }

    /// Flips dropdown visibility. Valid only while collapsed and with more
    /// than one feed to choose from. Never touches playback.
    pub fn toggle_menu(&mut self, feed_count: usize) -> Effect {
        if self.expanded || feed_count <= 1 {
            return Effect::None;
        }
        self.menu_open = !self.menu_open;
        Effect::None
    }

    /// Flips between the collapsed and expanded layouts.
    ///
    /// Entering the grid defers attachment until the cells exist in the
    /// layout; leaving it destroys all grid sessions before the primary
    /// surface is rebound.
    pub fn toggle_expand(&mut self) -> Effect {
        self.expanded = !self.expanded;
        if self.expanded {
            self.menu_open = false;
            Effect::ResyncGridDeferred
        } else {
            Effect::CollapseGrid
        }
    }

    /// Reacts to an external feed-list change.
    ///
    /// While collapsed, an out-of-range selection resets to the first feed;
    /// either way the primary binding must be refreshed. While expanded, the
    /// whole grid is re-paired on the next turn.
    pub fn feeds_changed(&mut self, feed_count: usize) -> Effect {
        if self.current >= feed_count {
            self.current = 0;
        }
        if feed_count <= 1 {
            self.menu_open = false;
        }

        if self.expanded {
            Effect::ResyncGridDeferred
        } else {
            Effect::ResyncPrimary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_collapsed_on_first_feed() {
        let state = State::new();
        assert_eq!(state.current(), 0);
        assert!(!state.is_expanded());
        assert!(!state.is_menu_open());
    }

    #[test]
    fn select_feed_sets_index_and_closes_menu() {
        let mut state = State::new();
        state.toggle_menu(3);
        assert!(state.is_menu_open());

        let effect = state.select_feed(2);

        assert_eq!(effect, Effect::ResyncPrimary);
        assert_eq!(state.current(), 2);
        assert!(!state.is_menu_open());
    }

    #[test]
    fn reselecting_the_current_feed_does_not_resync() {
        let mut state = State::new();
        assert_eq!(state.select_feed(0), Effect::None);
    }

    #[test]
    fn select_feed_is_ignored_while_expanded() {
        let mut state = State::new();
        state.toggle_expand();

        assert_eq!(state.select_feed(1), Effect::None);
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn toggle_menu_requires_multiple_feeds() {
        let mut state = State::new();
        assert_eq!(state.toggle_menu(1), Effect::None);
        assert!(!state.is_menu_open());

        assert_eq!(state.toggle_menu(2), Effect::None);
        assert!(state.is_menu_open());
    }

    #[test]
    fn toggle_menu_is_ignored_while_expanded() {
        let mut state = State::new();
        state.toggle_expand();
        state.toggle_menu(3);
        assert!(!state.is_menu_open());
    }

    #[test]
    fn expanding_defers_grid_attachment() {
        let mut state = State::new();
        let effect = state.toggle_expand();

        assert!(state.is_expanded());
        assert_eq!(effect, Effect::ResyncGridDeferred);
    }

    #[test]
    fn expanding_closes_an_open_menu() {
        let mut state = State::new();
        state.toggle_menu(2);
        state.toggle_expand();
        assert!(!state.is_menu_open());
    }

    #[test]
    fn collapsing_destroys_grid_then_resyncs_primary() {
        let mut state = State::new();
        state.toggle_expand();
        let effect = state.toggle_expand();

        assert!(!state.is_expanded());
        assert_eq!(effect, Effect::CollapseGrid);
    }

    #[test]
    fn shrinking_feed_list_below_current_resets_to_first() {
        let mut state = State::new();
        state.select_feed(2);

        let effect = state.feeds_changed(2);

        assert_eq!(state.current(), 0);
        assert_eq!(effect, Effect::ResyncPrimary);
    }

    #[test]
    fn feed_list_change_in_range_keeps_selection() {
        let mut state = State::new();
        state.select_feed(1);

        let effect = state.feeds_changed(3);

        assert_eq!(state.current(), 1);
        assert_eq!(effect, Effect::ResyncPrimary);
    }

    #[test]
    fn feed_list_change_while_expanded_defers_grid_resync() {
        let mut state = State::new();
        state.toggle_expand();

        assert_eq!(state.feeds_changed(4), Effect::ResyncGridDeferred);
    }
}
