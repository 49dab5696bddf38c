//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Card selection
    /// Move selection one card row up. Default: k/↑
    SelectUp,
    /// Move selection one card row down. Default: j/↓
    SelectDown,
    /// Move selection one card left. Default: h/←
    SelectLeft,
    /// Move selection one card right. Default: l/→
    SelectRight,
    /// Move selection up by one screen of cards. Default: Ctrl+u/Page Up
    PageUp,
    /// Move selection down by one screen of cards. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first card. Default: g/Home
    SelectFirst,
    /// Jump to the last loaded card. Default: G/End
    SelectLast,

    // Filters
    /// Focus the search input. Default: /
    StartSearch,
    /// Focus the timezone input. Default: t
    EditTimezone,
    /// Show or hide the filter panel. Default: f
    ToggleFilters,
    /// Toggle a region from the fixed region list. Field: 0-based index. Default: 1-5
    ToggleRegion(usize),
    /// Reset pagination and reload with the current filters. Default: Enter
    ApplyFilters,
    /// Clear every filter and reload from page 1. Default: c
    ClearFilters,

    // Loading
    /// Request the next page explicitly (also retries after a failure). Default: r
    LoadMore,
    /// Dismiss the error notification. Default: x
    DismissError,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
}

impl KeyAction {
    /// Whether the action only changes which card is selected.
    pub fn is_selection(self) -> bool {
        matches!(
            self,
            KeyAction::SelectUp
                | KeyAction::SelectDown
                | KeyAction::SelectLeft
                | KeyAction::SelectRight
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::SelectFirst
                | KeyAction::SelectLast
        )
    }
}
