//! Card grid selection and scrolling (pure).
//!
//! The card list is laid out as a grid of `columns` cards per row, of which
//! `visible_rows` rows fit on screen. Selection moves by card; the viewport
//! follows the selection. The sentinel row sits below the last row of cards;
//! it counts as visible once that last row is on screen.

use crate::model::KeyAction;

// ===== GridViewport =====

/// Grid geometry for the current terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridViewport {
    /// Cards per row. Always at least 1.
    pub columns: usize,
    /// Card rows that fit in the viewport. Always at least 1.
    pub visible_rows: usize,
}

impl GridViewport {
    /// Create a viewport, clamping both dimensions to at least 1.
    pub fn new(columns: usize, visible_rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            visible_rows: visible_rows.max(1),
        }
    }

    /// Number of card rows needed for `item_count` cards.
    pub fn total_rows(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.columns)
    }
}

impl Default for GridViewport {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

// ===== GridScroll =====

/// Selected card and first visible row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridScroll {
    /// Index of the selected card.
    pub selected: usize,
    /// First card row shown in the viewport.
    pub first_row: usize,
}

impl GridScroll {
    /// Row of the selected card.
    pub fn selected_row(&self, viewport: GridViewport) -> usize {
        self.selected / viewport.columns
    }

    /// Clamp selection to the list and scroll so it is visible.
    pub fn clamped(mut self, item_count: usize, viewport: GridViewport) -> Self {
        if item_count == 0 {
            return Self::default();
        }
        self.selected = self.selected.min(item_count - 1);

        let row = self.selected_row(viewport);
        if row < self.first_row {
            self.first_row = row;
        } else if row >= self.first_row + viewport.visible_rows {
            self.first_row = row + 1 - viewport.visible_rows;
        }

        let max_first = viewport
            .total_rows(item_count)
            .saturating_sub(viewport.visible_rows);
        self.first_row = self.first_row.min(max_first);
        self
    }

    /// Whether the sentinel row below the grid is on screen.
    ///
    /// An empty list always shows the sentinel.
    pub fn sentinel_visible(&self, item_count: usize, viewport: GridViewport) -> bool {
        self.first_row + viewport.visible_rows >= viewport.total_rows(item_count)
    }
}

/// Apply a selection action.
///
/// Non-selection actions return the scroll unchanged.
pub fn handle_scroll_action(
    scroll: GridScroll,
    action: KeyAction,
    item_count: usize,
    viewport: GridViewport,
) -> GridScroll {
    if item_count == 0 {
        return GridScroll::default();
    }

    let last = item_count - 1;
    let columns = viewport.columns;
    let page = columns * viewport.visible_rows;
    let current = scroll.selected.min(last);

    let selected = match action {
        KeyAction::SelectUp => current.checked_sub(columns).unwrap_or(current),
        KeyAction::SelectDown => {
            let next = current + columns;
            if next <= last {
                next
            } else if current / columns < last / columns {
                // Partial last row: land on its last card
                last
            } else {
                current
            }
        }
        KeyAction::SelectLeft => current.saturating_sub(1),
        KeyAction::SelectRight => (current + 1).min(last),
        KeyAction::PageUp => current.saturating_sub(page),
        KeyAction::PageDown => (current + page).min(last),
        KeyAction::SelectFirst => 0,
        KeyAction::SelectLast => last,
        _ => return scroll,
    };

    GridScroll {
        selected,
        first_row: scroll.first_row,
    }
    .clamped(item_count, viewport)
}

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
