//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::UiStyles;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut table: category, then (keys, description) rows.
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Browsing",
        &[
            ("j/k ↓/↑", "Select card below / above"),
            ("h/l ←/→", "Select card left / right"),
            ("PgDn/PgUp", "Move one screen down / up"),
            ("g/G", "First / last loaded card"),
        ],
    ),
    (
        "Filters",
        &[
            ("/", "Edit search text"),
            ("f", "Show / hide filter panel"),
            ("1-5", "Toggle region (panel open)"),
            ("t", "Edit timezone"),
            ("Enter", "Apply filters and reload"),
            ("Esc", "Leave text field"),
            ("c", "Clear all filters"),
        ],
    ),
    (
        "Loading",
        &[
            ("r", "Load next page / retry"),
            ("x", "Dismiss error"),
        ],
    ),
    (
        "Application",
        &[("?", "Toggle this help"), ("q/Ctrl+c", "Quit")],
    ),
];

/// Width of the key column in the help table.
const KEY_COLUMN_WIDTH: usize = 12;

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, styles: &UiStyles) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    // Clear the background for the overlay
    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(styles.focused_border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    // Dismissal hint on the bottom border
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        styles.muted.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate a rect centered in `area` covering the given percentages.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Build the help content lines grouped by category.
fn build_help_content(styles: &UiStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, (category, rows)) in HELP_SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, styles.section_header)));
        for (keys, description) in rows.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<width$}", keys, width = KEY_COLUMN_WIDTH),
                    styles.key_hint,
                ),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
