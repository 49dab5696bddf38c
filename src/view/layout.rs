//! Screen layout and rendering of the card grid.
//!
//! Pure layout logic: computes the areas for every region of the screen,
//! derives the grid geometry from them, and renders the state into a frame.
//!
//! ```text
//! ┌ header ─────────────────────────────────┐
//! │ search field                            │
//! │ filter panel (when open)                │
//! │ error banner (while in the error state) │
//! │ card grid                               │
//! │ sentinel row                            │
//! └ status bar ─────────────────────────────┘
//! ```

use super::card::CountryCard;
use super::constants::{
    CARD_HEIGHT, CARD_WIDTH, ERROR_BANNER_HEIGHT, FILTER_PANEL_HEIGHT, HEADER_HEIGHT,
    SEARCH_INPUT_HEIGHT, SENTINEL_HEIGHT, STATUS_BAR_HEIGHT,
};
use super::filter_panel::FilterPanel;
use super::search_input::TextField;
use super::styles::UiStyles;
use crate::state::{AppState, FetchState, GridViewport, InputMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ===== Areas =====

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAreas {
    /// Title and active filter summary.
    pub header: Rect,
    /// Search field.
    pub search: Rect,
    /// Filter panel, when open.
    pub filters: Option<Rect>,
    /// Error banner, while a fetch error is showing.
    pub banner: Option<Rect>,
    /// Card grid.
    pub grid: Rect,
    /// Sentinel row under the grid.
    pub sentinel: Rect,
    /// Status bar and key hints.
    pub status: Rect,
}

/// Split the frame into its regions.
pub fn calculate_areas(area: Rect, state: &AppState) -> LayoutAreas {
    let show_filters = state.filters_visible;
    let show_banner = matches!(state.fetch_state(), FetchState::Error { .. });

    let mut constraints = vec![
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(SEARCH_INPUT_HEIGHT),
    ];
    if show_filters {
        constraints.push(Constraint::Length(FILTER_PANEL_HEIGHT));
    }
    if show_banner {
        constraints.push(Constraint::Length(ERROR_BANNER_HEIGHT));
    }
    constraints.extend([
        Constraint::Min(0),
        Constraint::Length(SENTINEL_HEIGHT),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = chunks.iter().copied();
    let mut take = || next.next().unwrap_or_default();

    let header = take();
    let search = take();
    let filters = show_filters.then(&mut take);
    let banner = show_banner.then(&mut take);
    let grid = take();
    let sentinel = take();
    let status = take();

    LayoutAreas {
        header,
        search,
        filters,
        banner,
        grid,
        sentinel,
        status,
    }
}

/// Grid geometry for a grid area: whole cards only, at least one of each.
pub fn grid_viewport(grid: Rect) -> GridViewport {
    GridViewport::new(
        usize::from(grid.width / CARD_WIDTH),
        usize::from(grid.height / CARD_HEIGHT),
    )
}

// ===== Rendering =====

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &UiStyles) {
    let areas = calculate_areas(frame.area(), state);

    render_header(frame, areas.header, state, styles);

    let search = TextField::new(&state.search_input, "Search", styles)
        .placeholder("press / to search by name")
        .focused(state.input_mode == InputMode::EditSearch);
    frame.render_widget(search, areas.search);

    if let Some(area) = areas.filters {
        let panel = FilterPanel::new(
            state.filters(),
            &state.timezone_input,
            state.input_mode == InputMode::EditTimezone,
            styles,
        );
        frame.render_widget(panel, area);
    }

    if let Some(area) = areas.banner {
        render_error_banner(frame, area, state, styles);
    }

    render_grid(frame, areas.grid, state, styles);

    if let Some(text) = sentinel_text(state) {
        let line = Line::from(Span::styled(text, styles.sentinel));
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center),
            areas.sentinel,
        );
    }

    render_status_bar(frame, areas.status, state, styles);
}

/// Render the visible rows of cards.
///
/// Cards stretch to share the full width of the grid area.
fn render_grid(frame: &mut Frame, area: Rect, state: &AppState, styles: &UiStyles) {
    let viewport = grid_viewport(area);
    let columns = viewport.columns;
    let card_width = (area.width / columns as u16).max(1);
    let scroll = state.scroll();
    let first = scroll.first_row * columns;
    let last = first + columns * viewport.visible_rows;

    for (offset, country) in state
        .countries()
        .iter()
        .enumerate()
        .skip(first)
        .take(last - first)
    {
        let index = offset - first;
        let row = (index / columns) as u16;
        let col = (index % columns) as u16;
        let card_area = Rect {
            x: area.x + col * card_width,
            y: area.y + row * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT,
        }
        .intersection(area);

        if card_area.is_empty() {
            continue;
        }
        let card = CountryCard::new(country, offset == scroll.selected, styles);
        frame.render_widget(card, card_area);
    }
}

/// Text of the sentinel row, or `None` while the sentinel is off screen.
pub fn sentinel_text(state: &AppState) -> Option<String> {
    if !state.sentinel_visible() {
        return None;
    }

    let pagination = state.pagination();
    let empty = state.countries().is_empty();
    let text = match pagination.fetch_state() {
        FetchState::Loading if empty => "Loading countries…".to_string(),
        FetchState::Loading => "Loading more countries…".to_string(),
        FetchState::Error { .. } => format!(
            "Could not load page {}. Press r to retry",
            pagination.page()
        ),
        FetchState::Idle if !pagination.has_more() && empty => "No countries found".to_string(),
        FetchState::Idle if !pagination.has_more() => "No more countries to load".to_string(),
        FetchState::Idle => "Press r to load more".to_string(),
    };
    Some(text)
}

fn render_error_banner(frame: &mut Frame, area: Rect, state: &AppState, styles: &UiStyles) {
    let Some(message) = state.pagination().error_message() else {
        return;
    };
    let line = Line::from(vec![
        Span::styled(format!(" ⚠ {} ", message), styles.error),
        Span::styled("  x to dismiss", styles.muted),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the header: title plus a summary of the filters being edited.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: &UiStyles) {
    let filters = state.filters();
    let mut spans = vec![Span::styled(" Countries", styles.card_title)];

    let mut parts = Vec::new();
    let search = filters.search_text().trim();
    if !search.is_empty() {
        parts.push(format!("name: {}", search));
    }
    let regions: Vec<&str> = filters.selected_regions().collect();
    if !regions.is_empty() {
        parts.push(format!("regions: {}", regions.join(", ")));
    }
    let timezone = filters.timezone().trim();
    if !timezone.is_empty() {
        parts.push(format!("timezone: {}", timezone));
    }
    if !parts.is_empty() {
        spans.push(Span::styled(
            format!(" | {}", parts.join(" · ")),
            styles.active_filter,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Build context-sensitive keyboard hints for the input mode.
pub fn build_keyboard_hints(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Browse => "/: search | f: filters | Enter: apply | r: more | ?: help | q: quit",
        InputMode::EditSearch | InputMode::EditTimezone => "Enter: apply | Esc: done editing",
    }
}

/// Render the status bar with counts and key hints.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &UiStyles) {
    let count = state.countries().len();
    let position = if count == 0 {
        "0 countries".to_string()
    } else {
        format!("{}/{} countries", state.scroll().selected + 1, count)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", position), styles.label),
        Span::styled(build_keyboard_hints(state.input_mode), styles.muted),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
