//! Region and timezone filter panel.

use super::search_input::input_line;
use super::styles::UiStyles;
use crate::model::REGIONS;
use crate::state::{FilterState, TextInput};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Region checkboxes on the first line, timezone field on the second.
///
/// Checkbox state reflects the filters being edited, which may differ from
/// the list on screen until they are applied.
pub struct FilterPanel<'a> {
    filters: &'a FilterState,
    timezone: &'a TextInput,
    timezone_focused: bool,
    styles: &'a UiStyles,
}

impl<'a> FilterPanel<'a> {
    /// Create the panel widget.
    pub fn new(
        filters: &'a FilterState,
        timezone: &'a TextInput,
        timezone_focused: bool,
        styles: &'a UiStyles,
    ) -> Self {
        Self {
            filters,
            timezone,
            timezone_focused,
            styles,
        }
    }

    fn region_line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(REGIONS.len() * 3);
        for (index, region) in REGIONS.iter().enumerate() {
            let selected = self.filters.is_region_selected(region);
            let mark = if selected { "[x]" } else { "[ ]" };
            let style = if selected {
                self.styles.active_filter
            } else {
                self.styles.label
            };
            spans.push(Span::styled(format!("{}", index + 1), self.styles.key_hint));
            spans.push(Span::styled(format!(" {} {}", mark, region), style));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    }

    fn timezone_line(&self) -> Line<'static> {
        let field = input_line(
            self.timezone,
            self.timezone_focused,
            "any (t to edit)",
            self.styles,
        );
        let mut spans = vec![Span::styled("Timezone: ", self.styles.label)];
        spans.extend(field.spans);
        Line::from(spans)
    }
}

impl Widget for FilterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.filters.applied_filter_count() {
            0 => " Filters ".to_string(),
            n => format!(" Filters ({}) ", n),
        };
        let border_style = if self.timezone_focused {
            self.styles.focused_border
        } else {
            self.styles.card_border
        };

        Paragraph::new(vec![self.region_line(), self.timezone_line()])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            )
            .render(area, buf);
    }
}
