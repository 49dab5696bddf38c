//! Country card widget.

use super::styles::UiStyles;
use crate::model::Country;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// One country rendered as a bordered card.
pub struct CountryCard<'a> {
    country: &'a Country,
    selected: bool,
    styles: &'a UiStyles,
}

impl<'a> CountryCard<'a> {
    /// Create a card for `country`.
    pub fn new(country: &'a Country, selected: bool, styles: &'a UiStyles) -> Self {
        Self {
            country,
            selected,
            styles,
        }
    }

    fn title(&self) -> String {
        match self.country.flag_glyph() {
            Some(flag) => format!("{} {}", flag, self.country.name.common),
            None => self.country.name.common.clone(),
        }
    }

    fn field(&self, label: &'static str, value: String, width: usize) -> Line<'static> {
        let label_text = format!("{}: ", label);
        let remaining = width.saturating_sub(label_text.width());
        Line::from(vec![
            Span::styled(label_text, self.styles.label),
            Span::raw(truncate_to_width(&value, remaining)),
        ])
    }
}

impl Widget for CountryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_width = usize::from(area.width.saturating_sub(2));
        let border_style = if self.selected {
            self.styles.selected_border
        } else {
            self.styles.card_border
        };

        let title = truncate_to_width(&self.title(), inner_width.saturating_sub(2));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(format!(" {} ", title), self.styles.card_title));

        let lines = vec![
            self.field(
                "Capital",
                self.country.capital_display().to_string(),
                inner_width,
            ),
            self.field(
                "Region",
                self.country.region_display().to_string(),
                inner_width,
            ),
            self.field("Population", self.country.population_display(), inner_width),
            self.field("Timezones", self.country.timezones_display(), inner_width),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// Cut `text` to at most `max_width` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - ELLIPSIS.width().unwrap_or(1);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}
