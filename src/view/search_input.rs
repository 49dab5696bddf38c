//! Text field widget for the search and timezone inputs.

use super::styles::UiStyles;
use crate::state::TextInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered single-line input.
///
/// When focused, the character under the cursor is drawn inverted. An empty
/// unfocused field shows its placeholder.
pub struct TextField<'a> {
    input: &'a TextInput,
    title: &'a str,
    placeholder: &'a str,
    focused: bool,
    styles: &'a UiStyles,
}

impl<'a> TextField<'a> {
    /// Create new TextField widget.
    pub fn new(input: &'a TextInput, title: &'a str, styles: &'a UiStyles) -> Self {
        Self {
            input,
            title,
            placeholder: "",
            focused: false,
            styles,
        }
    }

    /// Text shown while the field is empty and unfocused.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Whether the field has keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Input contents as a line, with the cursor drawn when `focused`.
pub fn input_line(
    input: &TextInput,
    focused: bool,
    placeholder: &str,
    styles: &UiStyles,
) -> Line<'static> {
    if !focused {
        if input.text().is_empty() {
            return Line::from(Span::styled(placeholder.to_string(), styles.muted));
        }
        return Line::from(input.text().to_string());
    }

    // Split text into before/after cursor for rendering cursor
    let (before, after) = input.split_at_cursor();
    let mut after_chars = after.chars();
    let cursor_char = after_chars
        .next()
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());

    Line::from(vec![
        Span::raw(before.to_string()),
        Span::styled(
            cursor_char,
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(after_chars.collect::<String>()),
    ])
}

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.styles.focused_border
        } else {
            self.styles.card_border
        };

        let line = input_line(self.input, self.focused, self.placeholder, self.styles);
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", self.title)),
        );

        paragraph.render(area, buf);
    }
}
