//! Single-line text input handling (pure state transitions).
//!
//! Backs the search and timezone fields. All functions are pure - no side
//! effects, testable without TUI. The cursor is a char index, so multi-byte
//! input never splits a code point.

// ===== TextInput =====

/// Editable single-line text with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    /// Input pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before and after the cursor.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_offset(self.cursor))
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}

/// Insert the character at the cursor and advance the cursor.
pub fn handle_char_input(mut input: TextInput, ch: char) -> TextInput {
    let offset = input.byte_offset(input.cursor);
    input.text.insert(offset, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut input: TextInput) -> TextInput {
    if input.cursor == 0 {
        return input;
    }
    let offset = input.byte_offset(input.cursor - 1);
    input.text.remove(offset);
    input.cursor -= 1;
    input
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut input: TextInput) -> TextInput {
    if input.cursor >= input.char_len() {
        return input;
    }
    let offset = input.byte_offset(input.cursor);
    input.text.remove(offset);
    input
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut input: TextInput) -> TextInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move cursor right by one position. Saturates at the text length.
pub fn handle_cursor_right(mut input: TextInput) -> TextInput {
    input.cursor = (input.cursor + 1).min(input.char_len());
    input
}

/// Move cursor to the start.
pub fn handle_home(mut input: TextInput) -> TextInput {
    input.cursor = 0;
    input
}

/// Move cursor to the end.
pub fn handle_end(mut input: TextInput) -> TextInput {
    input.cursor = input.char_len();
    input
}

// ===== Tests =====

#[cfg(test)]
#[path = "text_input_tests.rs"]
mod tests;
