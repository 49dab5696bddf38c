//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::model::REGIONS;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Only consulted while the card grid has focus. Text fields take raw
/// characters instead.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Shifted symbols such as `?` arrive with SHIFT on some terminals and
    /// without it on others; both forms match the unshifted binding.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        if let Some(action) = self.bindings.get(&key) {
            return Some(*action);
        }
        match key.code {
            KeyCode::Char(ch) if key.modifiers == KeyModifiers::SHIFT && !ch.is_alphabetic() => self
                .bindings
                .get(&KeyEvent::new(key.code, KeyModifiers::NONE))
                .copied(),
            _ => None,
        }
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Vim-style card selection
        keys.bind(KeyCode::Char('k'), none, KeyAction::SelectUp);
        keys.bind(KeyCode::Char('j'), none, KeyAction::SelectDown);
        keys.bind(KeyCode::Char('h'), none, KeyAction::SelectLeft);
        keys.bind(KeyCode::Char('l'), none, KeyAction::SelectRight);
        keys.bind(KeyCode::Char('g'), none, KeyAction::SelectFirst);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::SelectLast);

        // Arrow keys
        keys.bind(KeyCode::Up, none, KeyAction::SelectUp);
        keys.bind(KeyCode::Down, none, KeyAction::SelectDown);
        keys.bind(KeyCode::Left, none, KeyAction::SelectLeft);
        keys.bind(KeyCode::Right, none, KeyAction::SelectRight);
        keys.bind(KeyCode::Home, none, KeyAction::SelectFirst);
        keys.bind(KeyCode::End, none, KeyAction::SelectLast);

        // Page navigation
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);

        // Filters
        keys.bind(KeyCode::Char('/'), none, KeyAction::StartSearch);
        keys.bind(KeyCode::Char('t'), none, KeyAction::EditTimezone);
        keys.bind(KeyCode::Char('f'), none, KeyAction::ToggleFilters);
        keys.bind(KeyCode::Enter, none, KeyAction::ApplyFilters);
        keys.bind(KeyCode::Char('c'), none, KeyAction::ClearFilters);
        for (index, digit) in ('1'..='9').take(REGIONS.len()).enumerate() {
            keys.bind(KeyCode::Char(digit), none, KeyAction::ToggleRegion(index));
        }

        // Loading
        keys.bind(KeyCode::Char('r'), none, KeyAction::LoadMore);
        keys.bind(KeyCode::Char('x'), none, KeyAction::DismissError);

        // Application controls
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        keys.bind(KeyCode::Char('?'), none, KeyAction::Help);

        keys
    }
}
