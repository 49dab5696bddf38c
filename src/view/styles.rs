//! Color and text styling for the card grid and its chrome.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Explicit setting, bypassing the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== UiStyles =====

/// Styles used across the grid, panels and bars.
///
/// With colors disabled every style falls back to modifiers only, so the
/// selected card and the error banner stay distinguishable on monochrome
/// terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStyles {
    /// Country name on a card.
    pub card_title: Style,
    /// Border of an unselected card.
    pub card_border: Style,
    /// Border of the selected card.
    pub selected_border: Style,
    /// Field labels ("Capital:", "Region:").
    pub label: Style,
    /// Section headers in the help overlay.
    pub section_header: Style,
    /// Key names in hints and help.
    pub key_hint: Style,
    /// Secondary text (status bar, placeholders).
    pub muted: Style,
    /// Error banner.
    pub error: Style,
    /// Sentinel row text.
    pub sentinel: Style,
    /// Focused input border.
    pub focused_border: Style,
    /// Selected region marker.
    pub active_filter: Style,
}

impl UiStyles {
    /// Build the style set for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                card_title: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                card_border: Style::default().fg(Color::DarkGray),
                selected_border: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                label: Style::default().fg(Color::Gray),
                section_header: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                key_hint: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                error: Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
                sentinel: Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
                focused_border: Style::default().fg(Color::Yellow),
                active_filter: Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                card_title: Style::default().add_modifier(Modifier::BOLD),
                card_border: Style::default(),
                selected_border: Style::default().add_modifier(Modifier::BOLD),
                label: Style::default(),
                section_header: Style::default().add_modifier(Modifier::BOLD),
                key_hint: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default().add_modifier(Modifier::DIM),
                error: Style::default().add_modifier(Modifier::REVERSED),
                sentinel: Style::default().add_modifier(Modifier::ITALIC),
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                active_filter: Style::default().add_modifier(Modifier::BOLD),
            }
        }
    }
}

impl Default for UiStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::new(true))
    }
}

// ===== Tests =====
