//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Width of one country card in columns, border included.
///
/// The grid fits as many cards per row as the terminal width allows.
pub const CARD_WIDTH: u16 = 30;

/// Height of one country card in lines, border included.
///
/// Capital, region, population and timezones between two border lines. The
/// name sits in the top border.
pub const CARD_HEIGHT: u16 = 6;

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the search input widget in lines.
///
/// Includes border and text input area.
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the filter panel in lines (border + regions + timezone).
pub const FILTER_PANEL_HEIGHT: u16 = 4;

/// Height of the error banner in lines.
pub const ERROR_BANNER_HEIGHT: u16 = 1;

/// Height of the sentinel row below the grid.
pub const SENTINEL_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for status text and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
