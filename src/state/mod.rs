//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI. Transitions
//! that need data return a [`crate::model::PageRequest`] for the shell to run.

pub mod app_state;
pub mod filter;
pub mod pagination;
pub mod scroll_handler;
pub mod text_input;

// Re-export for convenience
pub use app_state::{AppState, InputMode};
pub use filter::FilterState;
pub use pagination::{Completion, FetchState, Pagination, DEFAULT_BATCH_SIZE, DEFAULT_ERROR_DISPLAY};
pub use scroll_handler::{handle_scroll_action, GridScroll, GridViewport};
pub use text_input::TextInput;
