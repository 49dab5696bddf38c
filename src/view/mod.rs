//! TUI rendering and the event loop.

mod card;
pub mod constants;
mod filter_panel;
mod help;
pub mod layout;
mod search_input;
mod styles;

pub use card::{truncate_to_width, CountryCard};
pub use filter_panel::FilterPanel;
pub use help::render_help_overlay;
pub use layout::{calculate_areas, grid_viewport, render_layout, sentinel_text, LayoutAreas};
pub use search_input::TextField;
pub use styles::{ColorConfig, UiStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, FetchError, KeyAction, PageRequest, PageResponse};
use crate::source::{FetchWorker, HttpCountrySource};
use crate::state::text_input::{
    handle_backspace, handle_char_input, handle_cursor_left, handle_cursor_right, handle_delete,
    handle_end, handle_home,
};
use crate::state::{AppState, FilterState, InputMode, Pagination};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The HTTP client could not be built
    #[error("Data source error: {0}")]
    Source(#[from] FetchError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    worker: FetchWorker,
    styles: UiStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen. If setup fails
    /// part way, the terminal is restored before the error is returned.
    pub fn new(app_state: AppState, worker: FetchWorker, styles: UiStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let terminal = setup_or_restore(
            || {
                let mut stdout = io::stdout();
                stdout.execute(EnterAlternateScreen)?;
                Terminal::new(CrosstermBackend::new(stdout))
            },
            restore_terminal,
        )?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            worker,
            styles,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Responses from the fetch
    /// worker are applied between input events.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(100);

        self.start();
        self.draw()?;

        loop {
            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    // Release/repeat events are reported on some platforms
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                    }
                    _ => {}
                }
            }

            self.drain_responses();
            self.app_state.tick(Instant::now());
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Issue the initial page load.
    fn start(&mut self) {
        let request = self.app_state.start();
        self.dispatch(request);
    }

    /// Hand a request to the fetch worker.
    ///
    /// If the worker is gone the request fails immediately, so the state
    /// leaves `Loading` instead of waiting forever.
    fn dispatch(&mut self, request: Option<PageRequest>) {
        let Some(request) = request else {
            return;
        };
        if let Err(error) = self.worker.submit(request.clone()) {
            warn!(page = request.page(), error = %error, "Could not submit request");
            let response = PageResponse::for_request(&request, Err(error));
            let follow_up = self.app_state.apply_response(response, Instant::now());
            self.dispatch(follow_up);
        }
    }

    /// Apply every response the worker has finished.
    ///
    /// If the worker has died, the outstanding request fails with
    /// `WorkerGone` so the state does not stay in `Loading`.
    fn drain_responses(&mut self) {
        loop {
            match self.worker.try_recv() {
                Ok(Some(response)) => {
                    let follow_up = self.app_state.apply_response(response, Instant::now());
                    self.dispatch(follow_up);
                }
                Ok(None) => return,
                Err(error) => {
                    if let Some(ticket) = self.app_state.pagination().in_flight() {
                        warn!(page = ticket.page, error = %error, "Fetch worker died mid-request");
                    }
                    let follow_up = self.app_state.fail_in_flight(error, Instant::now());
                    self.dispatch(follow_up);
                    return;
                }
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C quits from every mode, text fields included
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.help_visible {
            return self.handle_help_key(key);
        }

        match self.app_state.input_mode {
            InputMode::EditSearch | InputMode::EditTimezone => {
                self.handle_edit_key(key);
                false
            }
            InputMode::Browse => self.handle_browse_key(key),
        }
    }

    /// Only closing the overlay and quitting work while help is shown.
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc {
            self.app_state.help_visible = false;
            return false;
        }
        match self.key_bindings.get(key) {
            Some(KeyAction::Help) => {
                self.app_state.help_visible = false;
                false
            }
            Some(KeyAction::Quit) => true,
            _ => false,
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.app_state.leave_input(),
            KeyCode::Enter => {
                let request = self.app_state.reset_and_reload();
                self.dispatch(request);
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.app_state.edit_input(|input| handle_char_input(input, ch));
            }
            KeyCode::Backspace => self.app_state.edit_input(handle_backspace),
            KeyCode::Delete => self.app_state.edit_input(handle_delete),
            KeyCode::Left => self.app_state.edit_input(handle_cursor_left),
            KeyCode::Right => self.app_state.edit_input(handle_cursor_right),
            KeyCode::Home => self.app_state.edit_input(handle_home),
            KeyCode::End => self.app_state.edit_input(handle_end),
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        // Esc closes the innermost thing that is open
        if key.code == KeyCode::Esc {
            if self.app_state.filters_visible {
                self.app_state.toggle_filters_panel();
            } else {
                self.app_state.dismiss_error();
            }
            return false;
        }

        let action = match self.key_bindings.get(key) {
            Some(action) => action,
            None => return false,
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.app_state.help_visible = true,
            action if action.is_selection() => {
                let request = self.app_state.handle_selection(action);
                self.dispatch(request);
            }
            KeyAction::StartSearch => self.app_state.begin_search(),
            KeyAction::EditTimezone => self.app_state.begin_timezone(),
            KeyAction::ToggleFilters => self.app_state.toggle_filters_panel(),
            KeyAction::ToggleRegion(index) => {
                if self.app_state.filters_visible {
                    self.app_state.toggle_region(index);
                }
            }
            KeyAction::ApplyFilters => {
                info!("Applying filters");
                let request = self.app_state.reset_and_reload();
                self.dispatch(request);
            }
            KeyAction::ClearFilters => {
                info!("Clearing filters");
                let request = self.app_state.clear_filters();
                self.dispatch(request);
            }
            KeyAction::LoadMore => {
                let request = self.app_state.load_next_page();
                self.dispatch(request);
            }
            KeyAction::DismissError => {
                self.app_state.dismiss_error();
            }
            _ => {}
        }
        false
    }

    /// Render the current frame
    ///
    /// Reports the grid geometry to the state first; a viewport that shows
    /// the sentinel may start a load.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        let areas = calculate_areas(frame_area, &self.app_state);
        let request = self.app_state.set_viewport(grid_viewport(areas.grid));
        self.dispatch(request);

        let styles = self.styles;
        self.terminal.draw(|frame| {
            render_layout(frame, &self.app_state, &styles);
            if self.app_state.help_visible {
                render_help_overlay(frame, &styles);
            }
        })?;

        Ok(())
    }
}

/// Initialize and run the TUI application against the configured API.
///
/// Builds the HTTP source and the fetch worker, then runs the event loop.
/// The terminal is restored even if the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(
    config: &ResolvedConfig,
    filters: FilterState,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let source = HttpCountrySource::new(config.api_url.clone(), config.request_timeout)?;
    info!(api_url = %config.api_url, batch_size = config.batch_size, "Starting country browser");
    let worker = FetchWorker::spawn(source);

    let pagination = Pagination::new(config.batch_size, config.error_display);
    let app_state = AppState::new(pagination).with_filters(filters);
    let styles = UiStyles::with_color_config(colors);

    let mut app = TuiApp::new(app_state, worker, styles)?;
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Run terminal setup that follows `enable_raw_mode`, undoing raw mode with
/// `restore` if it fails.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> Result<(), TuiError>,
) -> Result<T, TuiError> {
    setup().map_err(|error| {
        if let Err(restore_error) = restore() {
            warn!(error = %restore_error, "Failed to restore terminal after setup error");
        }
        TuiError::Io(error)
    })
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

// ===== Test Helpers =====
