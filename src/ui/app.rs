//! Terminal browser shell
//!
//! Draws the loading skeleton, blocks on the dataset, mounts a
//! [`QueryEngine`], then runs a single-threaded loop: draw, poll input for at
//! most the time left on the pending debounce, apply the event, tick the
//! engine.

use super::error::{Result, copy_to_clipboard};
use super::events::{EventResult, poll_and_handle};
use super::selection::Selection;
use super::state::{AppState, FocusPane, MessageLevel, Mode};
use super::theme::Theme;
use super::widgets::{
    CategorySelect, DetailsModal, HelpBar, HelpOverlay, SearchBar, Skeleton, StatusBar,
    TemplateList, UseCaseNav,
};
use crate::dataset::{DataSource, DatasetLoader};
use crate::model::TemplateRef;
use crate::query::{Clock, EngineOptions, Location, QueryEngine, SystemClock};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound on how long one input poll blocks
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Settings for an interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseOptions {
    pub engine: EngineOptions,
    /// Lines per result row (1 to 3)
    pub row_height: u16,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            engine: EngineOptions::default(),
            row_height: 2,
        }
    }
}

/// One mounted browser view
pub struct Browser<'a, L: Location, C: Clock = SystemClock> {
    engine: QueryEngine<L, C>,
    state: AppState,
    selection: Selection<'a>,
    theme: Theme,
}

impl<'a, L: Location, C: Clock> Browser<'a, L, C> {
    /// Wrap a mounted engine
    #[must_use]
    pub fn new(engine: QueryEngine<L, C>, row_height: u16, selection: Selection<'a>) -> Self {
        let state = AppState::new(engine.state().raw_query.clone(), row_height);
        let mut browser = Self {
            engine,
            state,
            selection,
            theme: Theme::default(),
        };
        browser.sync_sizes();
        browser
    }

    #[must_use]
    pub const fn engine(&self) -> &QueryEngine<L, C> {
        &self.engine
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection<'a> {
        &self.selection
    }

    #[must_use]
    pub const fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    /// Record under the result cursor
    #[must_use]
    pub fn highlighted(&self) -> Option<&TemplateRef> {
        self.state
            .results
            .cursor()
            .and_then(|i| self.engine.results().get(i))
    }

    fn sync_sizes(&mut self) {
        self.state.set_list_sizes(
            self.engine.results().len(),
            self.engine.available_use_cases().len(),
            self.engine.available_categories().len(),
        );
    }

    /// Results changed underneath the cursor; go back to the top
    fn results_replaced(&mut self) {
        self.state.results.reset();
        self.sync_sizes();
    }

    /// Commit debounced input whose window has elapsed
    pub fn tick(&mut self) {
        if self.engine.tick() {
            self.results_replaced();
        }
    }

    /// How long the loop may block waiting for input
    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        self.engine
            .time_until_debounce()
            .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL))
    }

    /// Apply the outcome of one event
    pub fn apply(&mut self, result: EventResult) {
        match result {
            EventResult::Quit => self.state.should_exit = true,
            EventResult::QueryChanged => {
                self.engine.set_raw_query(self.state.query.value());
            }
            EventResult::OpenDetails => {
                if self.engine.flush() {
                    self.results_replaced();
                }
                if let Some(record) = self.highlighted().cloned() {
                    self.selection.select(&record);
                    self.state.mode = Mode::Details;
                }
            }
            EventResult::CloseDetails => self.selection.clear(),
            EventResult::SelectUseCase(row) => {
                let use_case = row
                    .checked_sub(1)
                    .and_then(|i| self.engine.available_use_cases().get(i).cloned());
                self.engine.select_use_case(use_case);
                self.state.category_cursor = 0;
                self.results_replaced();
            }
            EventResult::ToggleCategory(index) => {
                if let Some(category) = self.engine.available_categories().get(index).cloned() {
                    self.engine.toggle_category(&category);
                    self.results_replaced();
                }
            }
            EventResult::CycleSort => {
                let key = self.engine.cycle_sort();
                self.results_replaced();
                self.state
                    .add_message(MessageLevel::Info, format!("Sorted by: {}", key.label()));
            }
            EventResult::ClearAll => {
                if self.engine.can_clear() {
                    self.engine.clear_all();
                    self.state.query.clear();
                    self.results_replaced();
                    self.state.add_message(MessageLevel::Info, "Cleared search and filters");
                } else {
                    self.state.add_message(MessageLevel::Info, "Nothing to clear");
                }
            }
            EventResult::CopyShare => {
                let share = format!("?{}", self.engine.share_string());
                match copy_to_clipboard(&share) {
                    Ok(()) => self
                        .state
                        .add_message(MessageLevel::Success, format!("Copied {share}")),
                    Err(e) => self.state.add_message(MessageLevel::Error, e.to_string()),
                }
            }
            EventResult::Continue | EventResult::Ignored => {}
        }
    }

    /// Draw the full screen
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(5),    // Content
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let query_state = self.engine.state();
        let search_bar = SearchBar::new(
            self.state.query.value(),
            self.state.query.cursor(),
            &self.theme,
        )
        .counts(self.engine.results().len(), self.engine.total())
        .pending(query_state.is_query_pending());
        frame.render_widget(search_bar, main_layout[0]);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(main_layout[1]);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(content[0]);

        let use_cases = UseCaseNav::new(
            self.engine.available_use_cases(),
            query_state.selected_use_case.as_deref(),
            self.state.use_case_cursor,
            &self.theme,
        )
        .focused(self.state.focus == FocusPane::UseCases);
        frame.render_widget(use_cases, side[0]);

        let categories = CategorySelect::new(
            self.engine.available_categories(),
            &query_state.selected_categories,
            self.state.category_cursor,
            &self.theme,
        )
        .focused(self.state.focus == FocusPane::Categories);
        frame.render_widget(categories, side[1]);

        // Borders take two lines
        self.state
            .results
            .set_viewport(content[1].height.saturating_sub(2));
        let list = TemplateList::new(self.engine.results(), &self.state.results, &self.theme)
            .focused(self.state.focus == FocusPane::Results);
        frame.render_widget(list, content[1]);

        let share = self.engine.share_string();
        let filters = usize::from(query_state.selected_use_case.is_some())
            + query_state.selected_categories.len();
        let status = StatusBar::new(&self.theme, query_state.sort_key, &share)
            .filters(filters)
            .can_clear(self.engine.can_clear())
            .message(self.state.latest_message());
        frame.render_widget(status, main_layout[2]);

        frame.render_widget(HelpBar::new(&self.state.hints, &self.theme), main_layout[3]);

        match self.state.mode {
            Mode::Help => frame.render_widget(HelpOverlay::new(&self.theme), area),
            Mode::Details => {
                if let Some(record) = self.selection.current() {
                    frame.render_widget(DetailsModal::new(record, &self.theme), area);
                }
            }
            Mode::Normal => {}
        }
    }
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Cleanup terminal after TUI
fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

/// Run an interactive session until the user quits
///
/// `on_select` is called every time the selected template changes.
///
/// # Errors
///
/// Returns `UiError` if the terminal fails, the dataset cannot be loaded,
/// or the location cannot be read at mount.
pub fn run<'a, S, L>(
    loader: &DatasetLoader<S>,
    location: L,
    options: BrowseOptions,
    on_select: impl FnMut(Option<&TemplateRef>) + 'a,
) -> Result<()>
where
    S: DataSource,
    L: Location,
{
    let mut terminal = setup_terminal()?;

    let result = run_session(&mut terminal, loader, location, options, on_select);

    // Cleanup terminal (always, even on error)
    if let Err(e) = cleanup_terminal() {
        tracing::warn!(error = %e, "terminal cleanup failed");
    }

    result
}

fn run_session<'a, S, L>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    loader: &DatasetLoader<S>,
    location: L,
    options: BrowseOptions,
    on_select: impl FnMut(Option<&TemplateRef>) + 'a,
) -> Result<()>
where
    S: DataSource,
    L: Location,
{
    let theme = Theme::default();
    terminal.draw(|frame| {
        frame.render_widget(Skeleton::new(&theme, options.row_height), frame.area());
    })?;

    let records = loader.load()?;
    let engine = QueryEngine::mount(records, location, SystemClock, options.engine)?;
    info!(total = engine.total(), "browser ready");

    let mut browser = Browser::new(engine, options.row_height, Selection::new(on_select));

    while !browser.should_exit() {
        terminal.draw(|frame| browser.render(frame))?;

        let timeout = browser.poll_timeout();
        let result = poll_and_handle(browser.state_mut(), timeout)?;
        if result != EventResult::Continue && result != EventResult::Ignored {
            debug!(?result, "event");
        }
        browser.apply(result);
        browser.tick();
        browser.state_mut().cleanup_messages();
    }

    info!("browser closed");
    Ok(())
}
