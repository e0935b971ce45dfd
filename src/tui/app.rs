use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;
use tracing::{info, warn};

use crate::io::http_store::HttpStore;
use crate::model::config::ClientConfig;
use crate::model::item::ActionItem;
use crate::model::query::{FilterOptions, SortOptions};
use crate::ops::controller::ListState;
use crate::ops::view;

use super::input;
use super::render;
use super::theme::Theme;
use super::worker::{Command, StoreWorker, WorkerEvent};

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search filter; the list narrows as you type
    Search,
    /// Editing the transcript form
    Compose,
}

/// Where a transcript submission started from this UI stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    /// `Submit` queued; the worker has not reported busy yet
    Queued,
    /// The worker reported busy for it
    Running,
}

/// Main application state
pub struct App {
    /// Latest snapshot from the store worker
    pub list: ListState,
    pub filter: FilterOptions,
    pub sort: SortOptions,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Server shown in the title row
    pub server_url: String,
    /// Cursor index into the visible (filtered, sorted) list
    pub cursor: usize,
    /// Scroll offset (first visible row)
    pub scroll_offset: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// Transcript being composed
    pub compose_buffer: String,
    /// Search filter to restore if a search is cancelled
    pub search_before: Option<String>,
    /// Blocking popup message; all input goes to dismissing it
    pub notice: Option<String>,
    /// Commands waiting to be handed to the worker
    pub pending: Vec<Command>,
    /// Local submission tracking, set the moment `Submit` is queued
    pub submit: SubmitPhase,
}

impl App {
    pub fn new(config: &ClientConfig) -> Self {
        App {
            list: ListState::default(),
            filter: FilterOptions::default(),
            sort: SortOptions::default(),
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            server_url: config.server.url.clone(),
            cursor: 0,
            scroll_offset: 0,
            show_help: false,
            compose_buffer: String::new(),
            search_before: None,
            notice: None,
            pending: Vec::new(),
            submit: SubmitPhase::Idle,
        }
    }

    /// A submission is queued or in flight
    pub fn is_submitting(&self) -> bool {
        self.list.busy || self.submit != SubmitPhase::Idle
    }

    /// The derived view the list renders
    pub fn visible_items(&self) -> Vec<&ActionItem> {
        view::derive_view(&self.list.items, &self.filter, self.sort)
    }

    pub fn selected_item(&self) -> Option<&ActionItem> {
        self.visible_items().get(self.cursor).copied()
    }

    /// Keep the cursor inside the visible list
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_items().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Case-insensitive regex for the active search term, for highlighting
    pub fn search_re(&self) -> Option<Regex> {
        let term = self.filter.search_term()?;
        Regex::new(&format!("(?i){}", regex::escape(term))).ok()
    }

    /// Apply an event from the store worker
    pub fn apply_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::State(state) => {
                self.submit = match (self.submit, state.busy) {
                    (SubmitPhase::Queued, true) => SubmitPhase::Running,
                    // Busy dropped after our submit ran: it failed or finished
                    (SubmitPhase::Running, false) => SubmitPhase::Idle,
                    (phase, _) => phase,
                };
                // Follow the selected item across reloads when it survives
                let selected = self.selected_item().map(|i| i.id.clone());
                self.list = state;
                let pos = selected
                    .and_then(|id| self.visible_items().iter().position(|i| i.id == id));
                if let Some(pos) = pos {
                    self.cursor = pos;
                }
                self.clamp_cursor();
            }
            WorkerEvent::Submitted { created } => {
                info!(created, "transcript submitted");
                self.submit = SubmitPhase::Idle;
                self.compose_buffer.clear();
                if self.mode == Mode::Compose {
                    self.mode = Mode::Navigate;
                }
            }
        }
    }
}

/// Run the TUI application
pub fn run(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let worker = StoreWorker::start(HttpStore::from_config(&config.server))?;
    let mut app = App::new(&config);
    app.pending.push(Command::Reload);
    info!(url = %config.server.url, "starting tui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app, &worker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &StoreWorker,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        for cmd in app.pending.drain(..) {
            if !worker.send(cmd) {
                warn!("store worker is gone");
                return Err("store worker stopped unexpectedly".into());
            }
        }
        for event in worker.poll() {
            app.apply_event(event);
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory_store::{item, sample_items};
    use crate::model::item::{Priority, Status};
    use crate::model::query::{SortDirection, SortField};
    use crate::tui::render::test_helpers::app_with;

    #[test]
    fn test_visible_items_default_newest_first() {
        let app = app_with(sample_items());
        let ids: Vec<&str> = app.visible_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_cursor_follows_item_across_reload() {
        let mut app = app_with(sample_items());
        app.cursor = 1; // item "1"
        let mut items = sample_items();
        items.push(item("3", "Newest", Status::Pending, Priority::Low, "2024-01-20T10:00:00Z"));
        app.apply_event(WorkerEvent::State(ListState {
            items,
            ..Default::default()
        }));
        assert_eq!(app.selected_item().map(|i| i.id.as_str()), Some("1"));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_cursor_clamped_when_item_removed() {
        let mut app = app_with(sample_items());
        app.cursor = 1;
        app.apply_event(WorkerEvent::State(ListState {
            items: vec![sample_items().remove(1)],
            ..Default::default()
        }));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_submitted_clears_form() {
        let mut app = app_with(Vec::new());
        app.mode = Mode::Compose;
        app.compose_buffer = "We agreed to ship on Friday.".into();
        app.apply_event(WorkerEvent::Submitted { created: 1 });
        assert!(app.compose_buffer.is_empty());
        assert_eq!(app.mode, Mode::Navigate);
    }

    fn state(busy: bool, error: Option<&str>) -> WorkerEvent {
        WorkerEvent::State(ListState {
            items: Vec::new(),
            error: error.map(String::from),
            busy,
        })
    }

    #[test]
    fn test_submit_phase_survives_stale_idle_snapshot() {
        let mut app = app_with(Vec::new());
        app.submit = SubmitPhase::Queued;
        // A reload queued before the submit still reports idle
        app.apply_event(state(false, None));
        assert!(app.is_submitting());
        app.apply_event(state(true, None));
        assert_eq!(app.submit, SubmitPhase::Running);
    }

    #[test]
    fn test_failed_submit_clears_phase() {
        let mut app = app_with(Vec::new());
        app.submit = SubmitPhase::Queued;
        app.apply_event(state(true, None));
        app.apply_event(state(false, Some("quota exceeded")));
        assert_eq!(app.submit, SubmitPhase::Idle);
        assert!(!app.is_submitting());
    }

    #[test]
    fn test_submitted_clears_phase() {
        let mut app = app_with(Vec::new());
        app.submit = SubmitPhase::Running;
        app.apply_event(WorkerEvent::Submitted { created: 2 });
        assert!(!app.is_submitting());
    }

    #[test]
    fn test_search_re_escapes_term() {
        let mut app = app_with(Vec::new());
        assert!(app.search_re().is_none());
        app.filter.search = Some("a.b".into());
        let re = app.search_re().unwrap();
        assert!(re.is_match("A.B"));
        assert!(!re.is_match("axb"));
    }

    #[test]
    fn test_sort_applies_to_view() {
        let mut app = app_with(sample_items());
        app.sort = SortOptions::new(SortField::Priority, SortDirection::Desc);
        assert_eq!(app.selected_item().map(|i| i.id.as_str()), Some("1"));
    }
}
