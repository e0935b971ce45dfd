use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::item::{Priority, Status};
use crate::model::query::SortField;
use crate::tui::app::{App, Mode};
use crate::tui::worker::Command;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Cursor
        (_, KeyCode::Char('j') | KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k') | KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.visible_items().len().saturating_sub(1);
        }

        // Item actions
        (_, KeyCode::Char(' ') | KeyCode::Char('x')) => {
            if let Some(id) = selected_id(app) {
                app.pending.push(Command::Toggle(id));
            }
        }
        (_, KeyCode::Char('d') | KeyCode::Delete) => {
            if let Some(id) = selected_id(app) {
                app.pending.push(Command::Delete(id));
            }
        }
        (_, KeyCode::Char('p')) => {
            if let Some(item) = app.selected_item() {
                let cmd = Command::SetPriority(item.id.clone(), item.priority.cycled());
                app.pending.push(cmd);
            }
        }

        // Filters
        (_, KeyCode::Char('s')) => {
            app.filter.status = next_status_filter(app.filter.status);
            app.clamp_cursor();
        }
        (_, KeyCode::Char('f')) => {
            app.filter.priority = next_priority_filter(app.filter.priority);
            app.clamp_cursor();
        }
        (_, KeyCode::Char('/')) => {
            app.search_before = app.filter.search.clone();
            app.mode = Mode::Search;
        }
        (_, KeyCode::Char('X')) => {
            app.filter.clear();
            app.clamp_cursor();
        }

        // Sorting
        (_, KeyCode::Char('D')) => select_sort(app, SortField::CreatedAt),
        (_, KeyCode::Char('P')) => select_sort(app, SortField::Priority),
        (_, KeyCode::Char('S')) => select_sort(app, SortField::Status),

        // Form and store
        (_, KeyCode::Char('i') | KeyCode::Char('a')) => app.mode = Mode::Compose,
        (_, KeyCode::Char('e')) => {
            if app.list.error.is_some() {
                app.pending.push(Command::ClearError);
            }
        }
        (_, KeyCode::Char('r')) => app.pending.push(Command::Reload),

        _ => {}
    }
}

fn selected_id(app: &App) -> Option<String> {
    app.selected_item().map(|i| i.id.clone())
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.visible_items().len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(len - 1);
}

fn select_sort(app: &mut App, field: SortField) {
    app.sort = app.sort.select(field);
    app.clamp_cursor();
}

/// none → pending → completed → none
fn next_status_filter(current: Option<Status>) -> Option<Status> {
    match current {
        None => Some(Status::Pending),
        Some(Status::Pending) => Some(Status::Completed),
        Some(Status::Completed) => None,
    }
}

/// none → high → medium → low → none
fn next_priority_filter(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Some(Priority::High),
        Some(Priority::High) => Some(Priority::Medium),
        Some(Priority::Medium) => Some(Priority::Low),
        Some(Priority::Low) => None,
    }
}
