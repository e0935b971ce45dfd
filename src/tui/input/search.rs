use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// The search filter is edited in place, so the list narrows as you type
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel: restore the filter from before the search started
        (_, KeyCode::Esc) => {
            app.filter.search = app.search_before.take();
            app.mode = Mode::Navigate;
        }

        // Keep the filter
        (_, KeyCode::Enter) => {
            app.search_before = None;
            if app.filter.search.as_deref() == Some("") {
                app.filter.search = None;
            }
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Backspace) => {
            if let Some(search) = &mut app.filter.search {
                unicode::pop_grapheme(search);
            }
        }

        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.filter.search = None;
        }

        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.filter.search.get_or_insert_with(String::new).push(c);
        }

        _ => {}
    }
    app.clamp_cursor();
}
