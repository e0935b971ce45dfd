use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::ops::validate::validate_transcript;
use crate::tui::app::{App, Mode, SubmitPhase};
use crate::tui::worker::Command;
use crate::util::unicode;

pub(super) fn handle_compose(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Leave the form; the draft stays
        (_, KeyCode::Esc) => app.mode = Mode::Navigate,

        (m, KeyCode::Char('s')) if m.contains(KeyModifiers::CONTROL) => submit(app),

        (_, KeyCode::Enter) => app.compose_buffer.push('\n'),
        (_, KeyCode::Tab) => app.compose_buffer.push('\t'),
        (_, KeyCode::Backspace) => unicode::pop_grapheme(&mut app.compose_buffer),

        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.compose_buffer.push(c);
        }

        _ => {}
    }
}

fn submit(app: &mut App) {
    if app.is_submitting() {
        debug!("submission already in flight");
        return;
    }
    match validate_transcript(&app.compose_buffer) {
        Ok(transcript) => {
            let cmd = Command::Submit(transcript.to_string());
            app.pending.push(cmd);
            app.submit = SubmitPhase::Queued;
        }
        Err(e) => app.notice = Some(e.to_string()),
    }
}
