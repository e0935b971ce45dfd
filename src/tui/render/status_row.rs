use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

const NAVIGATE_HINTS: &str = "i compose  / search  s/f filter  D/P/S sort  ? help  q quit";

/// Render the status row (bottom of screen). A store error takes the row
/// until it is dismissed; otherwise it shows the mode prompt and hints.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let hint_style = Style::default().fg(app.theme.dim).bg(bg);

    let (mut spans, hint) = if let Some(error) = &app.list.error {
        let hint = "e dismiss";
        let budget = width.saturating_sub(hint.len() + 2);
        (
            vec![Span::styled(
                unicode::truncate_to_width(&format!(" \u{2717} {}", error), budget),
                Style::default()
                    .fg(app.theme.red)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )],
            hint,
        )
    } else {
        match app.mode {
            Mode::Navigate => (
                Vec::new(),
                if app.show_key_hints { NAVIGATE_HINTS } else { "" },
            ),
            Mode::Search => (
                vec![
                    Span::styled(
                        format!("/{}", app.filter.search.as_deref().unwrap_or("")),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ),
                    Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
                ],
                "Enter keep  Esc cancel",
            ),
            Mode::Compose => (
                vec![Span::styled(
                    "-- COMPOSE --",
                    Style::default()
                        .fg(app.theme.highlight)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                )],
                "Ctrl-S analyze  Enter newline  Esc back",
            ),
        }
    };

    let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let hint_width = unicode::display_width(hint);
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, hint_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
