use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

/// Render the title row: app name, counts, and either the busy marker or the
/// server address on the right
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let total = app.list.items.len();
    let shown = app.visible_items().len();
    let mut counts = format!("Showing {} of {} action items", shown, total);
    if app.filter.is_active() {
        counts.push_str(" (filtered)");
    }

    let mut spans = vec![
        Span::styled(
            " InsightBoard",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled(counts, Style::default().fg(app.theme.text).bg(bg)),
    ];

    let (right, right_style) = if app.list.busy {
        (
            "analyzing\u{2026} ".to_string(),
            Style::default().fg(app.theme.yellow).bg(bg),
        )
    } else {
        (
            format!("{} ", app.server_url),
            Style::default().fg(app.theme.dim).bg(bg),
        )
    };
    let left_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let right_width = unicode::display_width(&right);
    if left_width + right_width < width {
        spans.push(Span::styled(
            " ".repeat(width - left_width - right_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(right, right_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
