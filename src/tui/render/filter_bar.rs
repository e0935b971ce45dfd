use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

/// Render the filter/sort bar: one `key:value` chip per filter, active ones
/// highlighted, with the sort order on the right
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let idle_style = Style::default().fg(app.theme.text).bg(bg);
    let active_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let status = app.filter.status.map(|s| s.as_str());
    let priority = app.filter.priority.map(|p| p.as_str());
    let search = app.filter.search_term().map(|s| format!("\"{}\"", s));

    let mut spans = vec![Span::styled(" ", label_style)];
    for (name, value) in [
        ("status", status.map(str::to_string)),
        ("priority", priority.map(str::to_string)),
        ("search", search),
    ] {
        spans.push(Span::styled(format!("{}:", name), label_style));
        match value {
            Some(v) => spans.push(Span::styled(v, active_style)),
            None => spans.push(Span::styled("all", idle_style)),
        }
        spans.push(Span::styled("  ", label_style));
    }
    if app.filter.is_active() {
        spans.push(Span::styled("X clear", label_style));
    }

    let right = format!("sort:{} ", app.sort.label());
    let left_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let right_width = unicode::display_width(&right);
    if left_width + right_width < width {
        spans.push(Span::styled(
            " ".repeat(width - left_width - right_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(right, idle_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
