use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;

/// Render the blocking notice popup
pub fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = &app.notice else {
        return;
    };
    let bg = app.theme.background;

    let width = area.width.saturating_sub(4).min(56);
    let height = area.height.min(7);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .title(Span::styled(
            " Notice ",
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(Span::styled(
                " Enter OK ",
                Style::default().fg(app.theme.dim).bg(bg),
            ))
            .right_aligned(),
        )
        .style(Style::default().bg(bg));

    let body = Paragraph::new(Line::from(Span::styled(
        message.as_str(),
        Style::default().fg(app.theme.text_bright).bg(bg),
    )))
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(body, popup);
}
