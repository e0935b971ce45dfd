use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::validate::MIN_TRANSCRIPT_CHARS;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

const PLACEHOLDER: &str = "Press i to paste a transcript";

/// Render the transcript form. While composing, the tail of the draft stays
/// in view with a cursor after the last character.
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let composing = app.mode == Mode::Compose;

    let border_color = if composing {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let chars = app.compose_buffer.trim().chars().count();
    let footer = if app.is_submitting() {
        Span::styled(
            " Analyzing\u{2026} ",
            Style::default().fg(app.theme.yellow).bg(bg),
        )
    } else if composing {
        let color = if chars >= MIN_TRANSCRIPT_CHARS {
            app.theme.green
        } else {
            app.theme.dim
        };
        Span::styled(
            format!(" {} chars \u{00B7} Ctrl-S analyze ", chars),
            Style::default().fg(color).bg(bg),
        )
    } else {
        Span::styled("", Style::default().bg(bg))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(
            " Transcript ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(footer).right_aligned())
        .style(Style::default().bg(bg));

    let inner = block.inner(area);
    let text_width = (inner.width as usize).saturating_sub(1).max(1);
    let height = inner.height as usize;

    let lines: Vec<Line> = if app.compose_buffer.is_empty() && !composing {
        vec![Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(app.theme.dim).bg(bg),
        ))]
    } else {
        let text_style = Style::default().fg(app.theme.text).bg(bg);
        let mut wrapped = unicode::wrap_hard(&app.compose_buffer, text_width);
        let skip = wrapped.len().saturating_sub(height);
        let last = wrapped.len().saturating_sub(1);
        wrapped
            .drain(..)
            .enumerate()
            .skip(skip)
            .map(|(i, row)| {
                let mut spans = vec![Span::styled(row, text_style)];
                if composing && i == last {
                    spans.push(Span::styled(
                        "\u{258C}",
                        Style::default().fg(app.theme.highlight).bg(bg),
                    )); // ▌ cursor
                }
                Line::from(spans)
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
