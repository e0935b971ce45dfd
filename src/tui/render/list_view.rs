use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::item::ActionItem;
use crate::tui::app::App;
use crate::util::unicode;

use super::push_highlighted_spans;

/// Cells for cursor, checkbox and priority before the item text
const PREFIX_WIDTH: usize = 2 + 4 + 8;
/// Cells for the created date column
const DATE_WIDTH: usize = 17;

/// Created date as shown in the list, falling back to the raw value
fn created_label(item: &ActionItem) -> String {
    match item.created() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => item.created_at.clone(),
    }
}

/// Render the derived view, one row per item
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible_height = area.height as usize;

    let total = app.list.items.len();
    let count = app.visible_items().len();
    if count == 0 {
        let msg = if total == 0 {
            " No action items yet. Press i to analyze a meeting transcript."
        } else {
            " No action items match the current filters. Press X to clear them."
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor row on screen
    app.clamp_cursor();
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if visible_height > 0 && app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }
    app.scroll_offset = app.scroll_offset.min(count.saturating_sub(1));

    let app = &*app;
    let items = app.visible_items();
    let search_re = app.search_re();
    let width = area.width as usize;
    let show_date = width >= PREFIX_WIDTH + DATE_WIDTH + 20;
    let text_width = width
        .saturating_sub(PREFIX_WIDTH)
        .saturating_sub(if show_date { DATE_WIDTH } else { 0 });

    let end = count.min(app.scroll_offset + visible_height);
    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    for (row, item) in items[app.scroll_offset..end].iter().enumerate() {
        let is_cursor = row + app.scroll_offset == app.cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
        let done = item.is_completed();

        let mut spans = Vec::new();
        spans.push(Span::styled(
            if is_cursor { "\u{25B8} " } else { "  " },
            Style::default().fg(app.theme.highlight).bg(row_bg),
        ));
        spans.push(Span::styled(
            format!("[{}] ", item.status.checkbox_char()),
            Style::default()
                .fg(if done { app.theme.green } else { app.theme.text })
                .bg(row_bg),
        ));
        spans.push(Span::styled(
            format!("{:<8}", item.priority.as_str()),
            Style::default()
                .fg(app.theme.priority_color(item.priority))
                .bg(row_bg),
        ));

        let mut text_style = Style::default()
            .fg(app.theme.status_color(item.status))
            .bg(row_bg);
        if done {
            text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
        }
        if is_cursor && !done {
            text_style = text_style.fg(app.theme.text_bright);
        }
        let highlight_style = Style::default()
            .fg(app.theme.search_match_fg)
            .bg(app.theme.search_match_bg);
        let text = unicode::fit_to_width(&item.text.replace('\n', " "), text_width);
        push_highlighted_spans(
            &mut spans,
            &text,
            text_style,
            highlight_style,
            search_re.as_ref(),
        );

        if show_date {
            spans.push(Span::styled(
                format!(" {:>width$}", created_label(item), width = DATE_WIDTH - 1),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}
