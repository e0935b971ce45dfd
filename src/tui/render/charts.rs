use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph};

use crate::model::item::Priority;
use crate::ops::stats;
use crate::tui::app::App;

fn chart_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    let bg = app.theme.background;
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg))
}

fn render_empty(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    let msg = Paragraph::new(Span::styled(
        "No tasks yet",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ))
    .block(block);
    frame.render_widget(msg, area);
}

/// Completion gauge over all items, regardless of filters
pub fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let block = chart_block(app, " Progress ");
    let progress = stats::progress(&app.list.items);
    if progress.total == 0 {
        render_empty(frame, app, block, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.green).bg(app.theme.selection_bg))
        .percent(u16::from(progress.percent))
        .label(Span::styled(
            format!("{}%", progress.percent),
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(gauge, rows[0]);

    let detail = vec![
        Line::from(Span::styled(
            format!("{} of {} done", progress.completed, progress.total),
            Style::default().fg(app.theme.text).bg(bg),
        )),
        Line::from(Span::styled(
            format!("{} pending", progress.pending),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(detail), rows[2]);
}

/// One bar per priority
pub fn render_priorities(frame: &mut Frame, app: &App, area: Rect) {
    let block = chart_block(app, " Priorities ");
    let counts = stats::priority_counts(&app.list.items);
    if app.list.items.is_empty() {
        render_empty(frame, app, block, area);
        return;
    }

    let inner_width = block.inner(area).width;
    let gap = 1;
    let bar_width = (inner_width.saturating_sub(gap * 2) / 3).max(1);

    let bars: Vec<Bar> = Priority::ALL
        .iter()
        .map(|&priority| {
            let color = app.theme.priority_color(priority);
            Bar::default()
                .value(counts.get(priority) as u64)
                .label(Line::from(priority.as_str()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(app.theme.background).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(gap)
        .max(counts.max().max(1) as u64)
        .label_style(Style::default().fg(app.theme.text))
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory_store::sample_items;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn progress_shows_percent_and_counts() {
        let app = app_with(sample_items());
        let out = render_to_string(24, 7, |frame, area| render_progress(frame, &app, area));
        assert!(out.contains("50%"), "{}", out);
        assert!(out.contains("1 of 2 done"), "{}", out);
        assert!(out.contains("1 pending"), "{}", out);
    }

    #[test]
    fn empty_list_has_no_charts() {
        let app = app_with(Vec::new());
        let out = render_to_string(24, 7, |frame, area| {
            render_progress(frame, &app, area);
        });
        assert!(out.contains("No tasks yet"), "{}", out);
        let out = render_to_string(24, 7, |frame, area| {
            render_priorities(frame, &app, area);
        });
        assert!(out.contains("No tasks yet"), "{}", out);
    }

    #[test]
    fn priority_chart_labels_each_bar() {
        let app = app_with(sample_items());
        let out = render_to_string(26, 9, |frame, area| {
            render_priorities(frame, &app, area)
        });
        assert!(out.contains("Priorities"), "{}", out);
        assert!(out.contains("high"), "{}", out);
        assert!(out.contains("low"), "{}", out);
    }
}
